//! Population snapshots recorded once per tick.

use serde::{Deserialize, Serialize};

/// Living predator and prey counts at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub predators: usize,
    pub prey: usize,
}

impl PopulationSnapshot {
    pub fn new(predators: usize, prey: usize) -> Self {
        Self { predators, prey }
    }

    /// True when either species has died out
    pub fn is_extinct(&self) -> bool {
        self.predators == 0 || self.prey == 0
    }
}

/// Peak values seen over a run's history
pub fn peak_populations(history: &[PopulationSnapshot]) -> PopulationSnapshot {
    history.iter().fold(PopulationSnapshot::default(), |peak, snap| PopulationSnapshot {
        predators: peak.predators.max(snap.predators),
        prey: peak.prey.max(snap.prey),
    })
}
