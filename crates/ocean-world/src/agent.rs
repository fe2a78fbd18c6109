//! Agent state.

use ocean_core::{AgentId, AgentKind, Position};
use serde::{Deserialize, Serialize};

/// One predator, prey or barrier on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub kind: AgentKind,
    pub position: Position,
    /// Ticks since the last meal. Only predators get hungry.
    pub hunger: u32,
    /// Ticks since birth or the last reproduction
    pub fertility: u32,
}

impl Agent {
    pub fn new(id: AgentId, kind: AgentKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            hunger: 0,
            fertility: 0,
        }
    }

    pub fn with_counters(mut self, hunger: u32, fertility: u32) -> Self {
        self.hunger = hunger;
        self.fertility = fertility;
        self
    }

    pub fn is_predator(&self) -> bool {
        self.kind == AgentKind::Predator
    }

    pub fn is_prey(&self) -> bool {
        self.kind == AgentKind::Prey
    }

    pub fn feed(&mut self) {
        self.hunger = 0;
    }

    pub fn after_birth(&mut self) {
        self.fertility = 0;
    }

    pub fn get_hungrier(&mut self) {
        self.hunger = self.hunger.saturating_add(1);
    }

    pub fn mature(&mut self) {
        self.fertility = self.fertility.saturating_add(1);
    }

    pub fn move_to(&mut self, new_position: Position) {
        self.position = new_position;
    }
}
