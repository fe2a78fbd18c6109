//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hunger level past which a predator starves
pub const MAX_HUNGER: u32 = 20;
/// Hunger level a predator must exceed before it will eat
pub const HUNGER_THRESHOLD: u32 = 3 * MAX_HUNGER / 5;
/// Ticks an agent must live before it can reproduce
pub const PREGNANT_TIME: u32 = 100;
/// Upper bound for `max_hunger` and `pregnant_time`
pub const MAX_LIFECYCLE_TICKS: u32 = u32::MAX / 3;

/// Hunger and fertility limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Predators with hunger above this starve instead of acting
    pub max_hunger: u32,
    /// Fertility counter value at which an agent reproduces
    pub pregnant_time: u32,
}

impl LifecycleConfig {
    pub fn hunger_threshold(&self) -> u32 {
        (u64::from(self.max_hunger) * 3 / 5) as u32
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_hunger: MAX_HUNGER,
            pregnant_time: PREGNANT_TIME,
        }
    }
}

/// Initial population placed at random empty cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub predators: usize,
    pub prey: usize,
    pub barriers: usize,
    /// Agents whose kind is drawn uniformly from all kinds
    pub random: usize,
    /// Start agents with random hunger and fertility counters
    pub randomize_age: bool,
}

impl PopulationConfig {
    pub fn total(&self) -> usize {
        self.predators + self.prey + self.barriers + self.random
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            predators: 1,
            prey: 1,
            barriers: 0,
            random: 0,
            randomize_age: false,
        }
    }
}

/// Simulation run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Side length of the square grid
    pub grid_size: i32,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Tick budget, 0 runs until extinction
    pub max_ticks: u64,
    /// Render a frame every this many ticks, 0 disables rendering
    pub render_every: u64,
    pub population: PopulationConfig,
    pub lifecycle: LifecycleConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: 3,
            seed: 0,
            max_ticks: 0,
            render_every: 1,
            population: PopulationConfig::default(),
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size <= 0 {
            return Err(Error::Validation(format!(
                "grid size must be positive, got {}",
                self.grid_size
            )));
        }

        if self.lifecycle.pregnant_time == 0 {
            return Err(Error::Validation(
                "pregnant_time must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("max_hunger", self.lifecycle.max_hunger),
            ("pregnant_time", self.lifecycle.pregnant_time),
        ] {
            if value > MAX_LIFECYCLE_TICKS {
                return Err(Error::Validation(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_LIFECYCLE_TICKS, value
                )));
            }
        }

        let cells = (self.grid_size as usize).saturating_mul(self.grid_size as usize);
        if self.population.total() > cells {
            return Err(Error::Validation(format!(
                "{} initial agents do not fit on {} cells",
                self.population.total(),
                cells
            )));
        }

        Ok(())
    }
}
