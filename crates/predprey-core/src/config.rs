//! Configuration types for the simulation.

use crate::{Error, MovementSet, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Parameters of one simulation run.
///
/// Immutable while a run is in progress; pass a new value to start a run with
/// different rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Width of the grid (columns)
    pub width: i32,
    /// Height of the grid (rows)
    pub height: i32,
    /// Number of prey placed by the initial grid
    pub initial_prey: usize,
    /// Number of predators placed by the initial grid
    pub initial_predators: usize,
    /// Chance (0.0 to 1.0) that a prey spawns offspring after moving
    pub prey_reproduction_chance: f64,
    /// Chance (0.0 to 1.0) that a predator spawns offspring after moving
    pub predator_reproduction_chance: f64,
    /// Energy of a fed or newborn predator; a predator starves after this many
    /// steps without eating
    pub predator_max_energy: u32,
    /// How far below max energy a predator may fall and still reproduce
    pub predator_meal_requirement: u32,
    /// Prey prefer destinations with no predator within one move
    pub smart_prey: bool,
    /// Edges wrap around instead of blocking movement
    pub toroidal: bool,
    pub movement: MovementSet,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            initial_prey: 100,
            initial_predators: 10,
            prey_reproduction_chance: 0.05,
            predator_reproduction_chance: 0.03,
            predator_max_energy: 20,
            predator_meal_requirement: 10,
            smart_prey: true,
            toroidal: false,
            movement: MovementSet::Orthogonal,
        }
    }
}

impl SimConfig {
    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::Validation(format!(
                "grid dimensions must be positive, got {}x{}",
                self.height, self.width
            )));
        }

        if self.predator_max_energy == 0 {
            return Err(Error::Validation(
                "predator_max_energy must be at least 1".to_string(),
            ));
        }

        for (name, chance) in [
            ("prey_reproduction_chance", self.prey_reproduction_chance),
            ("predator_reproduction_chance", self.predator_reproduction_chance),
        ] {
            if !chance.is_finite() || !(0.0..=1.0).contains(&chance) {
                return Err(Error::Validation(format!(
                    "{} must be within [0, 1], got {}",
                    name, chance
                )));
            }
        }

        if self.movement.directions().is_empty() {
            return Err(Error::Validation(
                "movement set must contain at least one direction".to_string(),
            ));
        }

        Ok(())
    }

    /// A predator must hold strictly more energy than this to reproduce
    pub fn reproduction_threshold(&self) -> u32 {
        self.predator_max_energy
            .saturating_sub(self.predator_meal_requirement)
    }

    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }
}

/// A batch run: how many steps to advance, from which seed, under which rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of steps to run
    pub num_steps: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Emit a population snapshot every this many steps (0 disables)
    pub report_interval: u64,
    pub sim: SimConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_steps: 100,
            seed: 0,
            report_interval: 10,
            sim: SimConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.sim.validate()?;
        Ok(config)
    }

    /// Load a run configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading run configuration");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
