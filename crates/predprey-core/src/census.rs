//! Population statistics derived from grid contents.

use crate::Cell;
use serde::{Deserialize, Serialize};

/// Population counts for one grid state.
///
/// Always recomputed by scanning cells; nothing else keeps authoritative counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub predators: usize,
    pub prey: usize,
    /// Sum of predator energy, for averages
    pub predator_energy: u64,
}

impl Census {
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut census = Census::default();
        for cell in cells {
            match cell {
                Cell::Predator(energy) => {
                    census.predators += 1;
                    census.predator_energy += u64::from(*energy);
                }
                Cell::Prey => census.prey += 1,
                Cell::Empty => {}
            }
        }
        census
    }

    pub fn total(&self) -> usize {
        self.predators + self.prey
    }

    pub fn avg_predator_energy(&self) -> f64 {
        if self.predators == 0 {
            0.0
        } else {
            self.predator_energy as f64 / self.predators as f64
        }
    }

    pub fn is_extinct(&self) -> bool {
        self.total() == 0
    }
}
