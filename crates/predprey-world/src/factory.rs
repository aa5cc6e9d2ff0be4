//! Initial grid generation.

use crate::grid::Grid;
use predprey_core::{Cell, Position, Result, SimConfig};
use rand::Rng;
use tracing::{debug, warn};

pub struct GridFactory;

impl GridFactory {
    /// Build a randomized starting grid.
    ///
    /// Places `min(initial_prey + initial_predators, cells)` agents on distinct
    /// cells chosen by rejection sampling. Prey are placed first; predators fill
    /// the remainder at full energy.
    pub fn generate<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Result<Grid> {
        config.validate()?;

        let mut grid = Grid::new(config.height, config.width);
        let requested = config.initial_prey.saturating_add(config.initial_predators);
        let to_place = requested.min(config.cell_count());

        if to_place < requested {
            warn!(
                requested = requested,
                capacity = config.cell_count(),
                "Grid too small for requested population; filling every cell"
            );
        }

        for n in 0..to_place {
            let mut pos = Self::random_position(config, rng);
            while !grid.is_empty_at(pos) {
                pos = Self::random_position(config, rng);
            }

            let cell = if n < config.initial_prey {
                Cell::Prey
            } else {
                Cell::predator(config.predator_max_energy)
            };
            grid.set(pos, cell);
        }

        let census = grid.census();
        debug!(
            height = config.height,
            width = config.width,
            prey = census.prey,
            predators = census.predators,
            "Generated initial grid"
        );

        Ok(grid)
    }

    fn random_position<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> Position {
        let row = rng.gen_range(0..config.height);
        let col = rng.gen_range(0..config.width);
        Position::new(row, col)
    }
}
