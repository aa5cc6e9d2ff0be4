//! Step transition for the predator-prey automaton.
//!
//! A step reads the current grid and writes a fresh next grid in two phases:
//! every prey moves first, then every predator, each phase scanning the
//! current grid in row-major order. Collisions are resolved first come first
//! served through the partially built next grid. Safety and eating credit are
//! judged against the current grid.

use crate::grid::Grid;
use crate::select::Tiered;
use predprey_core::{Cell, Position, Result, SimConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

// Candidate tiers, higher wins.
const PREY_EXPOSED: u8 = 0;
const PREY_SAFE: u8 = 1;
const PREDATOR_ROAM: u8 = 0;
const PREDATOR_HUNT: u8 = 1;

/// What happened during one step. Observational only: populations are always
/// derived from the grid itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub prey_moved: u32,
    /// Prey with no free destination
    pub prey_squished: u32,
    pub prey_born: u32,
    /// Prey overwritten in the next grid by a predator
    pub prey_eaten: u32,
    pub predators_moved: u32,
    /// Predators boxed in by occupied cells
    pub predators_stayed: u32,
    /// Predators that moved onto a cell holding prey at the start of the step
    pub meals: u32,
    pub predators_starved: u32,
    pub predators_born: u32,
    /// Predators overwritten by a boxed-in predator reclaiming its own cell
    pub predators_displaced: u32,
}

pub struct GridEngine {
    config: SimConfig,
}

impl GridEngine {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Compute the next grid state
    pub fn step<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Grid {
        self.step_with_report(grid, rng).0
    }

    pub fn step_with_report<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> (Grid, StepReport) {
        let mut next = Grid::new(grid.height, grid.width);
        let mut report = StepReport::default();

        self.move_all_prey(grid, &mut next, rng, &mut report);
        self.move_all_predators(grid, &mut next, rng, &mut report);

        debug!(
            prey_moved = report.prey_moved,
            prey_squished = report.prey_squished,
            prey_born = report.prey_born,
            prey_eaten = report.prey_eaten,
            predators_moved = report.predators_moved,
            predators_stayed = report.predators_stayed,
            meals = report.meals,
            predators_starved = report.predators_starved,
            predators_born = report.predators_born,
            "Step complete"
        );

        (next, report)
    }

    /// Phase A: move and reproduce every prey of `current` into `next`
    pub fn move_all_prey<R: Rng + ?Sized>(
        &self,
        current: &Grid,
        next: &mut Grid,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        for (pos, cell) in current.iter() {
            if cell.is_prey() {
                self.move_prey(current, next, pos, rng, report);
            }
        }
    }

    /// Phase B: move and reproduce every predator of `current` into `next`.
    /// Must run after [`Self::move_all_prey`] on the same `next` grid.
    pub fn move_all_predators<R: Rng + ?Sized>(
        &self,
        current: &Grid,
        next: &mut Grid,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        for (pos, cell) in current.iter() {
            if let Cell::Predator(energy) = cell {
                self.move_predator(current, next, pos, energy, rng, report);
            }
        }
    }

    fn move_prey<R: Rng + ?Sized>(
        &self,
        current: &Grid,
        next: &mut Grid,
        pos: Position,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        let directions = self.config.movement.directions();
        let mut moves = Tiered::new();

        for dest in current.neighbors(pos, directions, self.config.toroidal) {
            if !next.is_empty_at(dest) {
                continue;
            }
            let tier = if self.config.smart_prey && self.threatened(current, dest) {
                PREY_EXPOSED
            } else {
                PREY_SAFE
            };
            moves.offer(tier, dest);
        }

        let Some(dest) = moves.pick(rng) else {
            trace!(row = pos.row, col = pos.col, "Prey squished");
            report.prey_squished += 1;
            return;
        };

        next.set(dest, Cell::Prey);
        report.prey_moved += 1;

        if self.attempt_reproduction(next, dest, self.config.prey_reproduction_chance, rng) {
            report.prey_born += 1;
        }
    }

    /// Whether a predator in `current` is within one move of `pos`
    fn threatened(&self, current: &Grid, pos: Position) -> bool {
        current
            .neighbors(pos, self.config.movement.directions(), self.config.toroidal)
            .any(|p| current.get(p).is_predator())
    }

    fn move_predator<R: Rng + ?Sized>(
        &self,
        current: &Grid,
        next: &mut Grid,
        pos: Position,
        energy: u32,
        rng: &mut R,
        report: &mut StepReport,
    ) {
        let directions = self.config.movement.directions();
        let mut moves = Tiered::new();

        for dest in current.neighbors(pos, directions, self.config.toroidal) {
            match next.get(dest) {
                Cell::Prey => moves.offer(PREDATOR_HUNT, dest),
                Cell::Empty => moves.offer(PREDATOR_ROAM, dest),
                Cell::Predator(_) => {}
            }
        }

        let hungrier = energy.saturating_sub(1);

        let Some(dest) = moves.pick(rng) else {
            // Boxed in: stay put and go hungry. Whatever moved onto this cell
            // earlier in the step is overwritten, even if the predator starves.
            match next.get(pos) {
                Cell::Prey => report.prey_eaten += 1,
                Cell::Predator(_) => {
                    trace!(row = pos.row, col = pos.col, "Boxed-in predator displaced another");
                    report.predators_displaced += 1;
                }
                Cell::Empty => {}
            }
            next.set(pos, Cell::predator(hungrier));
            if hungrier == 0 {
                trace!(row = pos.row, col = pos.col, "Predator starved in place");
                report.predators_starved += 1;
            } else {
                report.predators_stayed += 1;
            }
            return;
        };

        if next.get(dest).is_prey() {
            report.prey_eaten += 1;
        }

        // Eating credit goes by where prey stood before anything moved.
        let ate = current.get(dest).is_prey();
        let remaining = if ate {
            report.meals += 1;
            self.config.predator_max_energy
        } else {
            hungrier
        };

        if remaining == 0 {
            trace!(row = dest.row, col = dest.col, "Predator starved");
            next.set(dest, Cell::Empty);
            report.predators_starved += 1;
            return;
        }

        next.set(dest, Cell::Predator(remaining));
        report.predators_moved += 1;

        if self.attempt_reproduction(next, dest, self.config.predator_reproduction_chance, rng) {
            report.predators_born += 1;
        }
    }

    /// Try to spawn offspring of the agent at `pos` in `next`.
    ///
    /// Rolls against `chance`, then picks a random empty neighbor. The species
    /// comes from the agent now standing at `pos`: prey always breed, predators
    /// only while their energy is above the reproduction threshold.
    pub fn attempt_reproduction<R: Rng + ?Sized>(
        &self,
        next: &mut Grid,
        pos: Position,
        chance: f64,
        rng: &mut R,
    ) -> bool {
        if rng.gen::<f64>() >= chance {
            return false;
        }

        let mut sites = Tiered::new();
        for site in next.neighbors(pos, self.config.movement.directions(), self.config.toroidal) {
            if next.is_empty_at(site) {
                sites.offer(0, site);
            }
        }

        let Some(site) = sites.pick(rng) else {
            return false;
        };

        let offspring = match next.get(pos) {
            Cell::Predator(energy) if energy > self.config.reproduction_threshold() => {
                Cell::predator(self.config.predator_max_energy)
            }
            Cell::Prey => Cell::Prey,
            _ => return false,
        };

        trace!(
            parent_row = pos.row,
            parent_col = pos.col,
            row = site.row,
            col = site.col,
            predator = offspring.is_predator(),
            "Offspring spawned"
        );
        next.set(site, offspring);
        true
    }
}
