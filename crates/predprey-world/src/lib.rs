//! Predator-prey grid world.
//!
//! This crate implements the grid, its initial randomized layout, and the
//! step transition that moves, feeds, starves and breeds the agents on it.

pub mod grid;
pub mod select;
pub mod factory;
pub mod engine;
pub mod simulation;

pub use grid::Grid;
pub use factory::GridFactory;
pub use engine::{GridEngine, StepReport};
pub use simulation::{Simulation, SimulationResult};
