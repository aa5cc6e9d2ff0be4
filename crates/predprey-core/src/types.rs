//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D position on the grid, addressed by row then column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn add(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Apply toroidal wrapping for given grid dimensions
    pub fn wrap(&self, height: i32, width: i32) -> Self {
        Self {
            row: ((self.row % height) + height) % height,
            col: ((self.col % width) + width) % width,
        }
    }

    pub fn in_bounds(&self, height: i32, width: i32) -> bool {
        self.row >= 0 && self.row < height && self.col >= 0 && self.col < width
    }

    /// Chebyshev distance, the number of king moves between two cells
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction for movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Right,
    Down,
    Up,
    Left,
    DownRight,
    UpRight,
    UpLeft,
    DownLeft,
}

impl Direction {
    /// Row and column offset of a single move
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::DownRight => (1, 1),
            Direction::UpRight => (-1, 1),
            Direction::UpLeft => (-1, -1),
            Direction::DownLeft => (1, -1),
        }
    }

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Up,
        Direction::Left,
    ];

    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::DownRight,
        Direction::UpRight,
        Direction::UpLeft,
        Direction::DownLeft,
    ];
}

/// The set of moves an agent may take, scanned in a fixed order.
///
/// The order is observable: with a fixed seed, candidate lists are built in
/// this order before a random index is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementSet {
    /// Right, down, up, left
    #[default]
    Orthogonal,
    /// The orthogonal moves followed by the four diagonals
    WithDiagonals,
    Custom(Vec<Direction>),
}

impl MovementSet {
    pub fn directions(&self) -> &[Direction] {
        match self {
            MovementSet::Orthogonal => &Direction::ORTHOGONAL,
            MovementSet::WithDiagonals => &Direction::ALL,
            MovementSet::Custom(dirs) => dirs,
        }
    }
}

/// State of a single grid cell.
///
/// Predators carry their remaining energy: the number of steps they can still
/// survive without eating. A predator is never stored with zero energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Prey,
    Predator(u32),
}

impl Cell {
    /// A predator with the given energy, or an empty cell if it has none left
    pub fn predator(energy: u32) -> Self {
        if energy == 0 {
            Cell::Empty
        } else {
            Cell::Predator(energy)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_prey(&self) -> bool {
        matches!(self, Cell::Prey)
    }

    pub fn is_predator(&self) -> bool {
        matches!(self, Cell::Predator(_))
    }

    pub fn energy(&self) -> Option<u32> {
        match self {
            Cell::Predator(energy) => Some(*energy),
            _ => None,
        }
    }

    /// Decode the signed-integer form: zero is empty, negative is prey,
    /// positive is a predator with that much energy.
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => Cell::Empty,
            v if v < 0 => Cell::Prey,
            v => Cell::Predator(v as u32),
        }
    }

    pub fn to_raw(&self) -> i32 {
        match self {
            Cell::Empty => 0,
            Cell::Prey => -1,
            Cell::Predator(energy) => i32::try_from(*energy).unwrap_or(i32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.wrap(10, 10), Position::new(5, 5));

        let pos = Position::new(-1, -1);
        assert_eq!(pos.wrap(10, 10), Position::new(9, 9));

        let pos = Position::new(10, 4);
        assert_eq!(pos.wrap(10, 4), Position::new(0, 0));
    }

    #[test]
    fn test_bounds() {
        assert!(Position::new(0, 0).in_bounds(3, 4));
        assert!(Position::new(2, 3).in_bounds(3, 4));
        assert!(!Position::new(3, 0).in_bounds(3, 4));
        assert!(!Position::new(0, -1).in_bounds(3, 4));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Right.to_delta(), (0, 1));
        assert_eq!(Direction::Down.to_delta(), (1, 0));
        assert_eq!(Direction::Up.to_delta(), (-1, 0));
        assert_eq!(Direction::Left.to_delta(), (0, -1));
        assert_eq!(Direction::UpLeft.to_delta(), (-1, -1));
    }

    #[test]
    fn test_movement_sets() {
        assert_eq!(MovementSet::default().directions().len(), 4);
        assert_eq!(MovementSet::WithDiagonals.directions().len(), 8);
        assert_eq!(
            MovementSet::Custom(vec![Direction::Up]).directions(),
            &[Direction::Up]
        );
    }

    #[test]
    fn test_starved_predator_is_empty() {
        assert_eq!(Cell::predator(0), Cell::Empty);
        assert_eq!(Cell::predator(3), Cell::Predator(3));
        assert_eq!(Cell::Predator(3).energy(), Some(3));
        assert_eq!(Cell::Prey.energy(), None);
    }

    #[test]
    fn test_raw_encoding() {
        assert_eq!(Cell::from_raw(0), Cell::Empty);
        assert_eq!(Cell::from_raw(-7), Cell::Prey);
        assert_eq!(Cell::from_raw(12), Cell::Predator(12));

        assert_eq!(Cell::Empty.to_raw(), 0);
        assert!(Cell::Prey.to_raw() < 0);
        assert_eq!(Cell::Predator(20).to_raw(), 20);
    }
}
