//! 2D grid of cells.

use predprey_core::{Cell, Census, Direction, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular grid of cells stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-empty grid. Dimensions are expected to have been validated.
    pub fn new(height: i32, width: i32) -> Self {
        let size = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Empty; size],
        }
    }

    /// Build a grid from rows of signed cell values (0 empty, negative prey,
    /// positive predator energy)
    pub fn from_raw_rows(rows: &[Vec<i32>]) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |row| row.len() as i32);
        let mut grid = Self::new(height, width);
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate().take(width as usize) {
                grid.set(Position::new(r as i32, c as i32), Cell::from_raw(value));
            }
        }
        grid
    }

    pub fn to_raw_rows(&self) -> Vec<Vec<i32>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(Cell::to_raw).collect())
            .collect()
    }

    /// Get the cell at an in-bounds position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.pos_to_index(pos)]
    }

    /// Set the cell at an in-bounds position
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let index = self.pos_to_index(pos);
        self.cells[index] = cell;
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds(self.height, self.width)
    }

    /// The cell one move away in `direction`.
    ///
    /// Wraps across edges when `toroidal`, otherwise returns `None` for moves
    /// that leave the grid.
    pub fn neighbor(&self, pos: Position, direction: Direction, toroidal: bool) -> Option<Position> {
        let (drow, dcol) = direction.to_delta();
        let target = pos.add(drow, dcol);
        if toroidal {
            Some(target.wrap(self.height, self.width))
        } else if self.contains(target) {
            Some(target)
        } else {
            None
        }
    }

    /// All cells reachable in one move, in `directions` order
    pub fn neighbors<'a>(
        &'a self,
        pos: Position,
        directions: &'a [Direction],
        toroidal: bool,
    ) -> impl Iterator<Item = Position> + 'a {
        directions
            .iter()
            .filter_map(move |&dir| self.neighbor(pos, dir, toroidal))
    }

    pub fn census(&self) -> Census {
        Census::from_cells(&self.cells)
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos), "position {} outside grid", pos);
        pos.row as usize * self.width as usize + pos.col as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width.max(1) as usize;
        Position::new((index / width) as i32, (index % width) as i32)
    }

    /// Iterator over all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }
}

/// Text rendering: `W` for predators, `o` for prey, framed by a border
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.width.max(0) as usize);
        writeln!(f, "+{}+", border)?;
        for row in self.cells.chunks(self.width.max(1) as usize) {
            write!(f, "|")?;
            for cell in row {
                let glyph = match cell {
                    Cell::Predator(_) => 'W',
                    Cell::Prey => 'o',
                    Cell::Empty => ' ',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+{}+", border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 6);
        assert_eq!(grid.height, 4);
        assert_eq!(grid.width, 6);
        assert_eq!(grid.positions().count(), 24);
        assert!(grid.iter().all(|(_, cell)| cell.is_empty()));
    }

    #[test]
    fn test_index_math_beyond_i32_cell_count() {
        // 50000 * 50000 cells do not fit in an i32; only the arithmetic is
        // exercised here, no grid of that size is allocated.
        let grid = Grid {
            width: 50_000,
            height: 50_000,
            cells: Vec::new(),
        };
        let last = Position::new(49_999, 49_999);
        let index = grid.pos_to_index(last);
        assert_eq!(index, 2_499_999_999);
        assert_eq!(grid.index_to_pos(index), last);
    }

    #[test]
    fn test_row_major_positions() {
        let grid = Grid::new(2, 3);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[2], Position::new(0, 2));
        assert_eq!(positions[3], Position::new(1, 0));
    }

    #[test]
    fn test_neighbor_bounded() {
        let grid = Grid::new(3, 3);
        let corner = Position::new(0, 0);
        assert_eq!(grid.neighbor(corner, Direction::Up, false), None);
        assert_eq!(grid.neighbor(corner, Direction::Left, false), None);
        assert_eq!(
            grid.neighbor(corner, Direction::Right, false),
            Some(Position::new(0, 1))
        );

        let all: Vec<_> = grid
            .neighbors(corner, &Direction::ORTHOGONAL, false)
            .collect();
        assert_eq!(all, vec![Position::new(0, 1), Position::new(1, 0)]);
    }

    #[test]
    fn test_neighbor_toroidal() {
        let grid = Grid::new(3, 5);
        assert_eq!(
            grid.neighbor(Position::new(0, 2), Direction::Up, true),
            Some(Position::new(2, 2))
        );
        assert_eq!(
            grid.neighbor(Position::new(1, 4), Direction::Right, true),
            Some(Position::new(1, 0))
        );
        assert_eq!(
            grid.neighbor(Position::new(0, 0), Direction::UpLeft, true),
            Some(Position::new(2, 4))
        );
    }

    #[test]
    fn test_raw_rows_round_trip() {
        let rows = vec![vec![0, -1, 5], vec![3, 0, -2]];
        let grid = Grid::from_raw_rows(&rows);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.get(Position::new(0, 2)), Cell::Predator(5));
        assert_eq!(grid.get(Position::new(1, 2)), Cell::Prey);
        assert_eq!(
            grid.to_raw_rows(),
            vec![vec![0, -1, 5], vec![3, 0, -1]]
        );
    }

    #[test]
    fn test_census() {
        let grid = Grid::from_raw_rows(&[vec![-1, -1, 0], vec![7, 0, -1]]);
        let census = grid.census();
        assert_eq!(census.prey, 3);
        assert_eq!(census.predators, 1);
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_raw_rows(&[vec![-1, 0], vec![0, 4]]);
        assert_eq!(grid.to_string(), "+--+\n|o |\n| W|\n+--+");
    }
}
