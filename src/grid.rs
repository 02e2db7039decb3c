//! Discrete coordinate space of the board.
//!
//! Coordinates are expressed in drawing units. Every cell sits on a multiple of
//! the grid `step`, so a board of 100×100 with a step of 10 holds 100 cells.

/// A grid-aligned coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Cell reached by moving one velocity vector from here.
    pub fn offset(self, velocity: Velocity) -> Self {
        Cell {
            x: self.x + velocity.dx,
            y: self.y + velocity.dy,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Velocity of one grid step in this direction.
    pub fn velocity(self, step: i32) -> Velocity {
        match self {
            Direction::Up => Velocity { dx: 0, dy: -step },
            Direction::Down => Velocity { dx: 0, dy: step },
            Direction::Left => Velocity { dx: -step, dy: 0 },
            Direction::Right => Velocity { dx: step, dy: 0 },
        }
    }
}

/// Per-tick displacement of the head. Exactly one component is non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

/// Board dimensions and cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub step: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32, step: i32) -> Self {
        Grid {
            width,
            height,
            step,
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.step
    }

    pub fn rows(&self) -> i32 {
        self.height / self.step
    }

    pub fn total_cells(&self) -> u32 {
        let cells = i64::from(self.columns()) * i64::from(self.rows());
        u32::try_from(cells.max(0)).unwrap_or(u32::MAX)
    }

    /// Whether `cell` lies on the board. The last valid coordinate on each
    /// axis is one step short of the board edge.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x <= self.width - self.step
            && cell.y >= 0
            && cell.y <= self.height - self.step
    }

    /// Cell at the given column and row index.
    pub fn cell_at(&self, column: i32, row: i32) -> Cell {
        Cell::new(column * self.step, row * self.step)
    }

    /// Iterates every cell row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |col| self.cell_at(col, row)))
    }

    /// Y coordinate of the row through the middle of the board, snapped to the grid.
    pub fn middle_row(&self) -> i32 {
        let half = self.height / 2;
        half - half % self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_respects_last_cell_before_edge() {
        let grid = Grid::new(100, 100, 10);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(90, 90)));
        assert!(!grid.contains(Cell::new(100, 50)));
        assert!(!grid.contains(Cell::new(50, -10)));
    }

    #[test]
    fn counts_cells() {
        let grid = Grid::new(100, 100, 10);
        assert_eq!(grid.total_cells(), 100);
        assert_eq!(grid.cells().count(), 100);
        assert_eq!(Grid::new(400, 200, 10).total_cells(), 800);
        // saturates instead of overflowing
        assert_eq!(Grid::new(100_000, 100_000, 1).total_cells(), u32::MAX);
    }

    #[test]
    fn middle_row_snaps_to_step() {
        assert_eq!(Grid::new(100, 100, 10).middle_row(), 50);
        assert_eq!(Grid::new(100, 110, 10).middle_row(), 50);
    }
}
