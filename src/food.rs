use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::PlacementError;
use crate::grid::{Cell, Grid};

/// Random samples tried before falling back to scanning the free cells.
pub const MAX_SAMPLE_ATTEMPTS: usize = 1024;

/// Picks food cells uniformly at random among the cells not in `occupied`.
#[derive(Debug)]
pub struct FoodPlacer<R> {
    rng: R,
    max_attempts: usize,
}

impl<R: Rng> FoodPlacer<R> {
    pub fn new(rng: R) -> Self {
        FoodPlacer {
            rng,
            max_attempts: MAX_SAMPLE_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn place(
        &mut self,
        occupied: &HashSet<Cell>,
        grid: &Grid,
    ) -> Result<Cell, PlacementError> {
        let (columns, rows) = (grid.columns(), grid.rows());
        if columns <= 0 || rows <= 0 {
            return Err(PlacementError::BoardFull);
        }

        for _ in 0..self.max_attempts {
            let column = self.rng.gen_range(0..columns);
            let row = self.rng.gen_range(0..rows);
            let cell = grid.cell_at(column, row);
            if !occupied.contains(&cell) {
                debug!(x = cell.x, y = cell.y, "food placed");
                return Ok(cell);
            }
        }

        // A crowded board makes rejection sampling slow; choose among what is left.
        let cell = grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .choose(&mut self.rng);
        match cell {
            Some(cell) => {
                debug!(x = cell.x, y = cell.y, "food placed after scanning free cells");
                Ok(cell)
            }
            None => {
                warn!(occupied = occupied.len(), "board is full, no cell left for food");
                Err(PlacementError::BoardFull)
            }
        }
    }
}
