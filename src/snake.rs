use std::collections::VecDeque;

use crate::grid::{Cell, Grid, Velocity};

/// Ordered body segments, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Lays out `length` segments horizontally along the middle row, heading
    /// right. The head sits at `(length + 1) * step` and the tail at `2 * step`.
    pub fn horizontal(grid: &Grid, length: usize) -> Self {
        let y = grid.middle_row();
        let body = (1..=length)
            .rev()
            .map(|i| Cell::new((i as i32 + 1) * grid.step, y))
            .collect();
        Snake { body }
    }

    /// Builds a snake from explicit segments. Returns `None` when `cells` is empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Snake { body })
        }
    }

    /// Prepends the head moved by `velocity`; drops the tail unless `grew`.
    pub fn advance(&mut self, velocity: Velocity, grew: bool) {
        let new_head = self.head().offset(velocity);
        self.body.push_front(new_head);
        if !grew {
            self.body.pop_back();
        }
    }

    pub fn head(&self) -> Cell {
        // body is never empty: constructors reject it and advance only pops after a push
        self.body[0]
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Every segment except the head.
    pub fn tail_segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().skip(1).copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
