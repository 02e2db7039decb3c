//! Collision checks run once per tick against the current head.
//!
//! Fatal collisions win over eating: a head that is both out of bounds (or on
//! its own body) and on the food cell loses the round.

use crate::grid::{Cell, Grid};
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossCause {
    Wall,
    SelfCollision,
}

/// What the rules decided about the current head position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Lost(LossCause),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub verdict: Verdict,
    /// Head is on the food: the caller scores a point and grows the snake.
    pub ate_food: bool,
}

pub fn evaluate(snake: &Snake, food: Cell, grid: &Grid) -> Evaluation {
    let head = snake.head();

    let verdict = if snake.tail_segments().any(|segment| segment == head) {
        Verdict::Lost(LossCause::SelfCollision)
    } else if !grid.contains(head) {
        Verdict::Lost(LossCause::Wall)
    } else {
        Verdict::Continue
    };

    Evaluation {
        verdict,
        ate_food: verdict == Verdict::Continue && head == food,
    }
}

/// Score at which the board counts as filled and the round is won.
pub fn win_threshold(grid: &Grid, initial_length: usize) -> u32 {
    let initial = u32::try_from(initial_length).unwrap_or(u32::MAX);
    grid.total_cells().saturating_sub(initial)
}
