use tracing::trace;

use crate::grid::{Direction, Velocity};

/// Accepts at most one direction change per tick and refuses reversals.
#[derive(Debug, Default)]
pub struct InputHandler {
    changed_this_tick: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `requested` to `velocity` unless a change was already accepted
    /// this tick or it would reverse the snake into its neck. Returns whether
    /// the request was accepted.
    pub fn on_direction(
        &mut self,
        requested: Direction,
        velocity: &mut Velocity,
        step: i32,
    ) -> bool {
        if self.changed_this_tick {
            return false;
        }

        let allowed = match requested {
            Direction::Left => velocity.dx != step,
            Direction::Right => velocity.dx != -step,
            Direction::Up => velocity.dy != step,
            Direction::Down => velocity.dy != -step,
        };
        if !allowed {
            return false;
        }

        *velocity = requested.velocity(step);
        self.changed_this_tick = true;
        trace!(?requested, "direction accepted");
        true
    }

    /// Called once per tick, after the snake has moved.
    pub fn clear_latch(&mut self) {
        self.changed_this_tick = false;
    }

    pub fn is_latched(&self) -> bool {
        self.changed_this_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: i32 = 10;

    fn moving_right() -> Velocity {
        Direction::Right.velocity(STEP)
    }

    #[test]
    fn reversal_is_rejected() {
        let mut input = InputHandler::new();
        let mut velocity = moving_right();
        assert!(!input.on_direction(Direction::Left, &mut velocity, STEP));
        assert_eq!(velocity, moving_right());
        assert!(!input.is_latched());
    }

    #[test]
    fn perpendicular_turns_are_accepted() {
        for (dir, expected) in [
            (Direction::Up, Velocity { dx: 0, dy: -STEP }),
            (Direction::Down, Velocity { dx: 0, dy: STEP }),
        ] {
            let mut input = InputHandler::new();
            let mut velocity = moving_right();
            assert!(input.on_direction(dir, &mut velocity, STEP));
            assert_eq!(velocity, expected);
        }
    }

    #[test]
    fn only_first_change_per_tick_applies() {
        let mut input = InputHandler::new();
        let mut velocity = moving_right();
        assert!(input.on_direction(Direction::Up, &mut velocity, STEP));
        assert!(!input.on_direction(Direction::Left, &mut velocity, STEP));
        assert_eq!(velocity, Direction::Up.velocity(STEP));

        input.clear_latch();
        assert!(input.on_direction(Direction::Left, &mut velocity, STEP));
        assert_eq!(velocity, Direction::Left.velocity(STEP));
    }
}
