//! Round lifecycle and the per-tick game loop.
//!
//! A tick runs, in order: the win check, drawing the board, food and snake,
//! the collision rules, the snake's advance, and finally the release of the
//! input latch. Ending a round stops the timer before anything else.

use std::collections::HashSet;
use std::mem;

use rand::Rng;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::PlacementError;
use crate::food::FoodPlacer;
use crate::grid::{Cell, Direction, Velocity};
use crate::input::InputHandler;
use crate::render::{self, Surface};
use crate::rules::{self, Verdict};
use crate::scheduler::Scheduler;
use crate::score::HighscoreService;
use crate::snake::Snake;
use crate::store::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Won,
    Lost,
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Everything scoped to a single round.
#[derive(Clone, Debug)]
pub struct RoundState {
    snake: Snake,
    food: Option<Cell>,
    velocity: Velocity,
    score: u32,
    phase: Phase,
    grow: bool,
}

impl RoundState {
    fn idle(snake: Snake, velocity: Velocity) -> Self {
        RoundState {
            snake,
            food: None,
            velocity,
            score: 0,
            phase: Phase::Idle,
            grow: false,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// Game loop controller. Owns the round, its timer and the highscore service.
pub struct Game<S, K, R> {
    settings: Settings,
    scheduler: S,
    highscores: HighscoreService<K>,
    placer: FoodPlacer<R>,
    input: InputHandler,
    round: RoundState,
}

impl<S, K, R> Game<S, K, R>
where
    S: Scheduler,
    K: KeyValueStore,
    R: Rng,
{
    pub fn new(settings: Settings, scheduler: S, store: K, rng: R) -> Self {
        let snake = Snake::horizontal(&settings.grid, settings.initial_length);
        let velocity = Direction::Right.velocity(settings.grid.step);
        Game {
            settings,
            scheduler,
            highscores: HighscoreService::new(store),
            placer: FoodPlacer::new(rng),
            input: InputHandler::new(),
            round: RoundState::idle(snake, velocity),
        }
    }

    /// Starts a fresh round: initial snake heading right, score 0, new food.
    pub fn start(&mut self) {
        let grid = self.settings.grid;
        let snake = Snake::horizontal(&grid, self.settings.initial_length);
        self.begin_round(snake, Direction::Right.velocity(grid.step), None);
    }

    /// Abandons the current round, whatever its phase, and starts a new one.
    pub fn restart(&mut self) {
        info!(phase = ?self.round.phase, score = self.round.score, "restarting");
        self.start();
    }

    /// Starts a round from the given snake and velocity. Food is placed
    /// randomly unless given.
    pub fn begin_round(&mut self, snake: Snake, velocity: Velocity, food: Option<Cell>) {
        self.scheduler.stop();
        self.input = InputHandler::new();
        self.highscores.load();
        self.round = RoundState::idle(snake, velocity);
        self.round.phase = Phase::Running;

        // without room for food the first tick ends the round as won
        self.round.food = match food {
            Some(food) => Some(food),
            None => self.place_food().ok(),
        };

        self.scheduler.start(self.settings.tick_period);
        info!(
            length = self.round.snake.len(),
            highscore = ?self.highscores.highscore(),
            "round started"
        );
    }

    /// Requests a direction change for the next advance.
    pub fn on_direction(&mut self, direction: Direction) -> bool {
        if self.round.phase != Phase::Running {
            return false;
        }
        self.input
            .on_direction(direction, &mut self.round.velocity, self.settings.grid.step)
    }

    /// Runs one tick if the scheduler says one is due.
    pub fn poll_tick(&mut self, surface: &mut impl Surface) -> Option<Phase> {
        if self.scheduler.poll() {
            Some(self.tick(surface))
        } else {
            None
        }
    }

    /// Runs one tick of the loop and returns the phase afterwards. Ticks
    /// outside a running round do nothing.
    pub fn tick(&mut self, surface: &mut impl Surface) -> Phase {
        if self.round.phase != Phase::Running {
            return self.round.phase;
        }
        let grid = self.settings.grid;

        if self.round.score >= self.win_threshold() {
            self.end_round(Phase::Won, surface);
            return self.round.phase;
        }

        render::draw_board(surface, &grid, self.round.food);
        render::draw_snake(surface, &grid, &self.round.snake);

        let Some(food) = self.round.food else {
            // no free cell was left for food
            self.end_round(Phase::Won, surface);
            return self.round.phase;
        };

        let evaluation = rules::evaluate(&self.round.snake, food, &grid);
        if let Verdict::Lost(cause) = evaluation.verdict {
            debug!(?cause, head = ?self.round.snake.head(), "collision");
            self.end_round(Phase::Lost, surface);
            return self.round.phase;
        }
        if evaluation.ate_food {
            self.round.score += 1;
            self.round.grow = true;
            match self.place_food() {
                Ok(food) => self.round.food = Some(food),
                Err(PlacementError::BoardFull) => {
                    self.round.food = None;
                    self.end_round(Phase::Won, surface);
                    return self.round.phase;
                }
            }
        }

        let grew = mem::take(&mut self.round.grow);
        self.round.snake.advance(self.round.velocity, grew);
        self.input.clear_latch();

        render::draw_hud(surface, &grid, self.round.score, self.highscores.highscore());
        self.round.phase
    }

    fn end_round(&mut self, outcome: Phase, surface: &mut impl Surface) {
        self.scheduler.stop();
        self.round.phase = outcome;

        let grid = self.settings.grid;
        let score = self.round.score;
        render::draw_end_banner(surface, &grid, outcome == Phase::Won, score);
        self.highscores.save(score);
        render::draw_hud(surface, &grid, score, self.highscores.highscore());
        info!(?outcome, score, "round over");
    }

    /// Places food off the snake and off the cell its head moves into next.
    fn place_food(&mut self) -> Result<Cell, PlacementError> {
        let mut occupied: HashSet<Cell> = self.round.snake.cells().collect();
        occupied.insert(self.round.snake.head().offset(self.round.velocity));
        self.placer.place(&occupied, &self.settings.grid)
    }

    pub fn win_threshold(&self) -> u32 {
        rules::win_threshold(&self.settings.grid, self.settings.initial_length)
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn highscore(&self) -> Option<u32> {
        self.highscores.highscore()
    }

    pub fn highscores(&self) -> &HighscoreService<K> {
        &self.highscores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
