pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod rules;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod store;
pub mod terminal;

pub use config::{GameConfig, Settings};
pub use game::{Game, Phase, RoundState};
pub use grid::{Cell, Direction, Grid, Velocity};
