use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ConfigError;
use crate::grid::Grid;

/// Largest board accepted, in cells.
pub const MAX_CELLS: u32 = 1 << 16;

/// Command-line options for a game session.
#[derive(Debug, Clone, Parser)]
#[command(name = "snekgrid", version, about = "Grid-stepped snake for the terminal")]
pub struct GameConfig {
    /// Board width in drawing units (a multiple of --step).
    #[arg(long, default_value_t = 400)]
    pub width: i32,

    /// Board height in drawing units (a multiple of --step).
    #[arg(long, default_value_t = 200)]
    pub height: i32,

    /// Size of one grid cell.
    #[arg(long, default_value_t = 10)]
    pub step: i32,

    /// Milliseconds between ticks; more is slower.
    #[arg(long, default_value_t = 150)]
    pub speed_ms: u64,

    /// Number of segments the snake starts with.
    #[arg(long, default_value_t = 10)]
    pub initial_length: usize,

    /// JSON file holding the persisted highscore.
    #[arg(long, default_value = "snekgrid-highscore.json")]
    pub highscore_file: PathBuf,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 400,
            height: 200,
            step: 10,
            speed_ms: 150,
            initial_length: 10,
            highscore_file: PathBuf::from("snekgrid-highscore.json"),
            seed: None,
            log_file: None,
        }
    }
}

/// Validated round parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub grid: Grid,
    pub initial_length: usize,
    pub tick_period: Duration,
}

impl GameConfig {
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let step = self.step;
        if step <= 0 {
            return Err(ConfigError::InvalidStep(step));
        }
        let aligned = |extent: i32| extent > 0 && extent % step == 0;
        if !aligned(self.width) || !aligned(self.height) {
            return Err(ConfigError::MisalignedBoard {
                width: self.width,
                height: self.height,
                step,
            });
        }
        let grid = Grid::new(self.width, self.height, step);
        let cells = i64::from(grid.columns()) * i64::from(grid.rows());
        if cells > i64::from(MAX_CELLS) {
            return Err(ConfigError::BoardTooLarge {
                columns: grid.columns(),
                rows: grid.rows(),
                limit: MAX_CELLS,
            });
        }

        if self.initial_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        // head starts at (length + 1) * step and must stay on the board
        let fits = i64::try_from(self.initial_length)
            .ok()
            .and_then(|length| length.checked_add(2))
            .and_then(|cells| cells.checked_mul(i64::from(step)))
            .is_some_and(|needed| needed <= i64::from(self.width));
        if !fits {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_length,
                width: self.width,
            });
        }

        Ok(Settings {
            grid,
            initial_length: self.initial_length,
            tick_period: Duration::from_millis(self.speed_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = GameConfig::default().validate().unwrap();
        assert_eq!(settings.grid, Grid::new(400, 200, 10));
        assert_eq!(settings.initial_length, 10);
        assert_eq!(settings.tick_period, Duration::from_millis(150));
    }

    #[test]
    fn parses_flags() {
        let config = GameConfig::try_parse_from([
            "snekgrid",
            "--width",
            "100",
            "--height",
            "100",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(config.width, 100);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.step, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_geometry() {
        let config = GameConfig {
            width: 105,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MisalignedBoard { .. })
        ));

        let config = GameConfig {
            step: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidStep(0)));

        let config = GameConfig {
            initial_length: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySnake));

        let config = GameConfig {
            initial_length: usize::MAX,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SnakeTooLong {
                length: usize::MAX,
                width: 400
            })
        );

        let config = GameConfig {
            width: 100_000,
            height: 100_000,
            step: 1,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooLarge {
                columns: 100_000,
                rows: 100_000,
                limit: MAX_CELLS
            })
        );

        let config = GameConfig {
            width: 100,
            initial_length: 9,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SnakeTooLong {
                length: 9,
                width: 100
            })
        );
    }
}
