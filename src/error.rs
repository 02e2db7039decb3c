use std::path::PathBuf;

use thiserror::Error;

/// Rejected board or snake geometry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step must be positive, got {0}")]
    InvalidStep(i32),
    #[error("board {width}x{height} is not a positive multiple of step {step}")]
    MisalignedBoard { width: i32, height: i32, step: i32 },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("initial snake of length {length} does not fit on a board {width} wide")]
    SnakeTooLong { length: usize, width: i32 },
    #[error("board of {columns}x{rows} cells exceeds the limit of {limit} cells")]
    BoardTooLarge { columns: i32, rows: i32, limit: u32 },
}

/// Failure of the persistent key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store at {path} is not a JSON object")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Food could not be placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no free cell left on the board")]
    BoardFull,
}
