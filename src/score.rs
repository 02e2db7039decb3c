use serde_json::Value;
use tracing::{info, warn};

use crate::store::KeyValueStore;

pub const HIGHSCORE_KEY: &str = "highscore";

/// Owns the best score across rounds and keeps it in a [`KeyValueStore`].
///
/// Store failures never end a round: they are logged and the known highscore
/// stays as it was.
#[derive(Debug)]
pub struct HighscoreService<S> {
    store: S,
    highscore: Option<u32>,
}

impl<S: KeyValueStore> HighscoreService<S> {
    pub fn new(store: S) -> Self {
        HighscoreService {
            store,
            highscore: None,
        }
    }

    /// Reads the persisted highscore. Absent, unreadable or non-numeric values count as 0.
    pub fn load(&mut self) -> u32 {
        match self.store.get(HIGHSCORE_KEY) {
            Ok(Some(value)) => match parse_score(&value) {
                Some(score) => self.highscore = Some(score),
                None => warn!(%value, "ignoring stored highscore that is not a score"),
            },
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to read highscore"),
        }
        self.current()
    }

    /// Persists `score` when it beats the known highscore. Returns whether it did.
    pub fn save(&mut self, score: u32) -> bool {
        if score <= self.current() {
            return false;
        }
        match self.store.set(HIGHSCORE_KEY, Value::from(score)) {
            Ok(()) => {
                info!(score, "new highscore");
                self.highscore = Some(score);
                true
            }
            Err(err) => {
                warn!(error = %err, score, "failed to save highscore");
                false
            }
        }
    }

    /// Highscore as last loaded or saved; `None` when never set.
    pub fn highscore(&self) -> Option<u32> {
        self.highscore
    }

    fn current(&self) -> u32 {
        self.highscore.unwrap_or(0)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn parse_score(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|score| u32::try_from(score).ok())
}
