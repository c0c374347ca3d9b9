//! Win-tally persistence.
//!
//! The tally survives process restarts as a single text record of two
//! whitespace-separated counts, `<human_wins> <computer_wins>`, in a file
//! named [`SCORE_FILE`] by default. Reading never fails: a missing or
//! malformed record is a zero tally. Writing can fail and the caller
//! decides whether that matters; for score display it does not.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Side;

/// Default score file name, resolved against the working directory.
pub const SCORE_FILE: &str = "score.txt";

/// Cumulative win counts across rounds and restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreTally {
    pub human_wins: u32,
    pub computer_wins: u32,
}

impl ScoreTally {
    /// Create a tally from explicit counts.
    #[must_use]
    pub const fn new(human_wins: u32, computer_wins: u32) -> Self {
        Self {
            human_wins,
            computer_wins,
        }
    }

    /// Credit one win to `winner`. Draws credit nobody.
    pub fn credit(&mut self, winner: Side) {
        match winner {
            Side::Human => self.human_wins += 1,
            Side::Computer => self.computer_wins += 1,
        }
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.human_wins, self.computer_wins)
    }
}

/// Persistence failure while writing the tally.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("could not write score record: {0}")]
    Write(#[from] std::io::Error),
}

/// Tally storage.
///
/// `load` is infallible by contract: any unreadable record degrades to
/// the zero tally so a damaged file never blocks play.
pub trait ScoreStore {
    /// Read the persisted tally, or `(0, 0)` if none is readable.
    fn load(&self) -> ScoreTally;

    /// Overwrite the persisted tally with `tally`.
    ///
    /// # Errors
    ///
    /// [`ScoreError`] on I/O failure. The record is written in one call;
    /// a crash mid-write can lose the latest update, which is accepted
    /// for a display-only counter.
    fn save(&mut self, tally: ScoreTally) -> Result<(), ScoreError>;
}

/// File-backed store using the plain-text record format.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    /// Store the record at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The record's location.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Default for FileScoreStore {
    /// [`SCORE_FILE`] in the working directory.
    fn default() -> Self {
        Self::new(SCORE_FILE)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> ScoreTally {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_record(&text).unwrap_or_else(|| {
                log::warn!(
                    "malformed score record in {}, starting from zero",
                    self.path.display()
                );
                ScoreTally::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => ScoreTally::default(),
            Err(err) => {
                log::warn!("could not read {}: {err}", self.path.display());
                ScoreTally::default()
            }
        }
    }

    fn save(&mut self, tally: ScoreTally) -> Result<(), ScoreError> {
        fs::write(
            &self.path,
            format!("{} {}", tally.human_wins, tally.computer_wins),
        )?;
        Ok(())
    }
}

/// Two whitespace-separated counts. Trailing content is ignored, matching
/// a hand-edited file with a stray newline.
fn parse_record(text: &str) -> Option<ScoreTally> {
    let mut fields = text.split_whitespace();
    let human_wins = fields.next()?.parse().ok()?;
    let computer_wins = fields.next()?.parse().ok()?;
    Some(ScoreTally::new(human_wins, computer_wins))
}

/// In-memory store for tests and frontends that opt out of persistence.
///
/// Clones share one record, so a test can keep a handle to the store it
/// moved into a session and watch the saves arrive.
#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    record: Arc<Mutex<Option<ScoreTally>>>,
}

impl MemoryScoreStore {
    /// Creates a store with no record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a record.
    #[must_use]
    pub fn with_record(tally: ScoreTally) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(tally))),
        }
    }

    /// The last saved record, if any.
    #[must_use]
    pub fn record(&self) -> Option<ScoreTally> {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ScoreTally>> {
        self.record.lock().expect("score store mutex poisoned")
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> ScoreTally {
        self.lock().unwrap_or_default()
    }

    fn save(&mut self, tally: ScoreTally) -> Result<(), ScoreError> {
        *self.lock() = Some(tally);
        Ok(())
    }
}
