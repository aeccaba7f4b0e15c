use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::MAX_HIGH_SCORES;
use crate::error::StoreError;

const APP_DIR_NAME: &str = "neon-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Key under which the ranking is stored.
pub const HIGH_SCORES_KEY: &str = "highScores";

/// One finished game in the ranking.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    pub date: String,
}

impl ScoreEntry {
    #[must_use]
    pub fn new(score: u32, date: impl Into<String>) -> Self {
        Self {
            score,
            date: date.into(),
        }
    }
}

/// Top scores, best first, never longer than [`MAX_HIGH_SCORES`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Builds a ranking from arbitrary entries, sorting and truncating them.
    #[must_use]
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        normalize(&mut entries);
        Self { entries }
    }

    /// Adds a finished game. Ties keep the earlier entry first.
    pub fn record(&mut self, entry: ScoreEntry) {
        self.entries.push(entry);
        normalize(&mut self.entries);
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Best recorded score, or 0 when nothing has been recorded.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |entry| entry.score)
    }
}

fn normalize(entries: &mut Vec<ScoreEntry>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGH_SCORES);
}

/// Key-value backing for the ranking.
pub trait ScoreStore {
    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError>;
    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError>;
}

/// Keeps the ranking in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<ScoreEntry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.values.get(HIGH_SCORES_KEY).cloned().unwrap_or_default())
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        self.values
            .insert(HIGH_SCORES_KEY.to_owned(), entries.to_vec());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(rename = "highScores", default)]
    high_scores: Vec<ScoreEntry>,
}

/// JSON file holding `{"highScores": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at the platform-correct data location.
    #[must_use]
    pub fn open_default() -> Self {
        Self::at(scores_path())
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    /// A missing file is a first run and loads as an empty ranking.
    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        let file: ScoreFile = serde_json::from_str(&raw)?;
        Ok(file.high_scores)
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = ScoreFile {
            high_scores: entries.to_vec(),
        };
        let json = serde_json::to_string_pretty(&payload)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Returns the platform-correct application data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    data_dir().join(SCORE_FILE_NAME)
}
