use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::shared::errors::StorageError;
use crate::shared::types::RunRecord;

/// On-disk shape of the history file.
///
/// Stored checks stay opaque JSON: earlier runs may have been written by other
/// tools with other timestamp styles, and the recorder only ever appends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    #[serde(default)]
    pub checks: Vec<Value>,
    /// Unknown top-level keys survive a rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HistoryLog {
    /// Checks that decode as `RunRecord`, in file order
    pub fn runs(&self) -> Vec<RunRecord> {
        self.checks
            .iter()
            .filter_map(|check| serde_json::from_value(check.clone()).ok())
            .collect()
    }
}

/// Append-only JSON log of scan runs. Grows without rotation.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the log, or an empty one when the file does not exist yet
    pub fn load(&self) -> Result<HistoryLog, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HistoryLog::default()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, log: &HistoryLog) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(log).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, json).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Append one run and persist; returns the number of records now stored
    pub fn append(&self, record: RunRecord) -> Result<usize, StorageError> {
        let mut log = self.load()?;
        let record = serde_json::to_value(record).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        log.checks.push(record);
        self.save(&log)?;
        debug!("History {} now holds {} run(s)", self.path.display(), log.checks.len());
        Ok(log.checks.len())
    }
}
