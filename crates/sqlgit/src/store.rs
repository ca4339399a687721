//! Snapshot file storage.
//!
//! The saved schema lives in one pretty-printed JSON file (`schema` in the
//! working directory by default). The file wraps the snapshot in a small
//! versioned envelope recording which database it came from and when.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlgit_core::{Snapshot, SnapshotStore};
use tracing::{debug, info};

/// Current snapshot file format version.
pub const FORMAT_VERSION: u32 = 1;

/// Default snapshot file name.
pub const DEFAULT_SCHEMA_FILE: &str = "schema";

/// Errors from reading or writing snapshot files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error on the snapshot file.
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The file is not a valid snapshot document.
    #[error("Failed to parse snapshot file '{}': {source}", path.display())]
    Serialization {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The file was written by an incompatible version.
    #[error(
        "Snapshot file '{}' has format version {found}, expected {}",
        path.display(),
        FORMAT_VERSION
    )]
    UnsupportedVersion {
        /// File being parsed.
        path: PathBuf,
        /// Version found in the file.
        found: u32,
    },
}

/// On-disk form of a saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// File format version.
    pub format_version: u32,
    /// Database the snapshot was taken from.
    pub database: String,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// The schema itself.
    pub tables: Snapshot,
}

impl SnapshotFile {
    /// Wraps a snapshot taken now.
    #[must_use]
    pub fn new(database: impl Into<String>, tables: Snapshot) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            database: database.into(),
            saved_at: Utc::now(),
            tables,
        }
    }

    /// Suffix used for the history copy of this file.
    #[must_use]
    pub fn history_suffix(&self) -> String {
        self.saved_at.format("%Y%m%d%H%M%S").to_string()
    }
}

/// Stores snapshots as JSON files.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
    database: String,
    keep_history: bool,
}

impl JsonSnapshotStore {
    /// Creates a store writing to `path` for `database`.
    pub fn new(path: impl Into<PathBuf>, database: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            database: database.into(),
            keep_history: false,
        }
    }

    /// Keeps a timestamped copy of the previous file on every save.
    #[must_use]
    pub fn keep_history(mut self, enabled: bool) -> Self {
        self.keep_history = enabled;
        self
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole snapshot file, or `None` if it does not exist.
    pub fn load_file(&self) -> Result<Option<SnapshotFile>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot file");
                return Ok(None);
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let file: SnapshotFile =
            serde_json::from_str(&contents).map_err(|source| StoreError::Serialization {
                path: self.path.clone(),
                source,
            })?;

        if file.format_version != FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: self.path.clone(),
                found: file.format_version,
            });
        }

        Ok(Some(file))
    }

    /// Writes `file`, going through a temporary sibling so a failed write
    /// never leaves a truncated snapshot behind.
    pub fn save_file(&self, file: &SnapshotFile) -> Result<(), StoreError> {
        if self.keep_history {
            self.archive_previous()?;
        }

        let json = serde_json::to_string_pretty(file).map_err(|source| {
            StoreError::Serialization {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.sibling("tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;

        info!(
            path = %self.path.display(),
            tables = file.tables.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Copies the current file to `<path>.<saved_at>`.
    fn archive_previous(&self) -> Result<(), StoreError> {
        let Some(previous) = self.load_file()? else {
            return Ok(());
        };
        let archive = self.sibling(&previous.history_suffix());
        fs::copy(&self.path, &archive).map_err(|source| StoreError::Io {
            path: archive.clone(),
            source,
        })?;
        info!(path = %archive.display(), "Previous snapshot archived");
        Ok(())
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for JsonSnapshotStore {
    type Error = StoreError;

    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.load_file()?.map(|file| file.tables))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.save_file(&SnapshotFile::new(&self.database, snapshot.clone()))
    }
}
