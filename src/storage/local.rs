//! Local filesystem dataset source.
//!
//! Reads one JSON array per entity from the data directory. A missing file is
//! an empty collection; a malformed one is an error naming the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{DataConfig, Dataset};
use crate::storage::DatasetStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    files: DataConfig,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory with default file names.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self::with_files(root_dir, DataConfig::default())
    }

    /// Create a LocalStorage with configured file names.
    pub fn with_files(root_dir: impl Into<PathBuf>, files: DataConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            files,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Read bytes, returning None if file doesn't exist.
    fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read a JSON array, treating a missing file as empty.
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.read_bytes(key)? {
            Some(bytes) => {
                let items: Vec<T> = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::dataset(key, e))?;
                log::debug!("Read {} record(s) from {}", items.len(), key);
                Ok(items)
            }
            None => {
                log::warn!(
                    "Dataset file {} not found, using an empty collection",
                    self.path(key).display()
                );
                Ok(Vec::new())
            }
        }
    }
}

impl DatasetStorage for LocalStorage {
    fn load_dataset(&self) -> Result<Dataset> {
        let dataset = Dataset {
            students: self.read_collection(&self.files.students)?,
            faculty: self.read_collection(&self.files.faculty)?,
            news: self.read_collection(&self.files.news)?,
            timetable: self.read_collection(&self.files.timetable)?,
            rooms: self.read_collection(&self.files.rooms)?,
        };

        log::info!(
            "Loaded dataset from {}: {}",
            self.root_dir.display(),
            dataset
                .counts()
                .iter()
                .map(|(entity, n)| format!("{n} {entity}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(dataset)
    }

    fn location(&self) -> String {
        self.root_dir.display().to_string()
    }
}
