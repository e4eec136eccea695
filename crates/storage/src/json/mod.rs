use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{CatalogSource, ProgressRepository, SettingsRepository, Storage, StorageError};

mod catalog_source;
mod progress_repo;
mod settings_repo;

/// File names within the data directory, matching the historical layout.
const CATALOG_FILE: &str = "commands.json";
const SETTINGS_FILE: &str = "trainer_settings.json";
const PROGRESS_FILE: &str = "trainer_data.json";

/// Whole-file JSON store rooted at a data directory.
///
/// Each record is a single document rewritten in full on save; writes go
/// through a temp file and rename so readers never observe a torn file.
#[derive(Clone)]
pub struct JsonStorage {
    dir: PathBuf,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JsonInitError {
    #[error("failed to prepare data directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JsonStorage {
    /// Open (creating if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns `JsonInitError` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, JsonInitError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| JsonInitError::CreateDir {
            dir: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn catalog_path(&self) -> PathBuf {
        self.dir.join(CATALOG_FILE)
    }

    pub(crate) fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub(crate) fn progress_path(&self) -> PathBuf {
        self.dir.join(PROGRESS_FILE)
    }
}

/// Read a whole-file JSON document. Missing file is `Ok(None)`.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StorageError::Io(err.to_string())),
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Overwrite a whole-file JSON document atomically: serialize, write to a
/// sibling temp file, rename over the target.
pub(crate) fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(value)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, raw).map_err(|err| StorageError::Io(err.to_string()))?;
    fs::rename(&tmp, path).map_err(|err| StorageError::Io(err.to_string()))?;
    Ok(())
}

impl Storage {
    /// Build a `Storage` backed by whole-file JSON documents under `dir`.
    ///
    /// # Errors
    ///
    /// Returns `JsonInitError` if the data directory cannot be prepared.
    pub fn json_dir(dir: impl Into<PathBuf>) -> Result<Self, JsonInitError> {
        let store = JsonStorage::open(dir)?;
        let catalog: Arc<dyn CatalogSource> = Arc::new(store.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(store.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(store);
        Ok(Self {
            catalog,
            settings,
            progress,
        })
    }
}
