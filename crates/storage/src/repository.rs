use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use trainer_core::model::{Drill, Progress, Settings, SettingsPatch};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read-once source for the drill catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Read the full catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the source is missing,
    /// `Serialization` when it is malformed. Callers decide whether either
    /// is fatal.
    async fn load(&self) -> Result<Vec<Drill>, StorageError>;
}

/// Durable store for the settings override.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch the persisted override, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or parse failures.
    async fn load(&self) -> Result<Option<SettingsPatch>, StorageError>;

    /// Persist the full settings record, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, settings: &Settings) -> Result<(), StorageError>;
}

/// Durable store for training progress. Save is whole-snapshot: every call
/// rewrites the complete record.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the persisted progress, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or parse failures.
    async fn load(&self) -> Result<Option<Progress>, StorageError>;

    /// Persist the full progress snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save(&self, progress: &Progress) -> Result<(), StorageError>;
}

/// In-memory repository for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<Vec<Drill>>>,
    settings: Arc<Mutex<Option<Settings>>>,
    progress: Arc<Mutex<Option<Progress>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalog this repository serves.
    pub fn set_catalog(&self, drills: Vec<Drill>) {
        if let Ok(mut guard) = self.catalog.lock() {
            *guard = drills;
        }
    }

    /// Snapshot of the last saved settings, for assertions.
    #[must_use]
    pub fn saved_settings(&self) -> Option<Settings> {
        self.settings.lock().ok().and_then(|guard| guard.clone())
    }

    /// Snapshot of the last saved progress, for assertions.
    #[must_use]
    pub fn saved_progress(&self) -> Option<Progress> {
        self.progress.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl CatalogSource for InMemoryRepository {
    async fn load(&self) -> Result<Vec<Drill>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn load(&self) -> Result<Option<SettingsPatch>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.as_ref().map(SettingsPatch::from))
    }

    async fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load(&self) -> Result<Option<Progress>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, progress: &Progress) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(progress.clone());
        Ok(())
    }
}

/// Aggregates the stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogSource>,
    pub settings: Arc<dyn SettingsRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self::from_in_memory(repo)
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let catalog: Arc<dyn CatalogSource> = Arc::new(repo.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self {
            catalog,
            settings,
            progress,
        }
    }
}
