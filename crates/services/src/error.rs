//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use trainer_core::model::SettingsError;

/// Errors emitted by `TrainerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainerError {
    #[error("catalog is empty, nothing to schedule")]
    EmptyCatalog,
    #[error("unknown drill: {0}")]
    UnknownDrill(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
