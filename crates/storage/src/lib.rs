#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{JsonInitError, JsonStorage};
pub use repository::{
    CatalogSource, InMemoryRepository, ProgressRepository, SettingsRepository, Storage,
    StorageError,
};
