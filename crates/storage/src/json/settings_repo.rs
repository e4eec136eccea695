use async_trait::async_trait;

use trainer_core::model::{Settings, SettingsPatch};

use super::{JsonStorage, read_document, write_document};
use crate::repository::{SettingsRepository, StorageError};

#[async_trait]
impl SettingsRepository for JsonStorage {
    async fn load(&self) -> Result<Option<SettingsPatch>, StorageError> {
        read_document(&self.settings_path())
    }

    async fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        write_document(&self.settings_path(), settings)
    }
}
