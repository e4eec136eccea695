use async_trait::async_trait;

use trainer_core::model::Progress;

use super::{JsonStorage, read_document, write_document};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for JsonStorage {
    async fn load(&self) -> Result<Option<Progress>, StorageError> {
        read_document(&self.progress_path())
    }

    async fn save(&self, progress: &Progress) -> Result<(), StorageError> {
        write_document(&self.progress_path(), progress)
    }
}
