use async_trait::async_trait;
use serde::Deserialize;

use trainer_core::model::Drill;

use super::{JsonStorage, read_document};
use crate::repository::{CatalogSource, StorageError};

/// On-disk catalog layout: a single object with a `commands` list.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    commands: Vec<Drill>,
}

#[async_trait]
impl CatalogSource for JsonStorage {
    async fn load(&self) -> Result<Vec<Drill>, StorageError> {
        let document: Option<CatalogDocument> = read_document(&self.catalog_path())?;
        match document {
            Some(document) => Ok(document.commands),
            None => Err(StorageError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_document_defaults_to_empty_list() {
        let document: CatalogDocument = serde_json::from_str("{}").unwrap();
        assert!(document.commands.is_empty());
    }

    #[test]
    fn catalog_document_parses_drills() {
        let raw = r#"{
            "commands": [{
                "command": "ls",
                "description": "list directory contents",
                "example": "ls -la",
                "category": "files",
                "difficulty": "easy",
                "flags": "-l -a",
                "output_example": "total 8",
                "analysis": "start here"
            }]
        }"#;
        let document: CatalogDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(document.commands.len(), 1);
        assert_eq!(document.commands[0].id().as_str(), "ls");
    }
}
