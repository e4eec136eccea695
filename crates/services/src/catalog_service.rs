use std::sync::Arc;

use tracing::{info, warn};

use storage::repository::{CatalogSource, StorageError};
use trainer_core::model::Catalog;

/// Loads the drill catalog once at process start.
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
}

impl CatalogService {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Read the catalog from its source.
    ///
    /// A missing or malformed source yields an empty catalog; the caller
    /// decides whether an empty catalog is fatal. No retries.
    pub async fn load(&self) -> Catalog {
        match self.source.load().await {
            Ok(drills) => {
                info!(count = drills.len(), "catalog loaded");
                Catalog::new(drills)
            }
            Err(StorageError::NotFound) => {
                warn!("catalog source missing, starting with no drills");
                Catalog::default()
            }
            Err(err) => {
                warn!(error = %err, "catalog source unreadable, starting with no drills");
                Catalog::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use trainer_core::model::{Drill, DrillId};

    fn build_drill(name: &str) -> Drill {
        Drill {
            name: DrillId::new(name),
            description: String::new(),
            example: String::new(),
            category: String::new(),
            difficulty: String::new(),
            flags: String::new(),
            output_example: String::new(),
            analysis: String::new(),
        }
    }

    #[tokio::test]
    async fn loads_seeded_catalog() {
        let repo = InMemoryRepository::new();
        repo.set_catalog(vec![build_drill("ls"), build_drill("grep")]);

        let catalog = CatalogService::new(Arc::new(repo)).load().await;
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn empty_source_yields_empty_catalog() {
        let repo = InMemoryRepository::new();
        let catalog = CatalogService::new(Arc::new(repo)).load().await;
        assert!(catalog.is_empty());
    }
}
