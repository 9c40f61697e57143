// src/infrastructure/di/service_container.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::tagged_asset_service::TaggedAssetService;
use crate::application::TaggedAssetServiceImpl;
use crate::config::Settings;
use crate::domain::repositories::document_store::DocumentStore;
use crate::domain::repositories::object_store::ObjectStore;
use crate::infrastructure::documents::JsonDocumentStore;
use crate::infrastructure::storage::FsObjectStore;
use std::sync::Arc;
use tracing::debug;

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    // Backends
    pub object_store: Arc<dyn ObjectStore>,
    pub document_store: Arc<dyn DocumentStore>,

    // Application services
    pub tagged_asset_service: Arc<dyn TaggedAssetService>,
}

impl ServiceContainer {
    /// Create all services with explicit dependency injection
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let object_store = Self::create_object_store(config)?;
        let document_store = Self::create_document_store(config);
        Ok(Self::with_backends(config, object_store, document_store))
    }

    /// Wire the application services on top of existing backends
    pub fn with_backends(
        config: &Settings,
        object_store: Arc<dyn ObjectStore>,
        document_store: Arc<dyn DocumentStore>,
    ) -> Self {
        let tagged_asset_service = Arc::new(TaggedAssetServiceImpl::new(
            object_store.clone(),
            document_store.clone(),
            config.bucket.clone(),
            config.limits,
        ));

        Self {
            object_store,
            document_store,
            tagged_asset_service,
        }
    }

    fn create_object_store(config: &Settings) -> ApplicationResult<Arc<dyn ObjectStore>> {
        let root = config.storage_root_path();
        debug!("Object storage at {} served from {}", root.display(), config.public_base_url);
        let store = FsObjectStore::new(root, &config.public_base_url).map_err(|e| {
            ApplicationError::Other(format!("Failed to create object store: {}", e))
        })?;
        Ok(Arc::new(store))
    }

    fn create_document_store(config: &Settings) -> Arc<dyn DocumentStore> {
        Arc::new(JsonDocumentStore::new(config.documents_file()))
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("object_store", &self.object_store)
            .field("document_store", &self.document_store)
            .field("tagged_asset_service", &"Arc<dyn TaggedAssetService>")
            .finish()
    }
}
