use crate::config::Settings;
use crate::domain::entities::query_result::QueryResult;
use crate::domain::entities::vector_record::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::store_stats::{StoreBackend, StoreStats};
use crate::infrastructure::memory::store::InMemoryVectorStore;
use crate::infrastructure::sqlite::vector_store::SqliteVectorStore;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Lifecycle wrapper that ingestion and query code talk to. The backing store
/// is chosen by settings and can be swapped without touching callers.
pub struct DocumentStore {
    collection_name: String,
    backend: StoreBackend,
    /// Where `initialize` rebuilds from. `None` for an attached store that
    /// has no file behind it.
    persist_path: Option<PathBuf>,
    inner: Option<Box<dyn VectorStore>>,
}

impl DocumentStore {
    pub fn new(settings: &Settings) -> Self {
        Self {
            collection_name: settings.collection_name.clone(),
            backend: settings.backend,
            persist_path: Some(settings.persist_path()),
            inner: None,
        }
    }

    /// Attach an already-built backend, e.g. an in-memory SQLite store in tests.
    pub fn with_store(collection_name: impl Into<String>, store: Box<dyn VectorStore>) -> Self {
        Self {
            collection_name: collection_name.into(),
            backend: store.backend(),
            persist_path: store.persist_path().map(PathBuf::from),
            inner: Some(store),
        }
    }

    /// Build (or rebuild) the backing store. Re-initialising reloads from disk;
    /// an attached store without a file is kept as is.
    pub fn initialize(&mut self) -> bool {
        let Some(path) = self.persist_path.clone() else {
            return match &self.inner {
                Some(store) => {
                    info!(
                        collection = %self.collection_name,
                        documents = store.count(),
                        "Store has no persist path, keeping attached backend"
                    );
                    true
                }
                None => {
                    error!(collection = %self.collection_name, "No persist path to initialize from");
                    false
                }
            };
        };
        let built: Result<Box<dyn VectorStore>, DomainError> = match self.backend {
            StoreBackend::Memory => {
                Ok(Box::new(InMemoryVectorStore::with_persist_path(path)) as Box<dyn VectorStore>)
            }
            StoreBackend::Sqlite => SqliteVectorStore::open(path).map(|s| Box::new(s) as Box<dyn VectorStore>),
        };
        match built {
            Ok(store) => {
                info!(
                    collection = %self.collection_name,
                    backend = %self.backend,
                    documents = store.count(),
                    "Vector store initialized"
                );
                self.inner = Some(store);
                true
            }
            Err(e) => {
                error!(collection = %self.collection_name, error = %e, "Failed to initialize store");
                false
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.is_some()
    }

    pub fn add(
        &mut self,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Vec<Metadata>,
        ids: Vec<String>,
    ) -> Result<(), DomainError> {
        self.inner
            .as_mut()
            .ok_or(DomainError::NotInitialized)?
            .add(documents, embeddings, metadatas, ids)
    }

    /// Insert one record, generating a UUID when `id` is absent. Returns the
    /// stored id, or `None` after logging the failure.
    pub fn add_one(
        &mut self,
        text: impl Into<String>,
        embedding: Vec<f32>,
        metadata: Option<Metadata>,
        id: Option<String>,
    ) -> Option<String> {
        let id = id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        match self.add(vec![text.into()], vec![embedding], vec![metadata.unwrap_or_default()], vec![id.clone()]) {
            Ok(()) => Some(id),
            Err(e) => {
                error!(id = %id, error = %e, "Failed to add document");
                None
            }
        }
    }

    pub fn query(&self, query_embeddings: &[Vec<f32>], n_results: usize) -> Result<QueryResult, DomainError> {
        match &self.inner {
            Some(store) => store.query(query_embeddings, n_results),
            None => {
                warn!("Query on uninitialized store");
                Ok(QueryResult::empty())
            }
        }
    }

    pub fn count(&self) -> usize {
        self.inner.as_ref().map_or(0, |s| s.count())
    }

    pub fn dimension(&self) -> Option<usize> {
        self.inner.as_ref().and_then(|s| s.dimension())
    }

    pub fn clear(&mut self) -> bool {
        let Some(store) = self.inner.as_mut() else {
            return false;
        };
        match store.clear() {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to clear collection");
                false
            }
        }
    }

    pub fn save(&self) -> bool {
        match &self.inner {
            Some(store) => store.save(),
            None => {
                warn!("Save on uninitialized store");
                false
            }
        }
    }

    pub fn stats(&self) -> StoreStats {
        match &self.inner {
            Some(store) => StoreStats {
                collection_name: self.collection_name.clone(),
                document_count: store.count(),
                embedding_dimension: store.dimension().unwrap_or(0),
                mode: store.backend().mode().to_string(),
                persist_path: store.persist_path().map(|p| p.display().to_string()),
            },
            None => StoreStats {
                collection_name: self.collection_name.clone(),
                document_count: 0,
                embedding_dimension: 0,
                mode: "uninitialized".to_string(),
                persist_path: None,
            },
        }
    }
}
