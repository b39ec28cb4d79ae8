pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::ingest::IngestUseCase;
use crate::application::retrieve::{format_context, RetrieveUseCase};
use crate::application::store_facade::DocumentStore;
use crate::config::{EmbeddingBackend, Settings};
use crate::domain::entities::query_result::SearchHit;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::values::store_stats::StoreStats;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

pub struct LegalRag {
    store: DocumentStore,
    embedder: Arc<dyn EmbeddingProvider>,
    ingest_uc: IngestUseCase,
    retrieve_uc: RetrieveUseCase,
}

impl LegalRag {
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let embedder: Arc<dyn EmbeddingProvider> = match settings.embedding_provider {
            EmbeddingBackend::OpenAi => {
                let api_key = settings.embedding_api_key.clone().ok_or_else(|| {
                    DomainError::InvalidInput(
                        "openai provider needs LEGALRAG_EMBEDDING_API_KEY or OPENAI_API_KEY".into(),
                    )
                })?;
                Arc::new(OpenAiProvider::new(
                    api_key,
                    settings.embedding_model.clone(),
                    settings.embedding_base_url.clone(),
                ))
            }
            EmbeddingBackend::Hash => Arc::new(HashingProvider::new(settings.hash_dimension)),
        };

        Self::with_provider(settings, embedder)
    }

    pub fn with_provider(settings: &Settings, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self, DomainError> {
        let mut store = DocumentStore::new(settings);
        if !store.initialize() {
            return Err(DomainError::Persistence(format!(
                "Could not open store at {}",
                settings.persist_path().display()
            )));
        }
        Ok(Self::assemble(store, embedder, settings))
    }

    /// Wrap an already-initialised store.
    pub fn with_store(store: DocumentStore, embedder: Arc<dyn EmbeddingProvider>, settings: &Settings) -> Self {
        Self::assemble(store, embedder, settings)
    }

    fn assemble(store: DocumentStore, embedder: Arc<dyn EmbeddingProvider>, settings: &Settings) -> Self {
        let provider_dim = embedder.dimension();
        if let Some(stored_dim) = store.dimension() {
            if provider_dim > 0 && stored_dim != provider_dim {
                warn!(
                    stored_dim,
                    provider_dim,
                    provider = embedder.name(),
                    "Stored vectors do not match the embedding provider; clear and re-ingest"
                );
            }
        }

        Self {
            ingest_uc: IngestUseCase::new(embedder.clone(), settings.chunking),
            retrieve_uc: RetrieveUseCase::new(embedder.clone()),
            store,
            embedder,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedder
    }

    // Delegating methods
    pub async fn ingest_text(&mut self, text: &str, source: &str, page: Option<u32>) -> Result<usize, DomainError> {
        self.ingest_uc.ingest_document(&mut self.store, text, source, page).await
    }

    pub async fn ingest_file(&mut self, path: &Path, source: Option<&str>, page: Option<u32>) -> Result<usize, DomainError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::NotFound(format!("{}: {e}", path.display())))?;
        let default_source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let source = source.map(str::to_string).unwrap_or(default_source);
        self.ingest_text(&text, &source, page).await
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, DomainError> {
        self.retrieve_uc.execute(&self.store, query, limit).await
    }

    pub async fn context(&self, query: &str, limit: usize) -> Result<String, DomainError> {
        let hits = self.search(query, limit).await?;
        Ok(format_context(&hits))
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    pub fn clear(&mut self) -> bool {
        self.store.clear()
    }

    pub fn save(&self) -> bool {
        self.store.save()
    }
}
