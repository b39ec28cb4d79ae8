use crate::application::store_facade::DocumentStore;
use crate::domain::entities::vector_record::{Metadata, RecordBatch, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::infrastructure::text::chunker::{split_into_chunks, ChunkingConfig};
use crate::infrastructure::text::normalize::normalize_arabic;
use crate::infrastructure::text::references::extract_legal_references;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const EMBED_BATCH_SIZE: usize = 32;

pub struct IngestUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    chunking: ChunkingConfig,
}

impl IngestUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, chunking: ChunkingConfig) -> Self {
        Self { embedder, chunking }
    }

    /// Chunk one document's text, embed every chunk and add them as a single
    /// batch. Returns the number of chunks stored.
    pub async fn ingest_document(
        &self,
        store: &mut DocumentStore,
        text: &str,
        source: &str,
        page: Option<u32>,
    ) -> Result<usize, DomainError> {
        let chunks = split_into_chunks(&normalize_arabic(text), &self.chunking)?;
        let ingested_at = chrono::Utc::now().to_rfc3339();

        let pairs: Vec<(String, Metadata)> = chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let mut meta = Metadata::new();
                meta.insert("source".into(), Value::from(source));
                if let Some(page) = page {
                    meta.insert("page".into(), Value::from(page));
                }
                meta.insert("chunk_index".into(), Value::from(i));
                let refs = extract_legal_references(&chunk);
                if !refs.is_empty() {
                    meta.insert("references".into(), Value::from(refs));
                }
                meta.insert("ingested_at".into(), Value::from(ingested_at.clone()));
                (chunk, meta)
            })
            .collect();

        let ids = self.ingest_chunks(store, pairs).await?;
        info!(source, chunks = ids.len(), total = store.count(), "Document ingested");
        Ok(ids.len())
    }

    /// Embed pre-chunked `(text, metadata)` pairs and add them in one batch.
    /// Nothing is stored unless every chunk embeds.
    pub async fn ingest_chunks(
        &self,
        store: &mut DocumentStore,
        chunks: Vec<(String, Metadata)>,
    ) -> Result<Vec<String>, DomainError> {
        if chunks.is_empty() {
            return Ok(vec![]);
        }

        let texts: Vec<String> = chunks.iter().map(|(t, _)| t.clone()).collect();
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(EMBED_BATCH_SIZE) {
            let embedded = self.embedder.embed(batch, InputType::Document).await?;
            if embedded.len() != batch.len() {
                return Err(DomainError::Embedding(format!(
                    "{} returned {} vectors for {} texts",
                    self.embedder.name(),
                    embedded.len(),
                    batch.len()
                )));
            }
            vectors.extend(embedded);
        }

        let batch: RecordBatch = chunks
            .into_iter()
            .zip(vectors)
            .map(|((text, meta), emb)| VectorRecord::new(uuid::Uuid::new_v4().to_string(), text, emb, meta))
            .collect();
        let ids = batch.ids.clone();
        store.add(batch.documents, batch.embeddings, batch.metadatas, batch.ids)?;
        Ok(ids)
    }
}
