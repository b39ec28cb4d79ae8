use crate::domain::entities::query_result::{QueryResult, SearchHit};
use crate::domain::entities::vector_record::{Metadata, VectorRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{validate_batch, validate_query, VectorStore};
use crate::domain::values::similarity::{cosine_distance, rank_by_similarity};
use crate::domain::values::store_stats::StoreBackend;
use crate::infrastructure::memory::snapshot::{read_snapshot, write_snapshot, StoreSnapshotRef};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Exhaustive cosine-similarity store kept as four parallel columns.
///
/// Every query is a full linear scan. Loaded eagerly from `persist_path` on
/// construction; saved only when the caller asks.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    documents: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    metadatas: Vec<Metadata>,
    ids: Vec<String>,
    persist_path: Option<PathBuf>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a snapshot file. An existing file is loaded right away; a
    /// corrupt one is logged and the store starts empty.
    pub fn with_persist_path(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            persist_path: Some(path.into()),
            ..Self::default()
        };
        store.load();
        store
    }

    fn load(&mut self) -> bool {
        let Some(path) = self.persist_path.as_deref() else {
            return false;
        };
        if !path.exists() {
            return false;
        }
        match read_snapshot(path) {
            Ok(snapshot) => {
                info!(path = %path.display(), documents = snapshot.len(), "Store loaded");
                self.documents = snapshot.documents;
                self.embeddings = snapshot.embeddings;
                self.metadatas = snapshot.metadatas;
                self.ids = snapshot.ids;
                true
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load store, starting empty");
                false
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<VectorRecord> {
        Some(VectorRecord {
            id: self.ids.get(index)?.clone(),
            document: self.documents.get(index)?.clone(),
            embedding: self.embeddings.get(index)?.clone(),
            metadata: self.metadatas.get(index)?.clone(),
        })
    }

    pub fn records(&self) -> impl Iterator<Item = VectorRecord> + '_ {
        (0..self.ids.len()).filter_map(move |i| self.get(i))
    }
}

impl VectorStore for InMemoryVectorStore {
    fn add(
        &mut self,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Vec<Metadata>,
        ids: Vec<String>,
    ) -> Result<(), DomainError> {
        validate_batch(&documents, &embeddings, &metadatas, &ids, self.dimension())?;

        let added = documents.len();
        self.documents.extend(documents);
        self.embeddings.extend(embeddings);
        self.metadatas.extend(metadatas);
        self.ids.extend(ids);

        debug!(added, total = self.documents.len(), "Added documents");
        Ok(())
    }

    fn query(&self, query_embeddings: &[Vec<f32>], n_results: usize) -> Result<QueryResult, DomainError> {
        let Some(query) = query_embeddings.first() else {
            return Ok(QueryResult::empty());
        };
        if self.embeddings.is_empty() {
            return Ok(QueryResult::empty());
        }
        validate_query(query, n_results, self.dimension())?;

        let ranked = rank_by_similarity(query, self.embeddings.iter().map(Vec::as_slice), n_results)?;
        let hits = ranked
            .into_iter()
            .map(|(i, sim)| SearchHit {
                id: self.ids[i].clone(),
                document: self.documents[i].clone(),
                metadata: self.metadatas[i].clone(),
                distance: cosine_distance(sim),
            })
            .collect();
        Ok(QueryResult::from_hits(hits))
    }

    fn count(&self) -> usize {
        self.documents.len()
    }

    fn dimension(&self) -> Option<usize> {
        self.embeddings.first().map(Vec::len)
    }

    fn clear(&mut self) -> Result<(), DomainError> {
        self.documents.clear();
        self.embeddings.clear();
        self.metadatas.clear();
        self.ids.clear();
        info!("Store cleared");
        Ok(())
    }

    fn save(&self) -> bool {
        let Some(path) = self.persist_path.as_deref() else {
            warn!("No persist path configured");
            return false;
        };
        let snapshot = StoreSnapshotRef {
            documents: &self.documents,
            embeddings: &self.embeddings,
            metadatas: &self.metadatas,
            ids: &self.ids,
        };
        match write_snapshot(path, &snapshot) {
            Ok(()) => {
                info!(path = %path.display(), documents = self.documents.len(), "Store saved");
                true
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to save store");
                false
            }
        }
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Memory
    }

    fn persist_path(&self) -> Option<&Path> {
        self.persist_path.as_deref()
    }
}
