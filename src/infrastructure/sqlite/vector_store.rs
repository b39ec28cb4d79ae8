use crate::domain::entities::query_result::{QueryResult, SearchHit};
use crate::domain::entities::vector_record::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::{validate_batch, validate_query, VectorStore};
use crate::domain::values::similarity::{cosine_distance, rank_by_similarity};
use crate::domain::values::store_stats::StoreBackend;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Same contract as the in-memory store, with every add committed to SQLite.
/// Search is still an exhaustive scan over all rows in insertion order.
pub struct SqliteVectorStore {
    conn: Connection,
    path: Option<PathBuf>,
    count: usize,
    dimension: Option<usize>,
}

impl SqliteVectorStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| DomainError::Persistence(format!("Cannot create {}: {e}", parent.display())))?;
        }
        let conn = Connection::open(&path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        Self::new(conn, Some(path))
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        Self::new(conn, None)
    }

    fn new(conn: Connection, path: Option<PathBuf>) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))?;
        let first: Option<Vec<u8>> = conn
            .query_row("SELECT embedding FROM records ORDER BY seq LIMIT 1", [], |r| r.get(0))
            .optional()?;
        let dimension = first.map(|blob| blob.len() / 4);
        if let Some(p) = &path {
            info!(path = %p.display(), documents = count, "SQLite store opened");
        }
        Ok(Self {
            conn,
            path,
            count: count as usize,
            dimension,
        })
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes.chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn load_all(&self) -> Result<Vec<(String, String, Vec<f32>, Metadata)>, DomainError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, document, embedding, metadata FROM records ORDER BY seq")?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let document: String = row.get(1)?;
            let blob: Vec<u8> = row.get(2)?;
            let metadata: String = row.get(3)?;
            Ok((id, document, blob, metadata))
        })?;

        let mut out = Vec::with_capacity(self.count);
        for row in rows {
            let (id, document, blob, metadata) = row?;
            let metadata: Metadata = serde_json::from_str(&metadata)
                .map_err(|e| DomainError::Parse(format!("Bad metadata for {id}: {e}")))?;
            out.push((id, document, Self::deserialize_vector(&blob), metadata));
        }
        Ok(out)
    }
}

impl VectorStore for SqliteVectorStore {
    fn add(
        &mut self,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Vec<Metadata>,
        ids: Vec<String>,
    ) -> Result<(), DomainError> {
        validate_batch(&documents, &embeddings, &metadatas, &ids, self.dimension)?;
        if documents.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO records (id, document, embedding, metadata) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (((doc, emb), meta), id) in documents.iter().zip(&embeddings).zip(&metadatas).zip(&ids) {
                let meta = serde_json::to_string(meta)
                    .map_err(|e| DomainError::Parse(format!("Cannot encode metadata: {e}")))?;
                stmt.execute(params![id, doc, Self::serialize_vector(emb), meta])
                    .map_err(|e| DomainError::Database(format!("Failed to store record: {e}")))?;
            }
        }
        tx.commit()?;

        if self.dimension.is_none() {
            self.dimension = embeddings.first().map(Vec::len);
        }
        self.count += documents.len();
        debug!(added = documents.len(), total = self.count, "Added documents");
        Ok(())
    }

    fn query(&self, query_embeddings: &[Vec<f32>], n_results: usize) -> Result<QueryResult, DomainError> {
        let Some(query) = query_embeddings.first() else {
            return Ok(QueryResult::empty());
        };
        if self.count == 0 {
            return Ok(QueryResult::empty());
        }
        validate_query(query, n_results, self.dimension)?;

        let rows = self.load_all()?;
        let ranked = rank_by_similarity(query, rows.iter().map(|r| r.2.as_slice()), n_results)?;
        let hits = ranked
            .into_iter()
            .map(|(i, sim)| {
                let (id, document, _, metadata) = &rows[i];
                SearchHit {
                    id: id.clone(),
                    document: document.clone(),
                    metadata: metadata.clone(),
                    distance: cosine_distance(sim),
                }
            })
            .collect();
        Ok(QueryResult::from_hits(hits))
    }

    fn count(&self) -> usize {
        self.count
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn clear(&mut self) -> Result<(), DomainError> {
        self.conn.execute("DELETE FROM records", [])?;
        self.count = 0;
        self.dimension = None;
        info!("Store cleared");
        Ok(())
    }

    fn save(&self) -> bool {
        // Every add commits its own transaction.
        true
    }

    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }

    fn persist_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
