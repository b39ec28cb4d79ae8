use crate::domain::entities::query_result::QueryResult;
use crate::domain::entities::vector_record::Metadata;
use crate::domain::error::DomainError;
use crate::domain::values::store_stats::StoreBackend;
use std::path::Path;

/// A store accepts (text, embedding, metadata, id) tuples and answers
/// nearest-neighbour queries. Single writer: mutations take `&mut self`.
pub trait VectorStore: Send {
    /// Append a batch. Rejected as a whole on unequal column lengths or an
    /// embedding whose length differs from the established dimension.
    fn add(
        &mut self,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Vec<Metadata>,
        ids: Vec<String>,
    ) -> Result<(), DomainError>;

    /// Rank all records against the first query vector, best first.
    fn query(&self, query_embeddings: &[Vec<f32>], n_results: usize) -> Result<QueryResult, DomainError>;

    fn count(&self) -> usize;

    /// Length of the first stored embedding, `None` while empty.
    fn dimension(&self) -> Option<usize>;

    fn clear(&mut self) -> Result<(), DomainError>;

    /// Best-effort durability. Failures are logged, never propagated.
    fn save(&self) -> bool;

    fn backend(&self) -> StoreBackend;

    fn persist_path(&self) -> Option<&Path>;
}

/// Shared batch validation run by every backend before it mutates anything.
/// Also rejects NaN and infinite components.
pub fn validate_batch(
    documents: &[String],
    embeddings: &[Vec<f32>],
    metadatas: &[Metadata],
    ids: &[String],
    established_dimension: Option<usize>,
) -> Result<(), DomainError> {
    let n = documents.len();
    if embeddings.len() != n || metadatas.len() != n || ids.len() != n {
        return Err(DomainError::Validation("all lists must have same length".into()));
    }

    let expected = match established_dimension.or_else(|| embeddings.first().map(Vec::len)) {
        Some(d) => d,
        None => return Ok(()),
    };
    if let Some(bad) = embeddings.iter().find(|e| e.len() != expected) {
        return Err(DomainError::DimensionMismatch {
            expected,
            actual: bad.len(),
        });
    }
    // Snapshots are JSON, which cannot encode NaN or infinity.
    if let Some(row) = embeddings.iter().position(|e| e.iter().any(|x| !x.is_finite())) {
        return Err(DomainError::Validation(format!(
            "embedding {row} contains a non-finite value"
        )));
    }
    Ok(())
}

/// Rejects a zero result count and a query whose length disagrees with the store.
pub fn validate_query(
    query: &[f32],
    n_results: usize,
    established_dimension: Option<usize>,
) -> Result<(), DomainError> {
    if n_results == 0 {
        return Err(DomainError::Validation("n_results must be at least 1".into()));
    }
    match established_dimension {
        Some(expected) if expected != query.len() => Err(DomainError::DimensionMismatch {
            expected,
            actual: query.len(),
        }),
        _ => Ok(()),
    }
}
