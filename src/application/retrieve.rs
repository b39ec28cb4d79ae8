use crate::application::store_facade::DocumentStore;
use crate::domain::entities::query_result::SearchHit;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::infrastructure::text::normalize::normalize_arabic;
use std::sync::Arc;

pub struct RetrieveUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl RetrieveUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    pub async fn execute(
        &self,
        store: &DocumentStore,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchHit>, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::Validation("query must not be empty".into()));
        }
        // Same normalisation as ingestion so Arabic spelling variants line up.
        let vectors = self.embedder.embed(&[normalize_arabic(query)], InputType::Query).await?;
        if vectors.is_empty() {
            return Ok(vec![]);
        }
        let result = store.query(&vectors, top_k)?;
        Ok(result.hits())
    }
}

/// Render hits as numbered context blocks for the downstream answer step.
pub fn format_context(hits: &[SearchHit]) -> String {
    let parts: Vec<String> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            let page = hit.page().map_or_else(|| "-".to_string(), |p| p.to_string());
            format!(
                "[Document {}]\nSource: {}\nPage: {}\nRelevance: {:.2}%\n\n{}\n",
                i + 1,
                hit.source().unwrap_or("unknown"),
                page,
                hit.relevance() * 100.0,
                hit.document
            )
        })
        .collect();
    format!("\n{}{}", "=".repeat(70), parts.join("\n"))
}
