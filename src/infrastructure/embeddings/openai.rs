use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_MODEL: &str = "text-embedding-3-small";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Embeddings over the OpenAI-compatible `/v1/embeddings` endpoint. Any
/// server speaking the same protocol works through `base_url`.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    encoding_format: &'static str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: u64,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/embeddings", self.base_url.trim_end_matches('/'))
    }

    fn model_dimension(model: &str) -> usize {
        match model {
            "text-embedding-3-large" => 3072,
            _ => 1536,
        }
    }

    /// Put vectors back in input order and check that each input got exactly one.
    fn into_ordered(mut response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>, DomainError> {
        if response.data.len() != expected {
            return Err(DomainError::Embedding(format!(
                "expected {expected} embeddings, server returned {}",
                response.data.len()
            )));
        }
        response.data.sort_by_key(|item| item.index);
        if response.data.iter().enumerate().any(|(i, item)| item.index != i) {
            return Err(DomainError::Embedding("embedding indices are not 0..n".into()));
        }
        Ok(response.data.into_iter().map(|item| item.embedding).collect())
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
                encoding_format: "float",
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("request to {} failed: {e}", self.base_url)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("{} returned {status}: {body}", self.model)));
        }

        let parsed: EmbeddingResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("embedding response: {e}")))?;
        if let Some(usage) = &parsed.usage {
            debug!(model = %self.model, inputs = texts.len(), tokens = usage.total_tokens, "Embedded batch");
        }
        Self::into_ordered(parsed, texts.len())
    }

    fn dimension(&self) -> usize {
        Self::model_dimension(&self.model)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
