//! Runtime settings, read once from the environment and passed by reference.

use crate::domain::error::DomainError;
use crate::domain::values::store_stats::StoreBackend;
use crate::infrastructure::text::chunker::ChunkingConfig;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    OpenAi,
    Hash,
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingBackend::OpenAi => write!(f, "openai"),
            EmbeddingBackend::Hash => write!(f, "hash"),
        }
    }
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(EmbeddingBackend::OpenAi),
            "hash" | "hashing" | "offline" => Ok(EmbeddingBackend::Hash),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub collection_name: String,
    pub backend: StoreBackend,
    pub embedding_provider: EmbeddingBackend,
    pub embedding_api_key: Option<String>,
    pub embedding_model: Option<String>,
    pub embedding_base_url: Option<String>,
    pub hash_dimension: usize,
    pub chunking: ChunkingConfig,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/vector_store"),
            collection_name: "uae_legal_docs".to_string(),
            backend: StoreBackend::Memory,
            embedding_provider: EmbeddingBackend::Hash,
            embedding_api_key: None,
            embedding_model: None,
            embedding_base_url: None,
            hash_dimension: 384,
            chunking: ChunkingConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Settings::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("LEGALRAG_DATA_DIR") {
            s.data_dir = PathBuf::from(v);
        }
        if let Some(v) = get("LEGALRAG_COLLECTION") {
            s.collection_name = v;
        }
        if let Some(v) = get("LEGALRAG_BACKEND") {
            s.backend = v.parse().map_err(DomainError::InvalidInput)?;
        }
        if let Some(v) = get("LEGALRAG_EMBEDDING_PROVIDER") {
            s.embedding_provider = v.parse().map_err(DomainError::InvalidInput)?;
        }
        s.embedding_api_key = get("LEGALRAG_EMBEDDING_API_KEY").or_else(|| get("OPENAI_API_KEY"));
        s.embedding_model = get("LEGALRAG_EMBEDDING_MODEL");
        s.embedding_base_url = get("LEGALRAG_EMBEDDING_BASE_URL");
        if let Some(v) = get("LEGALRAG_EMBEDDING_DIMENSION") {
            s.hash_dimension = parse_number("LEGALRAG_EMBEDDING_DIMENSION", &v)?;
        }

        let chunk_size = match get("LEGALRAG_CHUNK_SIZE") {
            Some(v) => parse_number("LEGALRAG_CHUNK_SIZE", &v)?,
            None => s.chunking.chunk_size,
        };
        let overlap = match get("LEGALRAG_CHUNK_OVERLAP") {
            Some(v) => parse_number("LEGALRAG_CHUNK_OVERLAP", &v)?,
            None => s.chunking.overlap,
        };
        s.chunking = ChunkingConfig::new(chunk_size, overlap)
            .map_err(|e| DomainError::InvalidInput(e.to_string()))?;

        if let Some(v) = get("LEGALRAG_LOG_LEVEL") {
            s.log_level = v.to_lowercase();
        }
        Ok(s)
    }

    /// `<data_dir>/<collection>.<ext>` for the configured backend.
    pub fn persist_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", self.collection_name, self.backend.file_extension()))
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize, DomainError> {
    value
        .trim()
        .parse()
        .map_err(|_| DomainError::InvalidInput(format!("{key} must be a non-negative integer, got {value}")))
}
