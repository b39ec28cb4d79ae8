use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which implementation backs a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

impl StoreBackend {
    /// Human-readable descriptor surfaced in stats.
    pub fn mode(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "in-memory (exhaustive cosine)",
            StoreBackend::Sqlite => "sqlite (exhaustive cosine)",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "json",
            StoreBackend::Sqlite => "sqlite3",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            _ => Err(format!("Unknown store backend: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub collection_name: String,
    pub document_count: usize,
    pub embedding_dimension: usize,
    pub mode: String,
    pub persist_path: Option<String>,
}
