//! On-disk form of the in-memory store: one JSON document holding the four
//! parallel columns.

use crate::domain::entities::vector_record::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::validate_batch;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub documents: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub metadatas: Vec<Metadata>,
    pub ids: Vec<String>,
}

impl StoreSnapshot {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// A decoded file must satisfy the same invariants as a live store.
    fn validate(&self) -> Result<(), DomainError> {
        validate_batch(&self.documents, &self.embeddings, &self.metadatas, &self.ids, None)
            .map_err(|e| DomainError::Persistence(format!("Snapshot violates store invariants: {e}")))
    }
}

/// Read and validate a snapshot.
pub fn read_snapshot(path: &Path) -> Result<StoreSnapshot, DomainError> {
    let file = fs::File::open(path)
        .map_err(|e| DomainError::Persistence(format!("Cannot open {}: {e}", path.display())))?;
    let snapshot: StoreSnapshot = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| DomainError::Persistence(format!("Cannot decode {}: {e}", path.display())))?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Write to a temp file beside `path`, then rename over it, so a crash
/// mid-write leaves the previous snapshot intact.
pub fn write_snapshot(path: &Path, snapshot: &StoreSnapshotRef<'_>) -> Result<(), DomainError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|e| DomainError::Persistence(format!("Cannot create {}: {e}", dir.display())))?;

    let tmp = NamedTempFile::new_in(dir)
        .map_err(|e| DomainError::Persistence(format!("Cannot create temp file: {e}")))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer(&mut writer, snapshot)
            .map_err(|e| DomainError::Persistence(format!("Cannot encode snapshot: {e}")))?;
        writer
            .flush()
            .map_err(|e| DomainError::Persistence(format!("Cannot write snapshot: {e}")))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| DomainError::Persistence(format!("Cannot sync snapshot: {e}")))?;
    tmp.persist(path)
        .map_err(|e| DomainError::Persistence(format!("Cannot replace {}: {}", path.display(), e.error)))?;
    Ok(())
}

/// Borrowed view used for saving without cloning the columns.
#[derive(Debug, Serialize)]
pub struct StoreSnapshotRef<'a> {
    pub documents: &'a [String],
    pub embeddings: &'a [Vec<f32>],
    pub metadatas: &'a [Metadata],
    pub ids: &'a [String],
}
