use serde::{Deserialize, Serialize};

/// Opaque per-record metadata. Never interpreted by a store.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One stored record. Stores keep these as parallel columns; this is the
/// row view handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub document: String,
    pub embedding: Vec<f32>,
    pub metadata: Metadata,
}

impl VectorRecord {
    pub fn new(
        id: impl Into<String>,
        document: impl Into<String>,
        embedding: Vec<f32>,
        metadata: Metadata,
    ) -> Self {
        Self {
            id: id.into(),
            document: document.into(),
            embedding,
            metadata,
        }
    }
}

/// Column-oriented batch, the unit `add` works on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    pub documents: Vec<String>,
    pub embeddings: Vec<Vec<f32>>,
    pub metadatas: Vec<Metadata>,
    pub ids: Vec<String>,
}

impl RecordBatch {
    pub fn push(&mut self, record: VectorRecord) {
        self.documents.push(record.document);
        self.embeddings.push(record.embedding);
        self.metadatas.push(record.metadata);
        self.ids.push(record.id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<VectorRecord> for RecordBatch {
    fn from_iter<I: IntoIterator<Item = VectorRecord>>(iter: I) -> Self {
        let mut batch = RecordBatch::default();
        for record in iter {
            batch.push(record);
        }
        batch
    }
}
