use crate::domain::entities::vector_record::Metadata;
use serde::{Deserialize, Serialize};

/// Nearest-neighbour answer. Each field is wrapped one level deeper than the
/// hits it holds: the outer list has one entry per query, and only one query
/// is ever answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub ids: Vec<Vec<String>>,
    pub documents: Vec<Vec<String>>,
    pub metadatas: Vec<Vec<Metadata>>,
    pub distances: Vec<Vec<f64>>,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self {
            ids: vec![vec![]],
            documents: vec![vec![]],
            metadatas: vec![vec![]],
            distances: vec![vec![]],
        }
    }

    pub fn from_hits(hits: Vec<SearchHit>) -> Self {
        let mut ids = Vec::with_capacity(hits.len());
        let mut documents = Vec::with_capacity(hits.len());
        let mut metadatas = Vec::with_capacity(hits.len());
        let mut distances = Vec::with_capacity(hits.len());
        for hit in hits {
            ids.push(hit.id);
            documents.push(hit.document);
            metadatas.push(hit.metadata);
            distances.push(hit.distance);
        }
        Self {
            ids: vec![ids],
            documents: vec![documents],
            metadatas: vec![metadatas],
            distances: vec![distances],
        }
    }

    /// Number of hits for the (single) query.
    pub fn len(&self) -> usize {
        self.ids.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten the first query's columns into row-shaped hits.
    pub fn hits(&self) -> Vec<SearchHit> {
        let (Some(ids), Some(docs), Some(metas), Some(dists)) = (
            self.ids.first(),
            self.documents.first(),
            self.metadatas.first(),
            self.distances.first(),
        ) else {
            return vec![];
        };

        ids.iter()
            .zip(docs)
            .zip(metas)
            .zip(dists)
            .map(|(((id, document), metadata), distance)| SearchHit {
                id: id.clone(),
                document: document.clone(),
                metadata: metadata.clone(),
                distance: *distance,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub document: String,
    pub metadata: Metadata,
    pub distance: f64,
}

impl SearchHit {
    /// Cosine similarity recovered from the distance.
    pub fn relevance(&self) -> f64 {
        1.0 - self.distance
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").and_then(|v| v.as_str())
    }

    pub fn page(&self) -> Option<i64> {
        self.metadata.get("page").and_then(|v| v.as_i64())
    }
}
