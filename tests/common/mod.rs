//! Shared test helpers.
#![allow(dead_code)]

use legalrag::config::Settings;
use legalrag::domain::entities::vector_record::Metadata;
use legalrag::domain::values::store_stats::StoreBackend;
use serde_json::json;
use std::path::Path;

pub fn meta(source: &str, page: i64) -> Metadata {
    let mut m = Metadata::new();
    m.insert("source".into(), json!(source));
    m.insert("page".into(), json!(page));
    m
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn settings_in(dir: &Path, backend: StoreBackend) -> Settings {
    Settings {
        data_dir: dir.to_path_buf(),
        collection_name: "test_docs".into(),
        backend,
        hash_dimension: 128,
        ..Settings::default()
    }
}
