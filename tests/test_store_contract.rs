//! Behaviour every backend must share, run against each implementation.

mod common;

use common::{meta, strings};
use legalrag::domain::entities::query_result::QueryResult;
use legalrag::domain::error::DomainError;
use legalrag::domain::ports::vector_store::VectorStore;
use legalrag::infrastructure::memory::store::InMemoryVectorStore;
use legalrag::infrastructure::sqlite::vector_store::SqliteVectorStore;

fn backends() -> Vec<(&'static str, Box<dyn VectorStore>)> {
    vec![
        ("memory", Box::new(InMemoryVectorStore::new())),
        ("sqlite", Box::new(SqliteVectorStore::in_memory().unwrap())),
    ]
}

fn add_three(store: &mut dyn VectorStore) {
    store
        .add(
            strings(&["exact", "orthogonal", "close"]),
            vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.9, 0.1]],
            vec![meta("a.pdf", 1), meta("b.pdf", 2), meta("c.pdf", 3)],
            strings(&["id-exact", "id-orth", "id-close"]),
        )
        .unwrap();
}

#[test]
fn test_ranking_best_first() {
    for (name, mut store) in backends() {
        add_three(store.as_mut());
        let result = store.query(&[vec![1.0, 0.0]], 3).unwrap();
        assert_eq!(result.ids, vec![strings(&["id-exact", "id-close", "id-orth"])], "{name}");
        let d = &result.distances[0];
        assert!(d[0].abs() < 1e-9, "{name}");
        assert!(d[0] < d[1] && d[1] < d[2], "{name}");
        assert!((d[2] - 1.0).abs() < 1e-9, "{name}");
        assert_eq!(result.documents[0][1], "close", "{name}");
        assert_eq!(result.metadatas[0][1], meta("c.pdf", 3), "{name}");
    }
}

#[test]
fn test_cosine_normalizes_magnitude() {
    for (name, mut store) in backends() {
        store
            .add(
                strings(&["small", "large"]),
                vec![vec![0.0, 0.1], vec![10.0, 1.0]],
                vec![meta("s", 1), meta("l", 1)],
                strings(&["small", "large"]),
            )
            .unwrap();
        let result = store.query(&[vec![100.0, 0.0]], 1).unwrap();
        assert_eq!(result.ids[0], strings(&["large"]), "{name}");
    }
}

#[test]
fn test_ties_keep_insertion_order() {
    for (name, mut store) in backends() {
        store
            .add(
                strings(&["a", "b", "c"]),
                vec![vec![2.0, 0.0], vec![1.0, 0.0], vec![3.0, 0.0]],
                vec![meta("x", 1), meta("x", 2), meta("x", 3)],
                strings(&["first", "second", "third"]),
            )
            .unwrap();
        let result = store.query(&[vec![1.0, 0.0]], 3).unwrap();
        assert_eq!(result.ids[0], strings(&["first", "second", "third"]), "{name}");
    }
}

#[test]
fn test_empty_store_returns_empty_shape() {
    for (name, store) in backends() {
        for n in [1, 5, 100] {
            let result = store.query(&[vec![1.0, 0.0]], n).unwrap();
            assert_eq!(result, QueryResult::empty(), "{name}");
            assert_eq!(result.ids, vec![Vec::<String>::new()], "{name}");
        }
    }
}

#[test]
fn test_no_padding_when_fewer_records() {
    for (name, mut store) in backends() {
        store
            .add(
                strings(&["a", "b"]),
                vec![vec![1.0, 0.0], vec![0.0, 1.0]],
                vec![meta("x", 1), meta("x", 2)],
                strings(&["1", "2"]),
            )
            .unwrap();
        let result = store.query(&[vec![1.0, 1.0]], 100).unwrap();
        assert_eq!(result.len(), 2, "{name}");
        assert_eq!(result.distances[0].len(), 2, "{name}");
    }
}

#[test]
fn test_single_record_scenario() {
    for (name, mut store) in backends() {
        store
            .add(
                strings(&["Federal Law No. 5"]),
                vec![vec![0.1, 0.2, 0.3]],
                vec![meta("law5.pdf", 1)],
                strings(&["id-1"]),
            )
            .unwrap();
        assert_eq!(store.count(), 1, "{name}");

        let result = store.query(&[vec![0.1, 0.2, 0.3]], 1).unwrap();
        assert_eq!(result.ids[0], strings(&["id-1"]), "{name}");
        assert_eq!(result.documents[0], strings(&["Federal Law No. 5"]), "{name}");
        assert!(result.distances[0][0].abs() < 1e-6, "{name}");

        let err = store
            .add(
                strings(&["Second"]),
                vec![vec![0.1, 0.2]],
                vec![meta("law6.pdf", 1)],
                strings(&["id-2"]),
            )
            .unwrap_err();
        assert!(
            matches!(err, DomainError::DimensionMismatch { expected: 3, actual: 2 }),
            "{name}: {err}"
        );
        assert_eq!(store.count(), 1, "{name}");
    }
}

#[test]
fn test_mismatched_batch_rejected_whole() {
    for (name, mut store) in backends() {
        add_three(store.as_mut());
        let err = store
            .add(
                strings(&["ok", "bad"]),
                vec![vec![1.0, 1.0], vec![1.0, 1.0, 1.0]],
                vec![meta("x", 1), meta("x", 2)],
                strings(&["ok", "bad"]),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::DimensionMismatch { .. }), "{name}");
        assert_eq!(store.count(), 3, "{name}");
    }
}

#[test]
fn test_first_batch_must_agree_with_itself() {
    for (name, mut store) in backends() {
        let err = store
            .add(
                strings(&["a", "b"]),
                vec![vec![1.0, 0.0], vec![1.0]],
                vec![meta("x", 1), meta("x", 2)],
                strings(&["a", "b"]),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::DimensionMismatch { expected: 2, actual: 1 }), "{name}");
        assert_eq!(store.count(), 0, "{name}");
    }
}

#[test]
fn test_non_finite_embedding_rejected_whole() {
    for (name, mut store) in backends() {
        add_three(store.as_mut());
        let err = store
            .add(
                strings(&["ok", "nan"]),
                vec![vec![1.0, 1.0], vec![f32::NAN, 1.0]],
                vec![meta("x", 1), meta("x", 2)],
                strings(&["ok", "nan"]),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)), "{name}");
        assert_eq!(store.count(), 3, "{name}");
    }
}

#[test]
fn test_unequal_lengths_rejected() {
    for (name, mut store) in backends() {
        let err = store
            .add(
                strings(&["a", "b"]),
                vec![vec![1.0, 0.0]],
                vec![meta("x", 1), meta("x", 2)],
                strings(&["a", "b"]),
            )
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("same length"), "{name}"),
            other => panic!("{name}: unexpected {other}"),
        }
        assert_eq!(store.count(), 0, "{name}");
    }
}

#[test]
fn test_counts_track_every_successful_add() {
    for (name, mut store) in backends() {
        let mut expected = 0;
        for batch in 1..=4 {
            let docs: Vec<String> = (0..batch).map(|i| format!("doc {batch}-{i}")).collect();
            let embs: Vec<Vec<f32>> = (0..batch).map(|i| vec![i as f32, 1.0, batch as f32]).collect();
            let metas = (0..batch).map(|i| meta("x", i as i64)).collect();
            let ids: Vec<String> = (0..batch).map(|i| format!("{batch}-{i}")).collect();
            store.add(docs, embs, metas, ids).unwrap();
            expected += batch;
            assert_eq!(store.count(), expected, "{name}");
        }
        assert_eq!(store.dimension(), Some(3), "{name}");
    }
}

#[test]
fn test_query_dimension_mismatch_errors() {
    for (name, mut store) in backends() {
        add_three(store.as_mut());
        let err = store.query(&[vec![1.0, 0.0, 0.0]], 2).unwrap_err();
        assert!(matches!(err, DomainError::DimensionMismatch { expected: 2, actual: 3 }), "{name}");
    }
}

#[test]
fn test_zero_query_is_total() {
    for (name, mut store) in backends() {
        add_three(store.as_mut());
        let result = store.query(&[vec![0.0, 0.0]], 3).unwrap();
        assert_eq!(result.ids[0], strings(&["id-exact", "id-orth", "id-close"]), "{name}");
        assert!(result.distances[0].iter().all(|d| (*d - 1.0).abs() < 1e-9), "{name}");
    }
}

#[test]
fn test_only_first_query_is_used() {
    for (name, mut store) in backends() {
        add_three(store.as_mut());
        let result = store.query(&[vec![0.0, 1.0], vec![1.0, 0.0]], 1).unwrap();
        assert_eq!(result.ids.len(), 1, "{name}");
        assert_eq!(result.ids[0], strings(&["id-orth"]), "{name}");
    }
}

#[test]
fn test_zero_results_rejected() {
    for (name, mut store) in backends() {
        add_three(store.as_mut());
        assert!(matches!(store.query(&[vec![1.0, 0.0]], 0), Err(DomainError::Validation(_))), "{name}");
    }
}

#[test]
fn test_duplicate_ids_are_kept() {
    for (name, mut store) in backends() {
        store
            .add(
                strings(&["v1", "v2"]),
                vec![vec![1.0, 0.0], vec![0.0, 1.0]],
                vec![meta("x", 1), meta("x", 2)],
                strings(&["same", "same"]),
            )
            .unwrap();
        assert_eq!(store.count(), 2, "{name}");
        let result = store.query(&[vec![0.0, 1.0]], 2).unwrap();
        assert_eq!(result.documents[0], strings(&["v2", "v1"]), "{name}");
    }
}

#[test]
fn test_clear_is_idempotent() {
    for (name, mut store) in backends() {
        add_three(store.as_mut());
        store.clear().unwrap();
        assert_eq!(store.count(), 0, "{name}");
        store.clear().unwrap();
        assert_eq!(store.count(), 0, "{name}");
        assert_eq!(store.dimension(), None, "{name}");

        // A cleared store accepts a new dimension.
        store
            .add(strings(&["new"]), vec![vec![1.0, 2.0, 3.0]], vec![meta("x", 1)], strings(&["n"]))
            .unwrap();
        assert_eq!(store.count(), 1, "{name}");
        assert_eq!(store.dimension(), Some(3), "{name}");
    }
}
