use crate::domain::error::DomainError;
use std::cmp::Ordering;

/// Cosine similarity between two vectors of equal length.
///
/// Zero-magnitude input on either side yields `0.0` rather than NaN, so a
/// query never fails on a degenerate vector. Unequal lengths are an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, DomainError> {
    if a.len() != b.len() {
        return Err(DomainError::DimensionMismatch {
            expected: b.len(),
            actual: a.len(),
        });
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot / denom)
    }
}

/// Distance reported to callers: 0 for identical direction, up to 2 for opposite.
pub fn cosine_distance(similarity: f64) -> f64 {
    1.0 - similarity
}

/// Score every candidate against `query` and return `(index, similarity)`
/// pairs ordered best-first, truncated to `limit`.
///
/// The sort is stable, so equal scores keep insertion order.
pub fn rank_by_similarity<'a, I>(
    query: &[f32],
    candidates: I,
    limit: usize,
) -> Result<Vec<(usize, f64)>, DomainError>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut scored = candidates
        .into_iter()
        .enumerate()
        .map(|(idx, emb)| cosine_similarity(query, emb).map(|sim| (idx, sim)))
        .collect::<Result<Vec<_>, _>>()?;

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let sim = cosine_similarity(&[0.1, 0.2, 0.3], &[0.1, 0.2, 0.3]).unwrap();
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-9);
    }

    #[test]
    fn test_opposite_vectors_distance_two() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((cosine_distance(sim) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_invariant() {
        let a = cosine_similarity(&[1.0, 0.0], &[0.9, 0.1]).unwrap();
        let b = cosine_similarity(&[5.0, 0.0], &[9.0, 1.0]).unwrap();
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_zero_magnitude_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch_errors() {
        let err = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DimensionMismatch { expected: 2, actual: 3 }
        ));
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let stored: Vec<Vec<f32>> = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]];
        let ranked = rank_by_similarity(&[1.0, 0.0], stored.iter().map(|v| v.as_slice()), 10).unwrap();
        let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_rank_truncates() {
        let stored: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.9, 0.1]];
        let ranked = rank_by_similarity(&[1.0, 0.0], stored.iter().map(|v| v.as_slice()), 2).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, 0);
        assert_eq!(ranked[1].0, 2);
    }
}
