use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// How far either side of a window boundary to look for a sentence end.
const SENTENCE_SEARCH_RADIUS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, DomainError> {
        if chunk_size == 0 {
            return Err(DomainError::Validation("chunk_size must be > 0".into()));
        }
        if overlap >= chunk_size {
            return Err(DomainError::Validation(format!(
                "overlap must be < chunk_size ({overlap} >= {chunk_size})"
            )));
        }
        Ok(Self { chunk_size, overlap })
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

/// Split `text` into overlapping windows of roughly `chunk_size` characters,
/// preferring to cut just after a `.` near each window boundary.
pub fn split_into_chunks(text: &str, config: &ChunkingConfig) -> Result<Vec<String>, DomainError> {
    let ChunkingConfig { chunk_size, overlap } = ChunkingConfig::new(config.chunk_size, config.overlap)?;
    if text.trim().is_empty() {
        return Ok(vec![]);
    }

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = (start + chunk_size).min(len);
        if end < len {
            if let Some(period) = find_period(&chars, start, end) {
                end = period + 1;
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        if end >= len {
            break;
        }
        start = end.saturating_sub(overlap).max(start + 1);
    }

    Ok(chunks)
}

/// First `.` within the search radius of `end`, never before `start`.
fn find_period(chars: &[char], start: usize, end: usize) -> Option<usize> {
    let lo = end.saturating_sub(SENTENCE_SEARCH_RADIUS).max(start);
    let hi = (end + SENTENCE_SEARCH_RADIUS).min(chars.len());
    chars[lo..hi].iter().position(|c| *c == '.').map(|i| lo + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig { chunk_size: size, overlap }
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(split_into_chunks("   \n\t ", &ChunkingConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = split_into_chunks("  Article 1. Scope.  ", &ChunkingConfig::default()).unwrap();
        assert_eq!(chunks, vec!["Article 1. Scope.".to_string()]);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(split_into_chunks("text", &cfg(0, 0)).is_err());
        assert!(split_into_chunks("text", &cfg(10, 10)).is_err());
        assert!(ChunkingConfig::new(10, 11).is_err());
    }

    #[test]
    fn test_cuts_after_sentence_end() {
        let text = format!("{}. {}", "a".repeat(150), "b".repeat(300));
        let chunks = split_into_chunks(&text, &cfg(200, 20)).unwrap();
        assert!(chunks[0].ends_with('.'));
        assert_eq!(chunks[0].chars().count(), 151);
    }

    #[test]
    fn test_chunks_overlap_and_cover_text() {
        let text: String = (0..50).map(|i| format!("w{i:02} ")).collect();
        let chunks = split_into_chunks(&text, &cfg(40, 10)).unwrap();
        assert!(chunks.len() > 1);
        assert!(chunks[0].starts_with("w00"));
        assert!(chunks.last().unwrap().ends_with("w49"));
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().rev().take(5).collect::<Vec<_>>().into_iter().rev().collect();
            assert!(pair[1].contains(tail.trim()));
        }
    }

    #[test]
    fn test_unicode_is_char_indexed() {
        let text = "قانون اتحادي رقم ".repeat(30);
        let chunks = split_into_chunks(&text, &cfg(50, 5)).unwrap();
        assert!(chunks.iter().all(|c| c.chars().count() <= 50));
    }

    #[test]
    fn test_always_terminates_with_large_overlap() {
        let text = ".".repeat(500);
        let chunks = split_into_chunks(&text, &cfg(150, 149)).unwrap();
        assert!(!chunks.is_empty());
    }
}
