use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)Federal\s+Law\s+No\.\s*\d+/\d{4}",
            r"(?i)Law\s+No\.\s*\d+\s+of\s+\d{4}",
            r"(?i)Article\s+\d+",
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
    })
}

/// Citations of the form `Federal Law No. 5/2021`, `Law No. 3 of 1987` and
/// `Article 12`, de-duplicated in first-seen order.
pub fn extract_legal_references(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();
    for re in patterns() {
        for m in re.find_iter(text) {
            let r = m.as_str().to_string();
            if seen.insert(r.clone()) {
                refs.push(r);
            }
        }
    }
    refs
}
