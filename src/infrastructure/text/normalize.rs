/// Unify Arabic letter variants, drop harakat and collapse whitespace.
pub fn normalize_arabic(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter(|c| !is_arabic_diacritic(*c))
        .map(|c| match c {
            'إ' | 'أ' | 'آ' => 'ا',
            'ى' | 'ئ' => 'ي',
            'ؤ' => 'و',
            'ة' => 'ه',
            other => other,
        })
        .collect();
    collapse_whitespace(&mapped)
}

/// Keep letters, digits, whitespace and basic punctuation; optionally the
/// Arabic block as well.
pub fn remove_special_chars(text: &str, keep_arabic: bool) -> String {
    let kept: String = text
        .chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || c.is_whitespace()
                || matches!(*c, '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '-')
                || (keep_arabic && ('\u{0600}'..='\u{06FF}').contains(c))
        })
        .collect();
    collapse_whitespace(&kept)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_arabic_diacritic(c: char) -> bool {
    ('\u{064B}'..='\u{0652}').contains(&c)
}
