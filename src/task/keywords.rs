//! Keyword extraction from free-text exam scopes.

/// Whether `c` separates keywords: half-width comma, ideographic or
/// full-width comma, or any Unicode whitespace (including the ideographic space).
fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | '、' | '，') || c.is_whitespace()
}

/// Split an exam scope into non-empty keywords, in order of appearance.
pub fn extract_keywords(exam_scope: &str) -> Vec<&str> {
    exam_scope
        .split(is_delimiter)
        .filter(|k| !k.is_empty())
        .collect()
}
