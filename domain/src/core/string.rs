//! String utilities for the domain layer.

/// Cut `s` to at most `max_len` bytes, ending in `...` when shortened.
///
/// Never splits a UTF-8 character.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let budget = max_len.saturating_sub(3);
    let end = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= budget)
        .last()
        .unwrap_or(0);
    format!("{}...", &s[..end])
}

/// Collapse a multi-line answer into a single-line preview.
pub fn one_line_preview(s: &str, max_len: usize) -> String {
    let joined = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&joined, max_len)
}
