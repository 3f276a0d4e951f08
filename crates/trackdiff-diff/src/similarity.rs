//! Character-level similarity ratio.

use crate::matcher::SequenceMatcher;

/// Similarity of two strings in `[0, 1]`.
///
/// Twice the number of characters covered by matching blocks, divided by
/// the combined character count. Two empty strings are identical (1.0).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = SequenceMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Join normalized line texts with a single space.
pub fn join<'a>(texts: impl IntoIterator<Item = &'a str>) -> String {
    texts.into_iter().collect::<Vec<_>>().join(" ")
}
