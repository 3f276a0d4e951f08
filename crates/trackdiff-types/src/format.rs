//! Canonical single-line rendering of diff entries.
//!
//! Downstream tooling matches on these strings, so the token order and the
//! 1-based inclusive range notation are fixed:
//!
//! ```text
//! Edit: one[1] -> two[1]: "Hello world" -> "Hello World!"
//! Split: one[1] -> two[1-2]: ["a b"] -> ["a", "b"]
//! Delete: one[4] "gone" not present in two
//! ```

use crate::entry::DiffEntry;

/// Render a contiguous position list as `6` or `6-8` (1-based, inclusive).
pub fn format_positions(positions: &[usize]) -> String {
    match (positions.first(), positions.last()) {
        (Some(first), Some(last)) if first == last => format!("{}", first + 1),
        (Some(first), Some(last)) => format!("{}-{}", first + 1, last + 1),
        _ => String::new(),
    }
}

/// Render one entry in the canonical format.
pub fn render_entry(entry: &DiffEntry) -> String {
    let one = format_positions(entry.one_positions());

    match (entry.two_positions(), entry.two_texts()) {
        (Some(two_positions), Some(two_texts)) => {
            let bare = entry.one_positions().len() == 1 && two_positions.len() == 1;
            format!(
                "{}: {}[{}] -> {}[{}]: {} -> {}",
                entry.kind(),
                entry.one_label(),
                one,
                entry.two_label(),
                format_positions(two_positions),
                render_texts(entry.one_texts(), bare),
                render_texts(two_texts, bare),
            )
        }
        _ => format!(
            "{}: {}[{}] {} not present in {}",
            entry.kind(),
            entry.one_label(),
            one,
            render_texts(entry.one_texts(), entry.one_positions().len() == 1),
            entry.two_label(),
        ),
    }
}

fn render_texts(texts: &[String], bare: bool) -> String {
    match texts {
        [single] if bare => format!("{single:?}"),
        _ => format!("{texts:?}"),
    }
}
