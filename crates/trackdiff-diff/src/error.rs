//! Error types for the diff crate.

use std::ops::Range;

use trackdiff_types::TypeError;

/// Errors that can occur during a diff run.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The aligner produced opcodes that do not tile both line sequences.
    /// This breaks the aligner's contract and aborts the whole run.
    #[error(
        "inconsistent alignment: {tag} op covers {one:?} and {two:?}, expected to start at ({expected_one}, {expected_two})"
    )]
    InconsistentAlignment {
        tag: &'static str,
        one: Range<usize>,
        two: Range<usize>,
        expected_one: usize,
        expected_two: usize,
    },

    /// The alignment ended before covering both line sequences.
    #[error("alignment stopped at ({one}, {two}) but the tracks have {one_len} and {two_len} lines")]
    IncompleteAlignment {
        one: usize,
        two: usize,
        one_len: usize,
        two_len: usize,
    },

    /// A similarity cutoff outside `[0, 1]`.
    #[error("invalid {name}: {value} (must be within 0.0..=1.0)")]
    InvalidCutoff { name: &'static str, value: f64 },

    /// A diff entry could not be built.
    #[error("entry error: {0}")]
    Type(#[from] TypeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
