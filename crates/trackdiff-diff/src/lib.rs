//! Line diff engine for trackdiff.
//!
//! Explains how every line of one text track corresponds to the lines of
//! another: straight edits, insertions, deletions, merges and splits (with
//! or without wording changes), and line breaks that shifted between two
//! otherwise matching lines.
//!
//! # Pipeline
//!
//! 1. [`extract_lines`] flattens each track into trimmed, normalized lines.
//! 2. [`align`] matches the two line sequences into equal / replace /
//!    insert / delete opcodes.
//! 3. [`Classifier`] explains each replace block, using the character-level
//!    [`ratio`] to decide between edits, merges, splits, and shifts.
//! 4. The resulting [`LineDiff`] renders each entry in the canonical
//!    one-line format.

pub mod align;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod similarity;

pub use align::align;
pub use classify::Classifier;
pub use config::DiffConfig;
pub use engine::{diff_extracted, diff_lines, diff_tracks, LineDiff};
pub use error::{DiffError, DiffResult};
pub use extract::{extract_lines, normalize};
pub use similarity::ratio;
pub use trackdiff_types::{format_positions, render_entry, DiffEntry, DiffKind, Line, Record};
