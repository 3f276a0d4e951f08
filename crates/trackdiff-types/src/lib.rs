//! Foundation types for trackdiff.
//!
//! This crate provides the values that flow through the line diff engine:
//! the extracted lines of a track, the closed set of diff kinds, and the
//! immutable diff entries the engine reports. Every other trackdiff crate
//! depends on `trackdiff-types`.
//!
//! # Key Types
//!
//! - [`Line`] -- One displayed line with its raw text, comparison key, and position
//! - [`DiffKind`] -- Closed tag set: Delete, Insert, Edit, Merge, MergeEdit, Split, SplitEdit, Shift
//! - [`DiffEntry`] -- One classified discrepancy between two tracks
//! - [`Record`] -- Anything carrying a text blob that can be split into lines

pub mod entry;
pub mod error;
pub mod format;
pub mod kind;
pub mod line;
pub mod record;

pub use entry::DiffEntry;
pub use error::TypeError;
pub use format::{format_positions, render_entry};
pub use kind::DiffKind;
pub use line::Line;
pub use record::Record;
