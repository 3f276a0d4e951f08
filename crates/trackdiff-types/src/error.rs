use thiserror::Error;

use crate::kind::DiffKind;

/// Errors produced when constructing diff values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("a diff entry needs at least one line on its {0} side")]
    EmptySide(&'static str),

    #[error("positions on the {side} side are not contiguous: {positions:?}")]
    NonContiguous {
        side: &'static str,
        positions: Vec<usize>,
    },

    #[error("{kind} cannot be built as a {shape} entry")]
    KindMismatch { kind: DiffKind, shape: &'static str },
}
