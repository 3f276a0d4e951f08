use serde::{Deserialize, Serialize};

/// A single displayed line of a track.
///
/// `raw` is what gets shown to people; `normalized` is the key used for
/// every comparison. `position` is the zero-based index of the line in its
/// track's flattened line sequence and never changes after extraction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub position: usize,
    pub raw: String,
    pub normalized: String,
}

impl Line {
    pub fn new(position: usize, raw: impl Into<String>, normalized: impl Into<String>) -> Self {
        Self {
            position,
            raw: raw.into(),
            normalized: normalized.into(),
        }
    }
}
