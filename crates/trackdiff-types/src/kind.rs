use std::fmt;

use serde::{Deserialize, Serialize};

/// How one stretch of lines in the first track relates to the second track.
///
/// `Merge`/`Split` assert that the joined normalized text is identical on
/// both sides; `MergeEdit`/`SplitEdit` describe the same structure with a
/// wording change on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiffKind {
    /// Lines present only in the first track.
    Delete,
    /// Lines present only in the second track.
    Insert,
    /// A line whose wording changed.
    Edit,
    /// Several first-track lines that read as one second-track line.
    Merge,
    /// A merge with a wording change.
    MergeEdit,
    /// One first-track line that reads as several second-track lines.
    Split,
    /// A split with a wording change.
    SplitEdit,
    /// Content moved across a line break without changing the line count.
    Shift,
}

impl DiffKind {
    /// Every kind, in declaration order.
    pub const ALL: [DiffKind; 8] = [
        DiffKind::Delete,
        DiffKind::Insert,
        DiffKind::Edit,
        DiffKind::Merge,
        DiffKind::MergeEdit,
        DiffKind::Split,
        DiffKind::SplitEdit,
        DiffKind::Shift,
    ];

    /// The canonical tag name used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffKind::Delete => "Delete",
            DiffKind::Insert => "Insert",
            DiffKind::Edit => "Edit",
            DiffKind::Merge => "Merge",
            DiffKind::MergeEdit => "MergeEdit",
            DiffKind::Split => "Split",
            DiffKind::SplitEdit => "SplitEdit",
            DiffKind::Shift => "Shift",
        }
    }

    /// Returns `true` for kinds that only carry lines from one track.
    pub fn is_unpaired(&self) -> bool {
        matches!(self, DiffKind::Delete | DiffKind::Insert)
    }

    /// The kind reported when the two tracks swap places.
    pub fn mirrored(&self) -> DiffKind {
        match self {
            DiffKind::Delete => DiffKind::Insert,
            DiffKind::Insert => DiffKind::Delete,
            DiffKind::Merge => DiffKind::Split,
            DiffKind::Split => DiffKind::Merge,
            DiffKind::MergeEdit => DiffKind::SplitEdit,
            DiffKind::SplitEdit => DiffKind::MergeEdit,
            DiffKind::Edit => DiffKind::Edit,
            DiffKind::Shift => DiffKind::Shift,
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_tag_name() {
        assert_eq!(DiffKind::MergeEdit.to_string(), "MergeEdit");
        assert_eq!(format!("{}", DiffKind::Shift), "Shift");
    }

    #[test]
    fn mirrored_is_an_involution() {
        for kind in DiffKind::ALL {
            assert_eq!(kind.mirrored().mirrored(), kind);
        }
    }

    #[test]
    fn mirrored_swaps_structure() {
        assert_eq!(DiffKind::Merge.mirrored(), DiffKind::Split);
        assert_eq!(DiffKind::SplitEdit.mirrored(), DiffKind::MergeEdit);
        assert_eq!(DiffKind::Delete.mirrored(), DiffKind::Insert);
        assert_eq!(DiffKind::Edit.mirrored(), DiffKind::Edit);
    }

    #[test]
    fn only_delete_and_insert_are_unpaired() {
        let unpaired: Vec<_> = DiffKind::ALL.into_iter().filter(DiffKind::is_unpaired).collect();
        assert_eq!(unpaired, vec![DiffKind::Delete, DiffKind::Insert]);
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&DiffKind::SplitEdit).unwrap();
        assert_eq!(json, "\"SplitEdit\"");
        let parsed: DiffKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DiffKind::SplitEdit);
    }
}
