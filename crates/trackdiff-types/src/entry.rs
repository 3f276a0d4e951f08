//! Diff entries: the engine's unit of output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::format::render_entry;
use crate::kind::DiffKind;
use crate::line::Line;

/// One classified discrepancy between two tracks.
///
/// Paired entries (every kind except `Delete` and `Insert`) carry lines from
/// both tracks. Unpaired entries carry lines from one track only; for
/// `Insert` those are second-track lines, so the labels are swapped and
/// `one_label` names the track the lines came from.
///
/// Positions on each side are contiguous and strictly increasing. Entries
/// are immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    kind: DiffKind,
    one_label: String,
    two_label: String,
    one_positions: Vec<usize>,
    two_positions: Option<Vec<usize>>,
    one_texts: Vec<String>,
    two_texts: Option<Vec<String>>,
}

impl DiffEntry {
    /// Build an entry relating `one` lines to `two` lines.
    pub fn paired(
        kind: DiffKind,
        one_label: &str,
        two_label: &str,
        one: &[Line],
        two: &[Line],
    ) -> Result<Self, TypeError> {
        if kind.is_unpaired() {
            return Err(TypeError::KindMismatch {
                kind,
                shape: "paired",
            });
        }
        let (one_positions, one_texts) = split_side("first", one)?;
        let (two_positions, two_texts) = split_side("second", two)?;
        Ok(Self {
            kind,
            one_label: one_label.to_string(),
            two_label: two_label.to_string(),
            one_positions,
            two_positions: Some(two_positions),
            one_texts,
            two_texts: Some(two_texts),
        })
    }

    /// Build a `Delete` or `Insert` entry for lines only `label` contains.
    pub fn unpaired(
        kind: DiffKind,
        label: &str,
        other_label: &str,
        lines: &[Line],
    ) -> Result<Self, TypeError> {
        if !kind.is_unpaired() {
            return Err(TypeError::KindMismatch {
                kind,
                shape: "unpaired",
            });
        }
        let (one_positions, one_texts) = split_side("first", lines)?;
        Ok(Self {
            kind,
            one_label: label.to_string(),
            two_label: other_label.to_string(),
            one_positions,
            two_positions: None,
            one_texts,
            two_texts: None,
        })
    }

    pub fn kind(&self) -> DiffKind {
        self.kind
    }

    pub fn one_label(&self) -> &str {
        &self.one_label
    }

    pub fn two_label(&self) -> &str {
        &self.two_label
    }

    pub fn one_positions(&self) -> &[usize] {
        &self.one_positions
    }

    pub fn two_positions(&self) -> Option<&[usize]> {
        self.two_positions.as_deref()
    }

    pub fn one_texts(&self) -> &[String] {
        &self.one_texts
    }

    pub fn two_texts(&self) -> Option<&[String]> {
        self.two_texts.as_deref()
    }

    /// Positions in the first track covered by this entry.
    ///
    /// For `Insert` the entry's own side holds second-track lines, so this
    /// is empty.
    pub fn first_track_positions(&self) -> &[usize] {
        match self.kind {
            DiffKind::Insert => &[],
            _ => &self.one_positions,
        }
    }

    /// Positions in the second track covered by this entry.
    pub fn second_track_positions(&self) -> &[usize] {
        match self.kind {
            DiffKind::Insert => &self.one_positions,
            _ => self.two_positions.as_deref().unwrap_or(&[]),
        }
    }
}

impl fmt::Display for DiffEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_entry(self))
    }
}

fn split_side(side: &'static str, lines: &[Line]) -> Result<(Vec<usize>, Vec<String>), TypeError> {
    if lines.is_empty() {
        return Err(TypeError::EmptySide(side));
    }
    let positions: Vec<usize> = lines.iter().map(|l| l.position).collect();
    if positions.windows(2).any(|w| w[1] != w[0] + 1) {
        return Err(TypeError::NonContiguous { side, positions });
    }
    let texts = lines.iter().map(|l| l.raw.clone()).collect();
    Ok((positions, texts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(start: usize, texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .enumerate()
            .map(|(k, t)| Line::new(start + k, *t, *t))
            .collect()
    }

    #[test]
    fn paired_entry_keeps_both_sides() {
        let one = lines(3, &["a b"]);
        let two = lines(4, &["a", "b"]);
        let entry = DiffEntry::paired(DiffKind::Split, "OCR", "SRT", &one, &two).unwrap();

        assert_eq!(entry.kind(), DiffKind::Split);
        assert_eq!(entry.one_label(), "OCR");
        assert_eq!(entry.two_label(), "SRT");
        assert_eq!(entry.one_positions(), &[3]);
        assert_eq!(entry.two_positions(), Some(&[4, 5][..]));
        assert_eq!(entry.two_texts().unwrap(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn unpaired_entry_has_no_second_side() {
        let one = lines(0, &["gone"]);
        let entry = DiffEntry::unpaired(DiffKind::Delete, "one", "two", &one).unwrap();
        assert!(entry.two_positions().is_none());
        assert!(entry.two_texts().is_none());
        assert_eq!(entry.first_track_positions(), &[0]);
        assert!(entry.second_track_positions().is_empty());
    }

    #[test]
    fn insert_positions_belong_to_second_track() {
        let two = lines(7, &["new"]);
        let entry = DiffEntry::unpaired(DiffKind::Insert, "two", "one", &two).unwrap();
        assert!(entry.first_track_positions().is_empty());
        assert_eq!(entry.second_track_positions(), &[7]);
    }

    #[test]
    fn rejects_empty_side() {
        let one = lines(0, &["x"]);
        let err = DiffEntry::paired(DiffKind::Edit, "one", "two", &one, &[]).unwrap_err();
        assert_eq!(err, TypeError::EmptySide("second"));
    }

    #[test]
    fn rejects_gaps_in_positions() {
        let mut one = lines(0, &["x", "y"]);
        one[1].position = 5;
        let err = DiffEntry::unpaired(DiffKind::Delete, "one", "two", &one).unwrap_err();
        assert!(matches!(err, TypeError::NonContiguous { side: "first", .. }));
    }

    #[test]
    fn rejects_kind_shape_mismatch() {
        let one = lines(0, &["x"]);
        assert!(matches!(
            DiffEntry::unpaired(DiffKind::Edit, "one", "two", &one),
            Err(TypeError::KindMismatch { .. })
        ));
        assert!(matches!(
            DiffEntry::paired(DiffKind::Insert, "one", "two", &one, &one),
            Err(TypeError::KindMismatch { .. })
        ));
    }

    #[test]
    fn serde_roundtrip() {
        let one = lines(0, &["Hello world"]);
        let two = lines(0, &["Hello World!"]);
        let entry = DiffEntry::paired(DiffKind::Edit, "one", "two", &one, &two).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: DiffEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }
}
