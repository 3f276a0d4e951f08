//! Diff runs: extraction, alignment, and classification end to end.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use similar::DiffTag;
use tracing::debug;
use trackdiff_types::{DiffEntry, DiffKind, Line, Record};

use crate::align::align;
use crate::classify::Classifier;
use crate::config::DiffConfig;
use crate::error::DiffResult;
use crate::extract::extract_lines;

/// The ordered entries of one diff run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    pub entries: Vec<DiffEntry>,
}

impl LineDiff {
    /// Returns `true` if the two tracks matched line for line.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffEntry> {
        self.entries.iter()
    }

    /// Number of entries of the given kind.
    pub fn count(&self, kind: DiffKind) -> usize {
        self.entries.iter().filter(|e| e.kind() == kind).count()
    }

    /// Entry counts per kind, omitting kinds that never occur.
    pub fn counts(&self) -> BTreeMap<DiffKind, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Every entry in the canonical one-line format.
    pub fn render(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a LineDiff {
    type Item = &'a DiffEntry;
    type IntoIter = std::slice::Iter<'a, DiffEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Diff two tracks of records.
pub fn diff_tracks<A, B>(one: A, two: B, config: &DiffConfig) -> DiffResult<LineDiff>
where
    A: IntoIterator,
    A::Item: Record,
    B: IntoIterator,
    B::Item: Record,
{
    let one = extract_lines(one);
    let two = extract_lines(two);
    diff_extracted(&one, &two, config)
}

/// Diff two tracks given as plain strings, one record each.
pub fn diff_lines(one: &[&str], two: &[&str], config: &DiffConfig) -> DiffResult<LineDiff> {
    diff_tracks(one.iter().copied(), two.iter().copied(), config)
}

/// Diff two already extracted line sequences.
pub fn diff_extracted(one: &[Line], two: &[Line], config: &DiffConfig) -> DiffResult<LineDiff> {
    config.validate()?;

    let ops = align(one, two)?;
    let classifier = Classifier::new(config);
    let mut entries = Vec::new();

    for op in &ops {
        let (tag, one_range, two_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {}
            DiffTag::Delete => entries.push(DiffEntry::unpaired(
                DiffKind::Delete,
                &config.label_one,
                &config.label_two,
                &one[one_range],
            )?),
            DiffTag::Insert => entries.push(DiffEntry::unpaired(
                DiffKind::Insert,
                &config.label_two,
                &config.label_one,
                &two[two_range],
            )?),
            DiffTag::Replace => {
                debug!(one = ?one_range, two = ?two_range, "classifying replace block");
                classifier.classify(&one[one_range], &two[two_range], &mut entries)?;
            }
        }
    }

    debug!(
        one_lines = one.len(),
        two_lines = two.len(),
        ops = ops.len(),
        entries = entries.len(),
        "diff complete"
    );
    Ok(LineDiff { entries })
}
