//! Replace-block classification.
//!
//! Every `replace` opcode from the aligner is handed to [`Classifier`],
//! which explains the block as edits, merges, splits, shifts, deletions,
//! and insertions.
//!
//! Blocks with the same line count on both sides are checked for a removed
//! line followed by a split, then for a shifted line break, and otherwise
//! reported as one edit per aligned pair.
//!
//! Blocks with different line counts are scanned by a forward-only
//! [`Cursor`]. At each position the [`RULES`] table is tried in order and
//! the first rule that matches decides the step; the order is load-bearing.
//! Whatever is left on one side once the other is exhausted becomes a bulk
//! entry.

use std::ops::Range;

use tracing::debug;
use trackdiff_types::{DiffEntry, DiffKind, Line};

use crate::config::DiffConfig;
use crate::error::DiffResult;
use crate::similarity::{join, ratio};

/// Classifies replace blocks under one configuration.
pub struct Classifier<'a> {
    config: &'a DiffConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a DiffConfig) -> Self {
        Self { config }
    }

    /// Classify one replace block, appending entries to `out` in scan order.
    pub fn classify(&self, one: &[Line], two: &[Line], out: &mut Vec<DiffEntry>) -> DiffResult<()> {
        if one.len() == two.len() {
            self.classify_equal_size(one, two, out)
        } else {
            self.classify_unequal_size(one, two, out)
        }
    }

    fn classify_equal_size(
        &self,
        one: &[Line],
        two: &[Line],
        out: &mut Vec<DiffEntry>,
    ) -> DiffResult<()> {
        if let Some(kind) = self.removed_then_split(one, two) {
            debug!(rule = "removed_then_split", %kind, "equal-size block");
            self.push_unpaired(out, DiffKind::Delete, &one[..1])?;
            return self.push_paired(out, kind, &one[1..], two);
        }

        if one.len() > 1 && self.is_shift(one, two) {
            debug!(rule = "shift", lines = one.len(), "equal-size block");
            return self.push_paired(out, DiffKind::Shift, one, two);
        }

        for k in 0..one.len() {
            self.push_paired(out, DiffKind::Edit, &one[k..k + 1], &two[k..k + 1])?;
        }
        Ok(())
    }

    /// A 2x2 block where the first line of `one` has no counterpart and the
    /// second line of `one` was split across both lines of `two`.
    fn removed_then_split(&self, one: &[Line], two: &[Line]) -> Option<DiffKind> {
        let ([first, second], [_, _]) = (one, two) else {
            return None;
        };
        let unmatched = two
            .iter()
            .all(|t| ratio(&first.normalized, &t.normalized) < self.config.cutoff);
        if !unmatched {
            return None;
        }
        let joined = join_lines(two);
        judge(&joined, &second.normalized, self.config.join_cutoff).map(split_kind)
    }

    /// The joined block still matches but some aligned pair does not: the
    /// line break moved rather than each line being edited on its own.
    fn is_shift(&self, one: &[Line], two: &[Line]) -> bool {
        let whole = ratio(&join_lines(one), &join_lines(two));
        whole >= self.config.cutoff
            && one
                .iter()
                .zip(two)
                .any(|(a, b)| ratio(&a.normalized, &b.normalized) < self.config.shift_cutoff)
    }

    fn classify_unequal_size(
        &self,
        one: &[Line],
        two: &[Line],
        out: &mut Vec<DiffEntry>,
    ) -> DiffResult<()> {
        let scan = BlockScan {
            one,
            two,
            config: self.config,
        };
        let mut cursor = Cursor::default();

        while cursor.i < one.len() && cursor.j < two.len() {
            let (rule, step) = RULES
                .iter()
                .find_map(|(name, rule)| rule(&scan, &cursor).map(|step| (*name, step)))
                .unwrap_or_else(|| ("edit_fallback", Step::edit(&cursor)));
            debug!(rule, i = cursor.i, j = cursor.j, "unequal-size block step");

            for pairing in &step.pairings {
                self.push_paired(
                    out,
                    pairing.kind,
                    &one[pairing.one.clone()],
                    &two[pairing.two.clone()],
                )?;
            }
            cursor.advance(&step);
        }

        self.resolve_tail(&one[cursor.i..], &two[cursor.j..], out)
    }

    fn resolve_tail(&self, one: &[Line], two: &[Line], out: &mut Vec<DiffEntry>) -> DiffResult<()> {
        match (one.is_empty(), two.is_empty()) {
            (true, true) => Ok(()),
            (false, true) => self.push_unpaired(out, DiffKind::Delete, one),
            (true, false) => self.push_unpaired(out, DiffKind::Insert, two),
            (false, false) => {
                let exact = join_lines(one) == join_lines(two);
                let kind = if one.len() <= two.len() {
                    split_kind(exact)
                } else {
                    merge_kind(exact)
                };
                self.push_paired(out, kind, one, two)
            }
        }
    }

    fn push_paired(
        &self,
        out: &mut Vec<DiffEntry>,
        kind: DiffKind,
        one: &[Line],
        two: &[Line],
    ) -> DiffResult<()> {
        let entry = DiffEntry::paired(
            kind,
            &self.config.label_one,
            &self.config.label_two,
            one,
            two,
        )?;
        out.push(entry);
        Ok(())
    }

    fn push_unpaired(
        &self,
        out: &mut Vec<DiffEntry>,
        kind: DiffKind,
        lines: &[Line],
    ) -> DiffResult<()> {
        let (label, other) = match kind {
            DiffKind::Insert => (&self.config.label_two, &self.config.label_one),
            _ => (&self.config.label_one, &self.config.label_two),
        };
        out.push(DiffEntry::unpaired(kind, label, other, lines)?);
        Ok(())
    }
}

/// Scan state for an unequal-size block.
#[derive(Debug, Default)]
struct Cursor {
    i: usize,
    j: usize,
    last_was_split: bool,
    steps: usize,
}

impl Cursor {
    fn advance(&mut self, step: &Step) {
        self.i += step.one_used;
        self.j += step.two_used;
        self.last_was_split = step.splits;
        self.steps += 1;
    }
}

/// What one rule decided at the cursor.
#[derive(Debug)]
struct Step {
    pairings: Vec<Pairing>,
    one_used: usize,
    two_used: usize,
    splits: bool,
}

/// One entry to emit, with block-relative ranges.
#[derive(Debug)]
struct Pairing {
    kind: DiffKind,
    one: Range<usize>,
    two: Range<usize>,
}

impl Step {
    fn single(c: &Cursor, kind: DiffKind, one_used: usize, two_used: usize, splits: bool) -> Self {
        Self {
            pairings: vec![Pairing {
                kind,
                one: c.i..c.i + one_used,
                two: c.j..c.j + two_used,
            }],
            one_used,
            two_used,
            splits,
        }
    }

    fn edit(c: &Cursor) -> Self {
        Self::single(c, DiffKind::Edit, 1, 1, false)
    }

    /// Two `one` lines against one `two` line.
    fn two_into_one(c: &Cursor, kind: DiffKind, splits: bool) -> Self {
        Self::single(c, kind, 2, 1, splits)
    }

    /// One `one` line against two `two` lines.
    fn one_into_two(c: &Cursor, kind: DiffKind) -> Self {
        Self::single(c, kind, 1, 2, true)
    }
}

/// The lines of one unequal-size block.
struct BlockScan<'a> {
    one: &'a [Line],
    two: &'a [Line],
    config: &'a DiffConfig,
}

impl BlockScan<'_> {
    fn one_left(&self, c: &Cursor) -> usize {
        self.one.len() - c.i
    }

    fn two_left(&self, c: &Cursor) -> usize {
        self.two.len() - c.j
    }

    fn one_text(&self, k: usize) -> &str {
        &self.one[k].normalized
    }

    fn two_text(&self, k: usize) -> &str {
        &self.two[k].normalized
    }

    fn one_join(&self, range: Range<usize>) -> String {
        join_lines(&self.one[range])
    }

    fn two_join(&self, range: Range<usize>) -> String {
        join_lines(&self.two[range])
    }
}

type Rule = fn(&BlockScan<'_>, &Cursor) -> Option<Step>;

/// Unequal-size rules in priority order. The first match wins; if none
/// matches, the current pair is reported as an edit.
const RULES: [(&str, Rule); 8] = [
    ("exact_merge", exact_merge),
    ("merge_edit", merge_edit),
    ("double_split", double_split),
    ("singleton_split", singleton_split),
    ("context_split", context_split),
    ("direct_edit", direct_edit),
    ("forward_split", forward_split),
    ("fallback_merge", fallback_merge),
];

/// The last `two` line is exactly the next two `one` lines joined.
fn exact_merge(s: &BlockScan<'_>, c: &Cursor) -> Option<Step> {
    if s.two_left(c) != 1 || s.one_left(c) < 2 {
        return None;
    }
    (s.one_join(c.i..c.i + 2) == s.two_text(c.j))
        .then(|| Step::two_into_one(c, DiffKind::Merge, false))
}

/// The last `two` line matches the joined pair better than either line alone.
fn merge_edit(s: &BlockScan<'_>, c: &Cursor) -> Option<Step> {
    if s.two_left(c) != 1 || s.one_left(c) < 2 {
        return None;
    }
    let target = s.two_text(c.j);
    let joined = ratio(&s.one_join(c.i..c.i + 2), target);
    let first = ratio(s.one_text(c.i), target);
    let second = ratio(s.one_text(c.i + 1), target);
    (joined >= s.config.cutoff && joined > first && joined > second)
        .then(|| Step::two_into_one(c, DiffKind::MergeEdit, false))
}

/// Two `one` lines left, each split across two of the four `two` lines left.
fn double_split(s: &BlockScan<'_>, c: &Cursor) -> Option<Step> {
    if s.one_left(c) != 2 || s.two_left(c) != 4 {
        return None;
    }
    let cutoff = s.config.cutoff;
    let first = judge(s.one_text(c.i), &s.two_join(c.j..c.j + 2), cutoff)?;
    let second = judge(s.one_text(c.i + 1), &s.two_join(c.j + 2..c.j + 4), cutoff)?;
    Some(Step {
        pairings: vec![
            Pairing {
                kind: split_kind(first),
                one: c.i..c.i + 1,
                two: c.j..c.j + 2,
            },
            Pairing {
                kind: split_kind(second),
                one: c.i + 1..c.i + 2,
                two: c.j + 2..c.j + 4,
            },
        ],
        one_used: 2,
        two_used: 4,
        splits: true,
    })
}

/// The last `one` line split across the next two `two` lines, in either
/// order. Only the forward order can be exact.
fn singleton_split(s: &BlockScan<'_>, c: &Cursor) -> Option<Step> {
    if s.one_left(c) != 1 || s.two_left(c) < 2 {
        return None;
    }
    let target = s.one_text(c.i);
    let forward = s.two_join(c.j..c.j + 2);
    if forward == target {
        return Some(Step::one_into_two(c, DiffKind::Split));
    }
    let reversed = join([s.two_text(c.j + 1), s.two_text(c.j)]);
    let best = ratio(&forward, target).max(ratio(&reversed, target));
    (best >= s.config.cutoff).then(|| Step::one_into_two(c, DiffKind::SplitEdit))
}

/// A near-exact split, committed only when the following `one` line lines
/// up with the `two` line right after the split.
fn context_split(s: &BlockScan<'_>, c: &Cursor) -> Option<Step> {
    if s.one_left(c) < 2 || s.two_left(c) < 3 {
        return None;
    }
    let target = s.one_text(c.i);
    let joined = s.two_join(c.j..c.j + 2);
    if ratio(&joined, target) < s.config.join_cutoff {
        return None;
    }
    if ratio(s.one_text(c.i + 1), s.two_text(c.j + 2)) < s.config.cutoff {
        return None;
    }
    Some(Step::one_into_two(c, split_kind(joined == target)))
}

fn direct_edit(s: &BlockScan<'_>, c: &Cursor) -> Option<Step> {
    (ratio(s.one_text(c.i), s.two_text(c.j)) >= s.config.cutoff).then(|| Step::edit(c))
}

fn forward_split(s: &BlockScan<'_>, c: &Cursor) -> Option<Step> {
    if s.two_left(c) < 2 {
        return None;
    }
    let exact = judge(s.one_text(c.i), &s.two_join(c.j..c.j + 2), s.config.cutoff)?;
    Some(Step::one_into_two(c, split_kind(exact)))
}

/// Two `one` lines against one `two` line. An exact join at the start of
/// the block, or right after a split, is labeled `Split` to keep adjacent
/// labels consistent.
fn fallback_merge(s: &BlockScan<'_>, c: &Cursor) -> Option<Step> {
    if s.one_left(c) < 2 {
        return None;
    }
    let exact = judge(&s.one_join(c.i..c.i + 2), s.two_text(c.j), s.config.cutoff)?;
    if exact && (c.last_was_split || c.steps == 0) {
        return Some(Step::two_into_one(c, DiffKind::Split, true));
    }
    Some(Step::two_into_one(c, merge_kind(exact), false))
}

/// `Some(true)` for identical text, `Some(false)` for a match at or above
/// `cutoff`, `None` otherwise.
fn judge(a: &str, b: &str, cutoff: f64) -> Option<bool> {
    if a == b {
        Some(true)
    } else if ratio(a, b) >= cutoff {
        Some(false)
    } else {
        None
    }
}

fn split_kind(exact: bool) -> DiffKind {
    if exact {
        DiffKind::Split
    } else {
        DiffKind::SplitEdit
    }
}

fn merge_kind(exact: bool) -> DiffKind {
    if exact {
        DiffKind::Merge
    } else {
        DiffKind::MergeEdit
    }
}

fn join_lines(lines: &[Line]) -> String {
    join(lines.iter().map(|l| l.normalized.as_str()))
}
