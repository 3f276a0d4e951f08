//! Ratcliff/Obershelp sequence matching.
//!
//! Finds the longest contiguous matching block, then recurses on the pieces
//! to its left and right. Junk detection is disabled: every element takes
//! part in matching no matter how often it repeats. Ties go to the block
//! that starts earliest in `a`, then earliest in `b`.

use std::collections::HashMap;
use std::hash::Hash;

use similar::algorithms::DiffHook;

/// A run of equal elements: `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// Matches two slices of hashable elements.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b_index: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Hash + Eq> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b_index: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b_index.entry(elt).or_default().push(j);
        }
        Self { a, b, b_index }
    }

    /// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a zero-length block at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let mut best = MatchBlock {
            a_start: alo,
            b_start: blo,
            len: 0,
        };
        // Length of the match ending at a[i - 1], b[j], keyed by j.
        let mut run_at: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_run_at = HashMap::new();
            if let Some(positions) = self.b_index.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_at.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_at.insert(j, k);
                    if k > best.len {
                        best = MatchBlock {
                            a_start: i + 1 - k,
                            b_start: j + 1 - k,
                            len: k,
                        };
                    }
                }
            }
            run_at = next_run_at;
        }
        best
    }

    /// All matching blocks in order, adjacent blocks collapsed, terminated
    /// by a zero-length sentinel at `(a.len(), b.len())`.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut pending = vec![(0, la, 0, lb)];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.len == 0 {
                continue;
            }
            if alo < m.a_start && blo < m.b_start {
                pending.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.len < ahi && m.b_start + m.len < bhi {
                pending.push((m.a_start + m.len, ahi, m.b_start + m.len, bhi));
            }
            found.push(m);
        }
        found.sort();

        let mut blocks: Vec<MatchBlock> = Vec::with_capacity(found.len() + 1);
        for m in found {
            match blocks.last_mut() {
                Some(prev)
                    if prev.a_start + prev.len == m.a_start
                        && prev.b_start + prev.len == m.b_start =>
                {
                    prev.len += m.len;
                }
                _ => blocks.push(m),
            }
        }
        blocks.push(MatchBlock {
            a_start: la,
            b_start: lb,
            len: 0,
        });
        blocks
    }

    /// Number of elements covered by matching blocks.
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|m| m.len).sum()
    }

    /// Replay the alignment as equal/replace/delete/insert calls on `hook`,
    /// left to right, then call `finish`.
    pub fn replay<D: DiffHook>(&self, hook: &mut D) -> Result<(), D::Error> {
        let (mut i, mut j) = (0, 0);
        for m in self.matching_blocks() {
            match (i < m.a_start, j < m.b_start) {
                (true, true) => hook.replace(i, m.a_start - i, j, m.b_start - j)?,
                (true, false) => hook.delete(i, m.a_start - i, j)?,
                (false, true) => hook.insert(i, j, m.b_start - j)?,
                (false, false) => {}
            }
            if m.len > 0 {
                hook.equal(m.a_start, m.b_start, m.len)?;
            }
            i = m.a_start + m.len;
            j = m.b_start + m.len;
        }
        hook.finish()
    }
}

#[cfg(test)]
mod tests {
    use similar::algorithms::Capture;
    use similar::{DiffOp, DiffTag};

    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn longest_match_prefers_earliest() {
        let a = chars("abxab");
        let b = chars("ab");
        let m = SequenceMatcher::new(&a, &b).find_longest_match(0, a.len(), 0, b.len());
        assert_eq!(m, MatchBlock { a_start: 0, b_start: 0, len: 2 });
    }

    #[test]
    fn no_match_is_zero_length() {
        let a = chars("abc");
        let b = chars("xyz");
        let m = SequenceMatcher::new(&a, &b).find_longest_match(0, 3, 0, 3);
        assert_eq!(m.len, 0);
    }

    #[test]
    fn matching_blocks_end_with_sentinel() {
        let a = chars("abxcd");
        let b = chars("abcd");
        let blocks = SequenceMatcher::new(&a, &b).matching_blocks();
        assert_eq!(
            blocks,
            vec![
                MatchBlock { a_start: 0, b_start: 0, len: 2 },
                MatchBlock { a_start: 3, b_start: 2, len: 2 },
                MatchBlock { a_start: 5, b_start: 4, len: 0 },
            ]
        );
    }

    #[test]
    fn repeated_elements_are_not_junk() {
        let a = vec!["x"; 300];
        let b = vec!["x"; 300];
        assert_eq!(SequenceMatcher::new(&a, &b).matched_len(), 300);
    }

    #[test]
    fn replay_produces_gap_opcodes() {
        let a = vec!["a", "b", "c", "d"];
        let b = vec!["a", "x", "c", "d", "e"];
        let mut capture = Capture::new();
        SequenceMatcher::new(&a, &b).replay(&mut capture).unwrap();
        let tags: Vec<_> = capture
            .into_ops()
            .iter()
            .map(DiffOp::as_tag_tuple)
            .collect();
        assert_eq!(
            tags,
            vec![
                (DiffTag::Equal, 0..1, 0..1),
                (DiffTag::Replace, 1..2, 1..2),
                (DiffTag::Equal, 2..4, 2..4),
                (DiffTag::Insert, 4..4, 4..5),
            ]
        );
    }

    #[test]
    fn replay_of_empty_inputs_is_empty() {
        let a: Vec<&str> = Vec::new();
        let mut capture = Capture::new();
        SequenceMatcher::new(&a, &a).replay(&mut capture).unwrap();
        assert!(capture.into_ops().is_empty());
    }
}
