//! Block alignment over two normalized line sequences.
//!
//! Produces `similar` opcodes (equal / replace / insert / delete) from the
//! Ratcliff/Obershelp matcher and checks that they tile both sequences
//! left to right with no gap or overlap.

use std::ops::Range;

use similar::algorithms::DiffHook;
use similar::DiffOp;
use trackdiff_types::Line;

use crate::error::{DiffError, DiffResult};
use crate::matcher::SequenceMatcher;

/// Align two line sequences by their normalized text.
pub fn align(one: &[Line], two: &[Line]) -> DiffResult<Vec<DiffOp>> {
    let one_keys: Vec<&str> = one.iter().map(|l| l.normalized.as_str()).collect();
    let two_keys: Vec<&str> = two.iter().map(|l| l.normalized.as_str()).collect();

    let mut log = OpcodeLog::new(one.len(), two.len());
    SequenceMatcher::new(&one_keys, &two_keys).replay(&mut log)?;
    Ok(log.ops)
}

/// Collects opcodes and rejects any that break the tiling contract.
struct OpcodeLog {
    ops: Vec<DiffOp>,
    one_len: usize,
    two_len: usize,
    one_at: usize,
    two_at: usize,
}

impl OpcodeLog {
    fn new(one_len: usize, two_len: usize) -> Self {
        Self {
            ops: Vec::new(),
            one_len,
            two_len,
            one_at: 0,
            two_at: 0,
        }
    }

    fn push(&mut self, tag: &'static str, op: DiffOp) -> DiffResult<()> {
        let (one, two) = (op.old_range(), op.new_range());
        let fits = |r: &Range<usize>, at: usize, len: usize| r.start == at && r.end <= len;
        if !fits(&one, self.one_at, self.one_len) || !fits(&two, self.two_at, self.two_len) {
            return Err(DiffError::InconsistentAlignment {
                tag,
                one,
                two,
                expected_one: self.one_at,
                expected_two: self.two_at,
            });
        }
        self.one_at = one.end;
        self.two_at = two.end;
        self.ops.push(op);
        Ok(())
    }
}

impl DiffHook for OpcodeLog {
    type Error = DiffError;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> DiffResult<()> {
        self.push(
            "equal",
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            },
        )
    }

    fn delete(&mut self, old_index: usize, old_len: usize, new_index: usize) -> DiffResult<()> {
        self.push(
            "delete",
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            },
        )
    }

    fn insert(&mut self, old_index: usize, new_index: usize, new_len: usize) -> DiffResult<()> {
        self.push(
            "insert",
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            },
        )
    }

    fn replace(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> DiffResult<()> {
        self.push(
            "replace",
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            },
        )
    }

    fn finish(&mut self) -> DiffResult<()> {
        if self.one_at != self.one_len || self.two_at != self.two_len {
            return Err(DiffError::IncompleteAlignment {
                one: self.one_at,
                two: self.two_at,
                one_len: self.one_len,
                two_len: self.two_len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use similar::DiffTag;

    use super::*;
    use crate::extract::extract_lines;

    fn tags(one: &[&str], two: &[&str]) -> Vec<(DiffTag, Range<usize>, Range<usize>)> {
        let one = extract_lines(one.iter().copied());
        let two = extract_lines(two.iter().copied());
        align(&one, &two)
            .unwrap()
            .iter()
            .map(DiffOp::as_tag_tuple)
            .collect()
    }

    #[test]
    fn identical_tracks_align_as_one_equal_run() {
        let t = tags(&["a", "b", "c"], &["a", "b", "c"]);
        assert_eq!(t, vec![(DiffTag::Equal, 0..3, 0..3)]);
    }

    #[test]
    fn empty_tracks_produce_no_ops() {
        assert!(tags(&[], &[]).is_empty());
        assert_eq!(tags(&["a"], &[]), vec![(DiffTag::Delete, 0..1, 0..0)]);
        assert_eq!(tags(&[], &["a", "b"]), vec![(DiffTag::Insert, 0..0, 0..2)]);
    }

    #[test]
    fn alignment_uses_normalized_text() {
        let t = tags(&["- What?", "a  b"], &["What?", "a b"]);
        assert_eq!(t, vec![(DiffTag::Equal, 0..2, 0..2)]);
    }

    #[test]
    fn gaps_become_replace_insert_delete() {
        let t = tags(&["a", "x", "c", "gone"], &["a", "y", "z", "c"]);
        assert_eq!(
            t,
            vec![
                (DiffTag::Equal, 0..1, 0..1),
                (DiffTag::Replace, 1..2, 1..3),
                (DiffTag::Equal, 2..3, 3..4),
                (DiffTag::Delete, 3..4, 4..4),
            ]
        );
    }

    #[test]
    fn out_of_order_op_is_rejected() {
        let mut log = OpcodeLog::new(2, 2);
        log.equal(0, 0, 1).unwrap();
        let err = log.equal(0, 0, 1).unwrap_err();
        assert!(matches!(
            err,
            DiffError::InconsistentAlignment {
                tag: "equal",
                expected_one: 1,
                ..
            }
        ));
    }

    #[test]
    fn short_alignment_is_rejected_on_finish() {
        let mut log = OpcodeLog::new(2, 1);
        log.equal(0, 0, 1).unwrap();
        assert!(matches!(
            log.finish(),
            Err(DiffError::IncompleteAlignment { one: 1, one_len: 2, .. })
        ));
    }
}
