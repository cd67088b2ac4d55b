//! Shortest edit script over arbitrary sequences.
//!
//! The search itself is `similar`'s linear-space Myers. This module folds its
//! callbacks into maximal runs; inside each change region every deletion
//! precedes every insertion.

use std::convert::Infallible;

use similar::algorithms::{myers, DiffHook};
use tracing::trace;

use crate::script::DiffTag;

/// A maximal run of one tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub tag: DiffTag,
    /// Start in `a`. For insertions, the position in `a` they follow.
    pub a_start: usize,
    /// Start in `b`. For deletions, the position in `b` they precede.
    pub b_start: usize,
    pub len: usize,
}

/// Compute the shortest edit script turning `a` into `b`.
pub fn diff_slices<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Run> {
    let mut builder = RunBuilder::default();
    if let Err(never) = myers::diff(&mut builder, a, 0..a.len(), b, 0..b.len()) {
        match never {}
    }
    let runs = builder.runs;
    trace!(
        distance = edit_distance(&runs),
        a_len = a.len(),
        b_len = b.len(),
        "myers search complete"
    );
    runs
}

/// Number of non-equal elements in a run list.
pub fn edit_distance(runs: &[Run]) -> usize {
    runs.iter()
        .filter(|run| run.tag != DiffTag::Equal)
        .map(|run| run.len)
        .sum()
}

/// Folds diff callbacks into maximal runs, deletions before insertions.
#[derive(Default)]
struct RunBuilder {
    runs: Vec<Run>,
    a_pos: usize,
    b_pos: usize,
    deleted: usize,
    inserted: usize,
}

impl RunBuilder {
    fn flush(&mut self) {
        if self.deleted > 0 {
            self.runs.push(Run {
                tag: DiffTag::Delete,
                a_start: self.a_pos,
                b_start: self.b_pos,
                len: self.deleted,
            });
            self.a_pos += self.deleted;
        }
        if self.inserted > 0 {
            self.runs.push(Run {
                tag: DiffTag::Insert,
                a_start: self.a_pos,
                b_start: self.b_pos,
                len: self.inserted,
            });
            self.b_pos += self.inserted;
        }
        self.deleted = 0;
        self.inserted = 0;
    }
}

impl DiffHook for RunBuilder {
    type Error = Infallible;

    fn equal(&mut self, _old: usize, _new: usize, len: usize) -> Result<(), Infallible> {
        if len == 0 {
            return Ok(());
        }
        self.flush();
        match self.runs.last_mut() {
            Some(last) if last.tag == DiffTag::Equal => last.len += len,
            _ => self.runs.push(Run {
                tag: DiffTag::Equal,
                a_start: self.a_pos,
                b_start: self.b_pos,
                len,
            }),
        }
        self.a_pos += len;
        self.b_pos += len;
        Ok(())
    }

    fn delete(&mut self, _old: usize, old_len: usize, _new: usize) -> Result<(), Infallible> {
        self.deleted += old_len;
        Ok(())
    }

    fn insert(&mut self, _old: usize, _new: usize, new_len: usize) -> Result<(), Infallible> {
        self.inserted += new_len;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Infallible> {
        self.flush();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn tags(runs: &[Run]) -> Vec<(DiffTag, usize)> {
        runs.iter().map(|r| (r.tag, r.len)).collect()
    }

    #[test]
    fn identical_sequences_are_one_equal_run() {
        let runs = diff_slices(&chars("abc"), &chars("abc"));
        assert_eq!(tags(&runs), vec![(DiffTag::Equal, 3)]);
        assert_eq!(edit_distance(&runs), 0);
    }

    #[test]
    fn empty_inputs() {
        assert!(diff_slices::<char>(&[], &[]).is_empty());
        let runs = diff_slices(&[], &chars("ab"));
        assert_eq!(tags(&runs), vec![(DiffTag::Insert, 2)]);
        let runs = diff_slices(&chars("ab"), &[]);
        assert_eq!(tags(&runs), vec![(DiffTag::Delete, 2)]);
    }

    #[test]
    fn single_substitution_deletes_before_inserting() {
        let a = ["a", "b", "c"];
        let b = ["a", "x", "c"];
        let runs = diff_slices(&a, &b);
        assert_eq!(
            runs,
            vec![
                Run { tag: DiffTag::Equal, a_start: 0, b_start: 0, len: 1 },
                Run { tag: DiffTag::Delete, a_start: 1, b_start: 1, len: 1 },
                Run { tag: DiffTag::Insert, a_start: 2, b_start: 1, len: 1 },
                Run { tag: DiffTag::Equal, a_start: 2, b_start: 2, len: 1 },
            ]
        );
    }

    #[test]
    fn classic_example_has_distance_five() {
        // The example from Myers' paper.
        let runs = diff_slices(&chars("ABCABBA"), &chars("CBABAC"));
        assert_eq!(edit_distance(&runs), 5);
    }

    #[test]
    fn runs_cover_both_inputs() {
        let a = chars("the quick brown fox");
        let b = chars("a quick brown cat");
        let runs = diff_slices(&a, &b);
        let a_len: usize = runs.iter().filter(|r| r.tag != DiffTag::Insert).map(|r| r.len).sum();
        let b_len: usize = runs.iter().filter(|r| r.tag != DiffTag::Delete).map(|r| r.len).sum();
        assert_eq!(a_len, a.len());
        assert_eq!(b_len, b.len());
        for pair in runs.windows(2) {
            assert!(!(pair[0].tag == DiffTag::Equal && pair[1].tag == DiffTag::Equal));
        }
    }

    #[test]
    fn large_disjoint_inputs_finish() {
        let a: Vec<String> = (0..2000).map(|i| format!("alpha {i} q")).collect();
        let b: Vec<String> = (0..2000).map(|i| format!("omega {} z", 7 * i + 3)).collect();
        let runs = diff_slices(&a, &b);
        assert_eq!(tags(&runs), vec![(DiffTag::Delete, 2000), (DiffTag::Insert, 2000)]);
    }
}
