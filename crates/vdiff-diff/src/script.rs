//! Edit scripts: the structured result of a diff.

use std::ops::Range;

/// What a [`DiffOp`] does to its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiffTag {
    /// Present only in `a`.
    Delete,
    /// Present only in `b`.
    Insert,
    /// Present in both.
    Equal,
}

/// Whether a script's ops hold whole lines or character runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Granularity {
    Line,
    Char,
}

/// A single operation of an edit script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffOp {
    pub tag: DiffTag,
    /// One line (without its terminator) or a run of characters.
    pub text: String,
    /// Position in the source sequence: `a` for `Delete` and `Equal`,
    /// `b` for `Insert`. Counted in lines or characters.
    pub offset: usize,
    /// Byte ranges of `text` that differ from the paired line on the other
    /// side. Only set on changed lines when inline highlighting is enabled.
    pub highlights: Vec<Range<usize>>,
}

impl DiffOp {
    pub fn new(tag: DiffTag, text: impl Into<String>, offset: usize) -> Self {
        Self {
            tag,
            text: text.into(),
            offset,
            highlights: Vec::new(),
        }
    }

    pub fn is_equal(&self) -> bool {
        self.tag == DiffTag::Equal
    }

    /// Returns `true` if this op contributes to side `a`.
    pub fn in_a(&self) -> bool {
        self.tag != DiffTag::Insert
    }

    /// Returns `true` if this op contributes to side `b`.
    pub fn in_b(&self) -> bool {
        self.tag != DiffTag::Delete
    }
}

/// Number of deleted (`a`) and inserted (`b`) ops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeCounts {
    pub a: usize,
    pub b: usize,
}

impl ChangeCounts {
    pub fn is_empty(&self) -> bool {
        self.a == 0 && self.b == 0
    }
}

/// An ordered sequence of [`DiffOp`]s.
///
/// # Invariants
///
/// - The `Delete` and `Equal` texts, in order, reconstruct `a`; the
///   `Insert` and `Equal` texts reconstruct `b`. Line scripts re-join with
///   `\n`, character scripts concatenate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditScript {
    granularity: Granularity,
    ops: Vec<DiffOp>,
}

impl EditScript {
    /// An empty script.
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            ops: Vec::new(),
        }
    }

    pub fn from_ops(granularity: Granularity, ops: Vec<DiffOp>) -> Self {
        Self { granularity, ops }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    pub(crate) fn ops_mut(&mut self) -> &mut [DiffOp] {
        &mut self.ops
    }

    pub fn into_ops(self) -> Vec<DiffOp> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: DiffOp) {
        self.ops.push(op);
    }

    /// Count deleted and inserted ops.
    pub fn counts(&self) -> ChangeCounts {
        self.ops
            .iter()
            .fold(ChangeCounts::default(), |mut counts, op| {
                match op.tag {
                    DiffTag::Delete => counts.a += 1,
                    DiffTag::Insert => counts.b += 1,
                    DiffTag::Equal => {}
                }
                counts
            })
    }

    /// Returns `true` if any op is not `Equal`.
    pub fn has_changes(&self) -> bool {
        self.ops.iter().any(|op| !op.is_equal())
    }

    /// Rebuild side `a` from the script.
    pub fn reconstruct_a(&self) -> String {
        self.reconstruct(DiffOp::in_a)
    }

    /// Rebuild side `b` from the script.
    pub fn reconstruct_b(&self) -> String {
        self.reconstruct(DiffOp::in_b)
    }

    fn reconstruct(&self, keep: fn(&DiffOp) -> bool) -> String {
        let parts = self.ops.iter().filter(|op| keep(op)).map(|op| op.text.as_str());
        match self.granularity {
            Granularity::Line => parts.collect::<Vec<_>>().join("\n"),
            Granularity::Char => parts.collect(),
        }
    }

    /// Recompute every op's offset from the texts of the ops before it.
    pub fn reindex(&mut self) {
        let (mut a, mut b) = (0usize, 0usize);
        let granularity = self.granularity;
        let size = |text: &str| match granularity {
            Granularity::Line => 1,
            Granularity::Char => text.chars().count(),
        };
        for op in &mut self.ops {
            let n = size(&op.text);
            match op.tag {
                DiffTag::Delete => {
                    op.offset = a;
                    a += n;
                }
                DiffTag::Insert => {
                    op.offset = b;
                    b += n;
                }
                DiffTag::Equal => {
                    op.offset = a;
                    a += n;
                    b += n;
                }
            }
        }
    }
}
