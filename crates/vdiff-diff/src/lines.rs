//! Line-level diffing with inline refinement of changed lines.

use std::ops::Range;

use tracing::debug;

use crate::cleanup::cleanup_semantic;
use crate::myers::{diff_slices, edit_distance, Run};
use crate::options::DiffOptions;
use crate::render::render;
use crate::script::{ChangeCounts, DiffOp, DiffTag, EditScript, Granularity};

/// A line-level edit script and its change counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDiff {
    pub script: EditScript,
    pub counts: ChangeCounts,
}

impl LineDiff {
    fn new(script: EditScript) -> Self {
        let counts = script.counts();
        Self { script, counts }
    }
}

/// Split on `\n`. The empty string has no lines; a trailing `\n` yields a
/// final empty line so that joining with `\n` restores the input.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Diff two strings line by line, returning the structured result.
pub fn diff_lines_raw(a: &str, b: &str, options: &DiffOptions) -> LineDiff {
    let a_lines = split_lines(a);
    let b_lines = split_lines(b);
    let runs = diff_slices(&a_lines, &b_lines);
    debug!(
        a_lines = a_lines.len(),
        b_lines = b_lines.len(),
        distance = edit_distance(&runs),
        "diffed lines"
    );

    let mut script = line_script(&runs, &a_lines, &b_lines);
    if options.highlight_changes {
        refine_changes(&mut script);
    }
    LineDiff::new(script)
}

/// Diff two strings line by line and render the result.
pub fn diff_lines_unified(a: &str, b: &str, options: &DiffOptions) -> String {
    render(&diff_lines_raw(a, b, options).script, options)
}

/// Compare one pair of forms but display another.
///
/// The `compare` forms decide which lines match; the `display` forms supply
/// the printed text. This only works when each display form has as many
/// lines as its compare form. Otherwise the display forms are diffed
/// directly.
pub(crate) fn diff_lines_display(
    a_display: &str,
    b_display: &str,
    a_compare: &str,
    b_compare: &str,
    options: &DiffOptions,
) -> LineDiff {
    let a_shown = split_lines(a_display);
    let b_shown = split_lines(b_display);
    let a_cmp = split_lines(a_compare);
    let b_cmp = split_lines(b_compare);

    if a_shown.len() != a_cmp.len() || b_shown.len() != b_cmp.len() {
        debug!("display and compare forms differ in line count; diffing display forms");
        return diff_lines_raw(a_display, b_display, options);
    }

    let runs = diff_slices(&a_cmp, &b_cmp);
    let mut script = line_script(&runs, &a_shown, &b_shown);
    if options.highlight_changes {
        refine_changes(&mut script);
    }
    LineDiff::new(script)
}

/// Diff two strings character by character.
///
/// With `cleanup` the raw script is passed through
/// [`cleanup_semantic`](crate::cleanup::cleanup_semantic).
pub fn diff_strings_raw(a: &str, b: &str, cleanup: bool) -> EditScript {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let runs = diff_slices(&a_chars, &b_chars);

    let ops = runs
        .iter()
        .map(|run| {
            let (source, start) = match run.tag {
                DiffTag::Insert => (&b_chars, run.b_start),
                DiffTag::Delete | DiffTag::Equal => (&a_chars, run.a_start),
            };
            let text: String = source[start..start + run.len].iter().collect();
            DiffOp::new(run.tag, text, start)
        })
        .collect();
    let script = EditScript::from_ops(Granularity::Char, ops);

    if cleanup {
        cleanup_semantic(&script)
    } else {
        script
    }
}

/// One op per line. Equal lines take their text from `b`.
fn line_script(runs: &[Run], a: &[&str], b: &[&str]) -> EditScript {
    let mut script = EditScript::new(Granularity::Line);
    for run in runs {
        for i in 0..run.len {
            let op = match run.tag {
                DiffTag::Delete => DiffOp::new(DiffTag::Delete, a[run.a_start + i], run.a_start + i),
                DiffTag::Insert => DiffOp::new(DiffTag::Insert, b[run.b_start + i], run.b_start + i),
                DiffTag::Equal => DiffOp::new(DiffTag::Equal, b[run.b_start + i], run.a_start + i),
            };
            script.push(op);
        }
    }
    script
}

/// Blocks whose two sides together exceed this many bytes are refined one
/// line pair at a time.
const BLOCK_REFINE_LIMIT: usize = 4096;

/// Mark changed characters on each deleted/inserted block.
///
/// A block is a run of deleted lines followed by a run of inserted lines.
/// Small blocks are diffed as whole texts so that edits crossing line breaks
/// still line up. Larger blocks pair the i-th deleted line with the i-th
/// inserted line, and pairs above the limit stay unmarked.
fn refine_changes(script: &mut EditScript) {
    let ops = script.ops_mut();
    let mut i = 0;
    while i < ops.len() {
        if ops[i].tag != DiffTag::Delete {
            i += 1;
            continue;
        }
        let deleted = i;
        while i < ops.len() && ops[i].tag == DiffTag::Delete {
            i += 1;
        }
        let inserted = i;
        while i < ops.len() && ops[i].tag == DiffTag::Insert {
            i += 1;
        }
        if inserted == i {
            continue;
        }

        let (dels, ins) = ops[deleted..i].split_at_mut(inserted - deleted);
        if block_len(dels) + block_len(ins) <= BLOCK_REFINE_LIMIT {
            refine_block(dels, ins);
        } else {
            debug!(
                deleted = dels.len(),
                inserted = ins.len(),
                "changed block too large; refining line pairs"
            );
            for (del, ins) in dels.iter_mut().zip(ins.iter_mut()) {
                if del.text.len() + ins.text.len() <= BLOCK_REFINE_LIMIT {
                    refine_block(std::slice::from_mut(del), std::slice::from_mut(ins));
                }
            }
        }
    }
}

/// Joined length of a block's lines, separators included.
fn block_len(ops: &[DiffOp]) -> usize {
    ops.iter().map(|op| op.text.len() + 1).sum()
}

/// Blocks whose sides share nothing but whitespace are left unmarked;
/// highlighting every character would add noise.
fn refine_block(dels: &mut [DiffOp], ins: &mut [DiffOp]) {
    let a_text = join_texts(dels);
    let b_text = join_texts(ins);
    let chars = diff_strings_raw(&a_text, &b_text, true);

    let shares_content = chars
        .ops()
        .iter()
        .any(|op| op.is_equal() && !op.text.trim().is_empty());
    if shares_content {
        mark_side(chars.ops(), DiffTag::Delete, dels);
        mark_side(chars.ops(), DiffTag::Insert, ins);
    }
}

fn join_texts(ops: &[DiffOp]) -> String {
    ops.iter().map(|op| op.text.as_str()).collect::<Vec<_>>().join("\n")
}

/// Project the `side` segments of a character script onto its lines.
fn mark_side(chars: &[DiffOp], side: DiffTag, lines: &mut [DiffOp]) {
    let (mut line, mut pos) = (0usize, 0usize);
    for op in chars {
        let on_side = match side {
            DiffTag::Delete => op.in_a(),
            _ => op.in_b(),
        };
        if !on_side {
            continue;
        }
        for (n, piece) in op.text.split('\n').enumerate() {
            if n > 0 {
                line += 1;
                pos = 0;
            }
            if op.tag == side && !piece.is_empty() {
                if let Some(target) = lines.get_mut(line) {
                    push_range(&mut target.highlights, pos..pos + piece.len());
                }
            }
            pos += piece.len();
        }
    }
}

fn push_range(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    match ranges.last_mut() {
        Some(last) if last.end == range.start => last.end = range.end,
        _ => ranges.push(range),
    }
}
