//! Unified rendering of line-level edit scripts.
//!
//! Output is a two-line header naming both sides, a blank line, and one line
//! per op: `- ` for `a`, `+ ` for `b`, two spaces for common lines. Unless
//! `expand` is set, long runs of common lines are cut down to
//! `context_lines` around each change and every hunk gets an
//! `@@ -a,n +b,m @@` header.

use tracing::trace;

use crate::formatter::Role;
use crate::lines::diff_lines_raw;
use crate::options::DiffOptions;
use crate::script::{ChangeCounts, DiffOp, DiffTag, EditScript, Granularity};

/// Line range of one hunk, zero-based and end-exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Hunk {
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

impl Hunk {
    fn at(a: usize, b: usize) -> Self {
        Self {
            a_start: a,
            a_end: a,
            b_start: b,
            b_end: b,
        }
    }

    fn advance(&mut self, tag: DiffTag) {
        match tag {
            DiffTag::Delete => self.a_end += 1,
            DiffTag::Insert => self.b_end += 1,
            DiffTag::Equal => {
                self.a_end += 1;
                self.b_end += 1;
            }
        }
    }
}

enum Row<'a> {
    Mark(Hunk),
    Line(&'a DiffOp),
}

/// Render an edit script as a unified diff.
///
/// Character-level scripts are rebuilt into line scripts first.
pub fn render(script: &EditScript, options: &DiffOptions) -> String {
    if script.granularity() == Granularity::Char {
        let lines = diff_lines_raw(&script.reconstruct_a(), &script.reconstruct_b(), options);
        return render(&lines.script, options);
    }

    let ops = script.ops();
    let rows: Vec<Row<'_>> = if options.expand {
        ops.iter().map(Row::Line).collect()
    } else {
        windowed_rows(ops, options.context_lines)
    };

    let last = rows.len().saturating_sub(1);
    let mut body: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(j, row)| match row {
            Row::Mark(hunk) => print_patch_mark(hunk, options),
            Row::Line(op) => print_op(op, j == 0 || j == last, options),
        })
        .collect();

    if options.truncate_threshold > 0 && body.len() > options.truncate_threshold {
        trace!(
            lines = body.len(),
            threshold = options.truncate_threshold,
            "truncating diff"
        );
        body.truncate(options.truncate_threshold);
        body.push(options.truncate_annotation.clone());
    }

    let mut out = print_header(script.counts(), options);
    out.push_str(&body.join("\n"));
    out
}

fn print_header(counts: ChangeCounts, options: &DiffOptions) -> String {
    if options.omit_annotation_lines {
        return String::new();
    }

    let mut a_line = format!("{} {}", options.a_indicator, options.a_annotation);
    let mut b_line = format!("{} {}", options.b_indicator, options.b_annotation);

    if options.include_change_counts {
        let a_count = counts.a.to_string();
        let b_count = counts.b.to_string();
        let a_width = options.a_annotation.chars().count();
        let b_width = options.b_annotation.chars().count();
        let pad = |n: usize| " ".repeat(n);

        a_line.push_str(&format!(
            "{}  {} {}{}",
            pad(b_width.saturating_sub(a_width)),
            options.a_indicator,
            pad(b_count.len().saturating_sub(a_count.len())),
            a_count
        ));
        b_line.push_str(&format!(
            "{}  {} {}{}",
            pad(a_width.saturating_sub(b_width)),
            options.b_indicator,
            pad(a_count.len().saturating_sub(b_count.len())),
            b_count
        ));
    }

    let f = &options.formatter;
    format!(
        "{}\n{}\n\n",
        f.decorate(&a_line, Role::Removal),
        f.decorate(&b_line, Role::Addition)
    )
}

/// Whether windowing omits any common line.
fn has_omissions(ops: &[DiffOp], context: usize) -> bool {
    let mut i = 0;
    while i < ops.len() {
        let start = i;
        while i < ops.len() && ops[i].is_equal() {
            i += 1;
        }
        let limit = if start == 0 || i == ops.len() {
            context
        } else {
            context.saturating_mul(2)
        };
        if i - start > limit {
            return true;
        }
        while i < ops.len() && !ops[i].is_equal() {
            i += 1;
        }
    }
    false
}

/// Keep `context` common lines around each change. When something is
/// omitted, each hunk starts with a mark row.
fn windowed_rows(ops: &[DiffOp], context: usize) -> Vec<Row<'_>> {
    let n = ops.len();
    let has_patch = has_omissions(ops, context);
    let mut rows = Vec::new();
    let mut mark = 0;
    if has_patch {
        rows.push(Row::Mark(Hunk::default()));
    }

    let mut hunk = Hunk::default();
    let mut i = 0;
    while i < n {
        let start = i;
        while i < n && ops[i].is_equal() {
            i += 1;
        }
        let common = &ops[start..i];

        if start == 0 {
            let skip = common.len().saturating_sub(context);
            hunk = Hunk::at(skip, skip);
            for op in &common[skip..] {
                rows.push(Row::Line(op));
                hunk.advance(DiffTag::Equal);
            }
        } else if i == n {
            for op in common.iter().take(context) {
                rows.push(Row::Line(op));
                hunk.advance(DiffTag::Equal);
            }
        } else if common.len() > context.saturating_mul(2) {
            for op in &common[..context] {
                rows.push(Row::Line(op));
                hunk.advance(DiffTag::Equal);
            }
            rows[mark] = Row::Mark(hunk);
            mark = rows.len();
            rows.push(Row::Mark(Hunk::default()));

            let omitted = common.len() - 2 * context;
            hunk = Hunk::at(hunk.a_end + omitted, hunk.b_end + omitted);
            for op in &common[common.len() - context..] {
                rows.push(Row::Line(op));
                hunk.advance(DiffTag::Equal);
            }
        } else {
            for op in common {
                rows.push(Row::Line(op));
                hunk.advance(DiffTag::Equal);
            }
        }

        while i < n && !ops[i].is_equal() {
            rows.push(Row::Line(&ops[i]));
            hunk.advance(ops[i].tag);
            i += 1;
        }
    }

    if has_patch {
        rows[mark] = Row::Mark(hunk);
    }
    rows
}

fn print_patch_mark(hunk: &Hunk, options: &DiffOptions) -> String {
    let mark = format!(
        "@@ -{},{} +{},{} @@",
        hunk.a_start + 1,
        hunk.a_end - hunk.a_start,
        hunk.b_start + 1,
        hunk.b_end - hunk.b_start
    );
    options.formatter.decorate(&mark, Role::Patch)
}

fn print_op(op: &DiffOp, first_or_last: bool, options: &DiffOptions) -> String {
    let (indicator, role) = match op.tag {
        DiffTag::Delete => (options.a_indicator.as_str(), Role::Removal),
        DiffTag::Insert => (options.b_indicator.as_str(), Role::Addition),
        DiffTag::Equal => (options.common_indicator.as_str(), Role::Neutral),
    };
    let f = &options.formatter;

    if op.text.is_empty() {
        if indicator != " " {
            return f.decorate(indicator, role);
        }
        let placeholder = &options.empty_first_or_last_line_placeholder;
        if first_or_last && !placeholder.is_empty() {
            return f.decorate(&format!("{indicator} {placeholder}"), role);
        }
        return String::new();
    }

    let text = if op.is_equal() {
        op.text.clone()
    } else {
        decorate_changed_text(op, options)
    };
    f.decorate(&format!("{indicator} {text}"), role)
}

/// Apply inline highlights and mark trailing whitespace.
fn decorate_changed_text(op: &DiffOp, options: &DiffOptions) -> String {
    let f = &options.formatter;
    let text = op.text.as_str();
    let content_end = text.trim_end().len();

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for range in &op.highlights {
        let start = range.start.clamp(pos, content_end);
        let end = range.end.min(content_end);
        if start >= end {
            continue;
        }
        let (Some(before), Some(changed)) = (text.get(pos..start), text.get(start..end)) else {
            continue;
        };
        out.push_str(before);
        out.push_str(&f.decorate(changed, Role::Change));
        pos = end;
    }
    out.push_str(text.get(pos..content_end).unwrap_or_default());
    out.push_str(&f.decorate(&text[content_end..], Role::TrailingWhitespace));
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::formatter::Formatter;
    use crate::lines::diff_lines_unified;

    /// Wraps each role in a visible tag.
    #[derive(Debug)]
    struct Tagging;

    impl Formatter for Tagging {
        fn decorate(&self, text: &str, role: Role) -> String {
            if text.is_empty() {
                return String::new();
            }
            let tag = match role {
                Role::Addition => "add",
                Role::Removal => "del",
                Role::Neutral => "dim",
                Role::TrailingWhitespace => "ws",
                Role::Change => "chg",
                Role::Patch => "at",
            };
            format!("<{tag}>{text}</{tag}>")
        }
    }

    fn numbered(n: usize, changed: Option<usize>) -> String {
        (1..=n)
            .map(|i| {
                if Some(i) == changed {
                    format!("changed {i}")
                } else {
                    format!("line {i}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn expanded_diff_with_header() {
        let out = diff_lines_unified("a\nb\nc", "a\nx\nc", &DiffOptions::plain());
        assert_eq!(out, "- Expected\n+ Received\n\n  a\n- b\n+ x\n  c");
    }

    #[test]
    fn change_counts_are_aligned() {
        let options = DiffOptions {
            include_change_counts: true,
            a_annotation: "Snapshot".into(),
            ..DiffOptions::plain()
        };
        let a = numbered(12, None);
        let b = "line 1".to_string();
        let out = diff_lines_unified(&a, &b, &options);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("- Snapshot  - 11"));
        assert_eq!(lines.next(), Some("+ Received  +  0"));
    }

    #[test]
    fn omitted_header() {
        let options = DiffOptions {
            omit_annotation_lines: true,
            ..DiffOptions::plain()
        };
        assert_eq!(diff_lines_unified("a", "b", &options), "- a\n+ b");
    }

    #[test]
    fn context_window_around_single_change() {
        let options = DiffOptions {
            expand: false,
            context_lines: 2,
            omit_annotation_lines: true,
            ..DiffOptions::plain()
        };
        let out = diff_lines_unified(&numbered(100, None), &numbered(100, Some(50)), &options);
        assert_eq!(
            out,
            "@@ -48,5 +48,5 @@\n  line 48\n  line 49\n- line 50\n+ changed 50\n  line 51\n  line 52"
        );
    }

    #[test]
    fn separate_hunks_for_distant_changes() {
        let options = DiffOptions {
            expand: false,
            context_lines: 1,
            omit_annotation_lines: true,
            highlight_changes: false,
            ..DiffOptions::plain()
        };
        let a = "a\nb\nc\nd\ne\nf\ng";
        let b = "A\nb\nc\nd\ne\nf\nG";
        let out = diff_lines_unified(a, b, &options);
        assert_eq!(
            out,
            "@@ -1,2 +1,2 @@\n- a\n+ A\n  b\n@@ -6,2 +6,2 @@\n  f\n- g\n+ G"
        );
    }

    #[test]
    fn short_gaps_stay_in_one_hunk() {
        let options = DiffOptions {
            expand: false,
            context_lines: 2,
            omit_annotation_lines: true,
            ..DiffOptions::plain()
        };
        let out = diff_lines_unified("a\nb\nc\nd", "x\nb\nc\ny", &options);
        assert_eq!(out, "- a\n+ x\n  b\n  c\n- d\n+ y");
    }

    #[test]
    fn empty_lines() {
        let options = DiffOptions {
            omit_annotation_lines: true,
            ..DiffOptions::plain()
        };
        assert_eq!(diff_lines_unified("\nx", "\ny", &options), "\n- x\n+ y");

        let options = DiffOptions {
            empty_first_or_last_line_placeholder: "↵".into(),
            ..options
        };
        assert_eq!(diff_lines_unified("\nx", "\ny", &options), "  ↵\n- x\n+ y");
        assert_eq!(diff_lines_unified("a", "", &options), "- a");
        assert_eq!(diff_lines_unified("a\n", "b\n", &options), "- a\n+ b\n  ↵");
        assert_eq!(diff_lines_unified("", "\n", &options), "+\n+");
    }

    #[test]
    fn truncation_keeps_threshold_lines() {
        let options = DiffOptions {
            truncate_threshold: 3,
            omit_annotation_lines: true,
            ..DiffOptions::plain()
        };
        let out = diff_lines_unified("a\nb\nc\nd", "a\nx\ny\nd", &options);
        assert_eq!(out, "  a\n- b\n- c\n... Diff result is truncated");
    }

    #[test]
    fn roles_are_applied() {
        let options = DiffOptions {
            formatter: Arc::new(Tagging),
            ..DiffOptions::default()
        };
        let out = diff_lines_unified("total: 1 ", "total: 2", &options);
        assert_eq!(
            out,
            "<del>- Expected</del>\n<add>+ Received</add>\n\n\
             <del>- total: <chg>1</chg><ws> </ws></del>\n\
             <add>+ total: <chg>2</chg></add>"
        );
    }

    #[test]
    fn char_scripts_render_by_line() {
        let chars = crate::lines::diff_strings_raw("a\nb", "a\nc", true);
        let options = DiffOptions {
            omit_annotation_lines: true,
            ..DiffOptions::plain()
        };
        assert_eq!(render(&chars, &options), "  a\n- b\n+ c");
    }
}
