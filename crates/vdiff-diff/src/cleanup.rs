//! Semantic cleanup of character-level edit scripts.
//!
//! A raw shortest edit script is minimal but often unreadable: it matches
//! stray letters inside otherwise unrelated words. Cleanup trades
//! minimality for legibility while keeping the reconstruction invariant.
//!
//! One pass runs, in order:
//!
//! 1. merge: join same-tag neighbours, drop empty ops, factor the common
//!    prefix and suffix of each deletion/insertion pair into equalities,
//!    and slide single edits over an identical neighbour;
//! 2. equality elimination: an equality no longer than the largest edit on
//!    each side of it is folded into the surrounding change;
//! 3. boundary alignment: edits between two equalities slide to the most
//!    natural boundary (blank line, line break, sentence end, whitespace,
//!    punctuation);
//! 4. overlap extraction: a deletion/insertion pair that overlaps by at
//!    least half of either text is split around the overlap. If the
//!    insertion's tail overlaps the deletion's head, the pair is emitted
//!    insertion first.
//!
//! Passes repeat until the script stops changing, so the result is a fixed
//! point of the pass and `cleanup_semantic` is idempotent.

use tracing::trace;

use crate::script::{DiffOp, DiffTag, EditScript, Granularity};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Chunk {
    tag: DiffTag,
    chars: Vec<char>,
}

impl Chunk {
    fn new(tag: DiffTag, chars: Vec<char>) -> Self {
        Self { tag, chars }
    }
}

/// Rewrite a character-level script for legibility.
///
/// Line-level scripts are returned unchanged: their ops are already whole
/// lines.
pub fn cleanup_semantic(script: &EditScript) -> EditScript {
    if script.granularity() == Granularity::Line {
        return script.clone();
    }

    let chunks: Vec<Chunk> = script
        .ops()
        .iter()
        .map(|op| Chunk::new(op.tag, op.text.chars().collect()))
        .collect();

    // Iterate whole passes until one repeats. A repeat of the last state is
    // a fixed point; anything else is a cycle, resolved to a canonical member
    // so that re-running the cleanup on it lands on the same cycle and member.
    let mut history: Vec<Vec<Chunk>> = vec![chunks];
    let chunks = loop {
        let mut next = history[history.len() - 1].clone();
        run_pass(&mut next);
        if let Some(start) = history.iter().position(|seen| *seen == next) {
            let cycle = history.split_off(start);
            trace!(
                passes = start + cycle.len(),
                cycle = cycle.len(),
                "semantic cleanup stable"
            );
            break canonical(cycle);
        }
        history.push(next);
    };

    let ops = chunks
        .into_iter()
        .map(|chunk| DiffOp::new(chunk.tag, chunk.chars.into_iter().collect::<String>(), 0))
        .collect();
    let mut cleaned = EditScript::from_ops(Granularity::Char, ops);
    cleaned.reindex();
    cleaned
}

fn run_pass(chunks: &mut Vec<Chunk>) {
    merge(chunks);
    eliminate_equalities(chunks);
    align_boundaries(chunks);
    extract_overlaps(chunks);
}

/// The member of a cycle with the most ops, ties broken by content.
fn canonical(cycle: Vec<Vec<Chunk>>) -> Vec<Chunk> {
    fn key(chunks: &[Chunk]) -> (usize, Vec<(u8, &[char])>) {
        let ops = chunks
            .iter()
            .map(|c| {
                let rank = match c.tag {
                    DiffTag::Delete => 0,
                    DiffTag::Equal => 1,
                    DiffTag::Insert => 2,
                };
                (rank, c.chars.as_slice())
            })
            .collect();
        (chunks.len(), ops)
    }
    cycle
        .into_iter()
        .reduce(|best, next| if key(&next) > key(&best) { next } else { best })
        .unwrap_or_default()
}

fn merge(chunks: &mut Vec<Chunk>) {
    chunks.retain(|c| !c.chars.is_empty());
    // Sentinel so the last change region gets flushed.
    chunks.push(Chunk::new(DiffTag::Equal, Vec::new()));

    let mut pointer = 0;
    let mut count_delete = 0;
    let mut count_insert = 0;
    let mut text_delete: Vec<char> = Vec::new();
    let mut text_insert: Vec<char> = Vec::new();

    while pointer < chunks.len() {
        match chunks[pointer].tag {
            DiffTag::Insert => {
                count_insert += 1;
                text_insert.extend_from_slice(&chunks[pointer].chars);
                pointer += 1;
            }
            DiffTag::Delete => {
                count_delete += 1;
                text_delete.extend_from_slice(&chunks[pointer].chars);
                pointer += 1;
            }
            DiffTag::Equal => {
                let region = count_delete + count_insert;
                if region > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let common = common_prefix(&text_insert, &text_delete);
                        if common != 0 {
                            let start = pointer - region;
                            let shared: Vec<char> = text_insert.drain(..common).collect();
                            text_delete.drain(..common);
                            if start > 0 && chunks[start - 1].tag == DiffTag::Equal {
                                chunks[start - 1].chars.extend(shared);
                            } else {
                                chunks.insert(start, Chunk::new(DiffTag::Equal, shared));
                                pointer += 1;
                            }
                        }
                        let common = common_suffix(&text_insert, &text_delete);
                        if common != 0 {
                            let mut shared = text_insert.split_off(text_insert.len() - common);
                            text_delete.truncate(text_delete.len() - common);
                            shared.extend_from_slice(&chunks[pointer].chars);
                            chunks[pointer].chars = shared;
                        }
                    }
                    pointer -= region;
                    chunks.drain(pointer..pointer + region);
                    if !text_delete.is_empty() {
                        let text = std::mem::take(&mut text_delete);
                        chunks.insert(pointer, Chunk::new(DiffTag::Delete, text));
                        pointer += 1;
                    }
                    if !text_insert.is_empty() {
                        let text = std::mem::take(&mut text_insert);
                        chunks.insert(pointer, Chunk::new(DiffTag::Insert, text));
                        pointer += 1;
                    }
                    pointer += 1;
                } else if pointer != 0 && chunks[pointer - 1].tag == DiffTag::Equal {
                    let text = chunks.remove(pointer).chars;
                    chunks[pointer - 1].chars.extend(text);
                } else {
                    pointer += 1;
                }
                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }
    if chunks.last().is_some_and(|c| c.chars.is_empty()) {
        chunks.pop();
    }

    // A single edit between two equalities may slide over one of them:
    // A<ins>BA</ins>C -> <ins>AB</ins>AC, or A<ins>BC</ins>B -> AB<ins>CB</ins>.
    let mut shifted = false;
    let mut pointer = 1;
    while pointer + 1 < chunks.len() {
        if chunks[pointer - 1].tag == DiffTag::Equal && chunks[pointer + 1].tag == DiffTag::Equal {
            let prev = chunks[pointer - 1].chars.clone();
            let next = chunks[pointer + 1].chars.clone();
            let edit = &chunks[pointer].chars;
            if edit.ends_with(&prev) {
                let mut moved = prev.clone();
                moved.extend_from_slice(&edit[..edit.len() - prev.len()]);
                chunks[pointer].chars = moved;
                let mut following = prev;
                following.extend(next);
                chunks[pointer + 1].chars = following;
                chunks.remove(pointer - 1);
                shifted = true;
            } else if edit.starts_with(&next) {
                let mut moved = edit[next.len()..].to_vec();
                moved.extend_from_slice(&next);
                chunks[pointer].chars = moved;
                chunks[pointer - 1].chars.extend(next);
                chunks.remove(pointer + 1);
                shifted = true;
            }
        }
        pointer += 1;
    }
    if shifted {
        merge(chunks);
    }
}

fn eliminate_equalities(chunks: &mut Vec<Chunk>) {
    let mut changed = false;
    // Indices of equalities seen so far; the top is the most recent.
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let mut pointer: isize = 0;
    // Edit lengths before (1) and after (2) the last equality.
    let (mut inserted_before, mut deleted_before) = (0usize, 0usize);
    let (mut inserted_after, mut deleted_after) = (0usize, 0usize);

    while pointer >= 0 && (pointer as usize) < chunks.len() {
        let p = pointer as usize;
        if chunks[p].tag == DiffTag::Equal {
            equalities.push(p);
            inserted_before = inserted_after;
            deleted_before = deleted_after;
            inserted_after = 0;
            deleted_after = 0;
            last_equality = Some(chunks[p].chars.len());
        } else {
            if chunks[p].tag == DiffTag::Insert {
                inserted_after += chunks[p].chars.len();
            } else {
                deleted_after += chunks[p].chars.len();
            }
            if let (Some(len), Some(&at)) = (last_equality, equalities.last()) {
                if len <= inserted_before.max(deleted_before)
                    && len <= inserted_after.max(deleted_after)
                {
                    let text = chunks[at].chars.clone();
                    chunks.insert(at, Chunk::new(DiffTag::Delete, text));
                    chunks[at + 1].tag = DiffTag::Insert;
                    // Drop this equality and the one before it; the latter
                    // has to be re-evaluated against the merged edit.
                    equalities.pop();
                    equalities.pop();
                    pointer = equalities.last().map_or(-1, |&i| i as isize);
                    inserted_before = 0;
                    deleted_before = 0;
                    inserted_after = 0;
                    deleted_after = 0;
                    last_equality = None;
                    changed = true;
                }
            }
        }
        pointer += 1;
    }

    if changed {
        merge(chunks);
    }
}

fn align_boundaries(chunks: &mut Vec<Chunk>) {
    let mut pointer: isize = 1;
    while pointer + 1 < chunks.len() as isize {
        let p = pointer as usize;
        if pointer >= 1
            && chunks[p - 1].tag == DiffTag::Equal
            && chunks[p + 1].tag == DiffTag::Equal
        {
            let mut before = chunks[p - 1].chars.clone();
            let mut edit = chunks[p].chars.clone();
            let mut after = chunks[p + 1].chars.clone();

            // Shift the edit as far left as it goes.
            let common = common_suffix(&before, &edit);
            if common != 0 {
                let shared = edit[edit.len() - common..].to_vec();
                before.truncate(before.len() - common);
                let mut shifted = shared.clone();
                shifted.extend_from_slice(&edit[..edit.len() - common]);
                edit = shifted;
                let mut rest = shared;
                rest.extend(after);
                after = rest;
            }

            // Then step right, keeping the best-scoring position.
            let mut best = (before.clone(), edit.clone(), after.clone());
            let mut best_score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
            while !edit.is_empty() && !after.is_empty() && edit[0] == after[0] {
                before.push(edit.remove(0));
                edit.push(after.remove(0));
                let score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
                // >= prefers the rightmost of equally good positions.
                if score >= best_score {
                    best_score = score;
                    best = (before.clone(), edit.clone(), after.clone());
                }
            }

            let (best_before, best_edit, best_after) = best;
            if chunks[p - 1].chars != best_before {
                let mut p = p;
                if best_before.is_empty() {
                    chunks.remove(p - 1);
                    p -= 1;
                    pointer -= 1;
                } else {
                    chunks[p - 1].chars = best_before;
                }
                chunks[p].chars = best_edit;
                if best_after.is_empty() {
                    chunks.remove(p + 1);
                    pointer -= 1;
                } else {
                    chunks[p + 1].chars = best_after;
                }
            }
        }
        pointer += 1;
    }
}

fn extract_overlaps(chunks: &mut Vec<Chunk>) {
    let mut pointer = 1;
    while pointer < chunks.len() {
        if chunks[pointer - 1].tag == DiffTag::Delete && chunks[pointer].tag == DiffTag::Insert {
            let deletion = chunks[pointer - 1].chars.clone();
            let insertion = chunks[pointer].chars.clone();
            let forward = common_overlap(&deletion, &insertion);
            let backward = common_overlap(&insertion, &deletion);
            let significant =
                |overlap: usize| overlap > 0 && (overlap * 2 >= deletion.len() || overlap * 2 >= insertion.len());

            if forward >= backward {
                if significant(forward) {
                    chunks.insert(
                        pointer,
                        Chunk::new(DiffTag::Equal, insertion[..forward].to_vec()),
                    );
                    chunks[pointer - 1].chars = deletion[..deletion.len() - forward].to_vec();
                    chunks[pointer + 1].chars = insertion[forward..].to_vec();
                    pointer += 1;
                }
            } else if significant(backward) {
                chunks.insert(
                    pointer,
                    Chunk::new(DiffTag::Equal, deletion[..backward].to_vec()),
                );
                chunks[pointer - 1] = Chunk::new(
                    DiffTag::Insert,
                    insertion[..insertion.len() - backward].to_vec(),
                );
                chunks[pointer + 1] = Chunk::new(DiffTag::Delete, deletion[backward..].to_vec());
                pointer += 1;
            }
            pointer += 1;
        }
        pointer += 1;
    }
}

/// Score the boundary between `one` and `two`: 6 at an edge of the text,
/// down to 0 in the middle of a word.
fn boundary_score(one: &[char], two: &[char]) -> u32 {
    let (Some(&last), Some(&first)) = (one.last(), two.first()) else {
        return 6;
    };

    let non_alnum_1 = !last.is_ascii_alphanumeric();
    let non_alnum_2 = !first.is_ascii_alphanumeric();
    let whitespace_1 = non_alnum_1 && last.is_whitespace();
    let whitespace_2 = non_alnum_2 && first.is_whitespace();
    let line_break_1 = whitespace_1 && is_line_break(last);
    let line_break_2 = whitespace_2 && is_line_break(first);
    let blank_line_1 = line_break_1 && ends_with_blank_line(one);
    let blank_line_2 = line_break_2 && starts_with_blank_line(two);

    if blank_line_1 || blank_line_2 {
        5
    } else if line_break_1 || line_break_2 {
        4
    } else if non_alnum_1 && !whitespace_1 && whitespace_2 {
        3
    } else if whitespace_1 || whitespace_2 {
        2
    } else if non_alnum_1 || non_alnum_2 {
        1
    } else {
        0
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// `\n\n` or `\n\r\n` at the end.
fn ends_with_blank_line(text: &[char]) -> bool {
    text.ends_with(&['\n', '\n']) || text.ends_with(&['\n', '\r', '\n'])
}

/// `\r?\n\r?\n` at the start.
fn starts_with_blank_line(text: &[char]) -> bool {
    let mut rest = text;
    for _ in 0..2 {
        rest = rest.strip_prefix(&['\r']).unwrap_or(rest);
        match rest.strip_prefix(&['\n']) {
            Some(tail) => rest = tail,
            None => return false,
        }
    }
    true
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Length of the longest suffix of `a` that is a prefix of `b`.
fn common_overlap(a: &[char], b: &[char]) -> usize {
    let max = a.len().min(b.len());
    (1..=max)
        .rev()
        .find(|&k| a[a.len() - k..] == b[..k])
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(ops: &[(DiffTag, &str)]) -> EditScript {
        let ops = ops
            .iter()
            .map(|(tag, text)| DiffOp::new(*tag, *text, 0))
            .collect();
        let mut script = EditScript::from_ops(Granularity::Char, ops);
        script.reindex();
        script
    }

    fn cleaned(ops: &[(DiffTag, &str)]) -> Vec<(DiffTag, String)> {
        cleanup_semantic(&script(ops))
            .into_ops()
            .into_iter()
            .map(|op| (op.tag, op.text))
            .collect()
    }

    fn expect(ops: &[(DiffTag, &str)]) -> Vec<(DiffTag, String)> {
        ops.iter().map(|(tag, text)| (*tag, text.to_string())).collect()
    }

    use DiffTag::{Delete as D, Equal as E, Insert as I};

    #[test]
    fn empty_script() {
        assert!(cleaned(&[]).is_empty());
    }

    #[test]
    fn merges_same_tag_neighbours() {
        assert_eq!(
            cleaned(&[(D, "a"), (D, "b"), (I, "c"), (I, "d")]),
            expect(&[(D, "ab"), (I, "cd")])
        );
    }

    #[test]
    fn factors_common_prefix_and_suffix() {
        assert_eq!(
            cleaned(&[(D, "xaby"), (I, "xcdy")]),
            expect(&[(E, "x"), (D, "ab"), (I, "cd"), (E, "y")])
        );
    }

    #[test]
    fn keeps_significant_equalities() {
        let ops = [(D, "ab"), (I, "cd"), (E, "12"), (D, "e")];
        assert_eq!(cleaned(&ops), expect(&ops));

        let ops = [(D, "abc"), (I, "ABC"), (E, "1234"), (D, "wxyz")];
        assert_eq!(cleaned(&ops), expect(&ops));
    }

    #[test]
    fn folds_short_equality_between_edits() {
        assert_eq!(
            cleaned(&[(D, "a"), (E, "b"), (D, "c")]),
            expect(&[(D, "abc"), (I, "b")])
        );
    }

    #[test]
    fn folding_cascades_backwards() {
        assert_eq!(
            cleaned(&[(D, "ab"), (E, "cd"), (D, "e"), (E, "f"), (I, "g")]),
            expect(&[(D, "abcdef"), (I, "cdfg")])
        );
    }

    #[test]
    fn aligns_edit_to_word_boundary() {
        assert_eq!(
            cleaned(&[(E, "The c"), (D, "ow and the c"), (E, "at.")]),
            expect(&[(E, "The "), (D, "cow and the "), (E, "cat.")])
        );
    }

    #[test]
    fn extracts_forward_overlap() {
        assert_eq!(
            cleaned(&[(D, "abcxxx"), (I, "xxxdef")]),
            expect(&[(D, "abc"), (E, "xxx"), (I, "def")])
        );
    }

    #[test]
    fn extracts_backward_overlap_insertion_first() {
        assert_eq!(
            cleaned(&[(D, "xxxabc"), (I, "defxxx")]),
            expect(&[(I, "def"), (E, "xxx"), (D, "abc")])
        );
    }

    #[test]
    fn slides_single_edit_over_identical_neighbour() {
        assert_eq!(
            cleaned(&[(E, "a"), (I, "ba"), (E, "c")]),
            expect(&[(I, "ab"), (E, "ac")])
        );
    }

    #[test]
    fn result_is_a_fixed_point() {
        let raw = script(&[(E, "The c"), (D, "ow and the c"), (E, "at."), (I, "!")]);
        let once = cleanup_semantic(&raw);
        let twice = cleanup_semantic(&once);
        assert_eq!(once, twice);
        assert_eq!(once.reconstruct_a(), raw.reconstruct_a());
        assert_eq!(once.reconstruct_b(), raw.reconstruct_b());
    }

    #[test]
    fn line_scripts_are_untouched() {
        let mut lines = EditScript::new(Granularity::Line);
        lines.push(DiffOp::new(D, "a", 0));
        lines.push(DiffOp::new(D, "b", 1));
        assert_eq!(cleanup_semantic(&lines), lines);
    }

    #[test]
    fn boundary_scores() {
        let s = |t: &str| t.chars().collect::<Vec<_>>();
        assert_eq!(boundary_score(&s(""), &s("a")), 6);
        assert_eq!(boundary_score(&s("a\n\n"), &s("b")), 5);
        assert_eq!(boundary_score(&s("a\n"), &s("b")), 4);
        assert_eq!(boundary_score(&s("a."), &s(" b")), 3);
        assert_eq!(boundary_score(&s("a "), &s("b")), 2);
        assert_eq!(boundary_score(&s("a-"), &s("b")), 1);
        assert_eq!(boundary_score(&s("a"), &s("b")), 0);
        assert!(starts_with_blank_line(&s("\r\n\r\nx")));
        assert!(!starts_with_blank_line(&s("\nx")));
    }

    #[test]
    fn overlap_lengths() {
        let s = |t: &str| t.chars().collect::<Vec<_>>();
        assert_eq!(common_overlap(&s("abcxxx"), &s("xxxdef")), 3);
        assert_eq!(common_overlap(&s("abc"), &s("def")), 0);
        assert_eq!(common_overlap(&s("abc"), &s("abc")), 3);
    }
}
