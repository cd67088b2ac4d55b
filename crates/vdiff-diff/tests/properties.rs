use proptest::prelude::*;
use similar::{capture_diff_slices, Algorithm, DiffTag as OracleTag};

use vdiff_diff::myers::{diff_slices, edit_distance};
use vdiff_diff::{
    cleanup_semantic, diff_lines_raw, diff_strings_raw, DiffOptions, DiffTag, EditScript,
};

/// Non-equal element count of a longest-common-subsequence diff.
fn oracle_distance<T: std::hash::Hash + Eq + Ord>(a: &[T], b: &[T]) -> usize {
    capture_diff_slices(Algorithm::Lcs, a, b)
        .iter()
        .map(|op| match op.tag() {
            OracleTag::Equal => 0,
            OracleTag::Delete => op.old_range().len(),
            OracleTag::Insert => op.new_range().len(),
            OracleTag::Replace => op.old_range().len() + op.new_range().len(),
        })
        .sum()
}

/// No empty ops and no two neighbours with the same tag.
fn is_maximal(script: &EditScript) -> bool {
    let ops = script.ops();
    ops.iter().all(|op| !op.text.is_empty())
        && ops.windows(2).all(|pair| pair[0].tag != pair[1].tag)
}

fn text() -> impl Strategy<Value = String> {
    "[ab \n.]{0,24}"
}

proptest! {
    #[test]
    fn raw_char_scripts_reconstruct(a in text(), b in text()) {
        let script = diff_strings_raw(&a, &b, false);
        prop_assert_eq!(script.reconstruct_a(), a);
        prop_assert_eq!(script.reconstruct_b(), b);
        prop_assert!(is_maximal(&script));
    }

    #[test]
    fn cleaned_char_scripts_reconstruct(a in text(), b in text()) {
        let script = diff_strings_raw(&a, &b, true);
        prop_assert_eq!(script.reconstruct_a(), a);
        prop_assert_eq!(script.reconstruct_b(), b);
        prop_assert!(script.ops().iter().all(|op| !op.text.is_empty()));
    }

    #[test]
    fn cleanup_is_idempotent(a in text(), b in text()) {
        let once = cleanup_semantic(&diff_strings_raw(&a, &b, false));
        let twice = cleanup_semantic(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn line_scripts_reconstruct(a in text(), b in text()) {
        let diff = diff_lines_raw(&a, &b, &DiffOptions::plain());
        prop_assert_eq!(diff.script.reconstruct_a(), a);
        prop_assert_eq!(diff.script.reconstruct_b(), b);
        prop_assert_eq!(diff.counts, diff.script.counts());
    }

    #[test]
    fn char_distance_is_minimal(a in text(), b in text()) {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let ours = edit_distance(&diff_slices(&a, &b));
        prop_assert!(ours <= oracle_distance(&a, &b));
    }

    #[test]
    fn line_distance_is_minimal(
        a in proptest::collection::vec("[a-d]", 0..30),
        b in proptest::collection::vec("[a-d]", 0..30),
    ) {
        let diff = diff_lines_raw(&a.join("\n"), &b.join("\n"), &DiffOptions::plain());
        let changed = diff
            .script
            .ops()
            .iter()
            .filter(|op| op.tag != DiffTag::Equal)
            .count();
        prop_assert!(changed <= oracle_distance(&a, &b));
    }
}
