//! Human-readable differences between two values.
//!
//! [`compare`] is the entry point: it classifies both operands, serializes
//! composites, diffs the resulting lines, and renders a unified diff. The
//! building blocks are public for callers that already hold text or want
//! the structured result instead of a string.
//!
//! # Key Types
//!
//! - [`Comparator`] -- Classification and dispatch over an injected serializer
//! - [`Comparison`] -- Undecidable, identical, type mismatch, or a rendered diff
//! - [`DiffOptions`] / [`PartialDiffOptions`] -- Normalized options and caller overrides
//! - [`EditScript`] / [`DiffOp`] -- The structured result of a diff
//! - [`LineDiff`] -- A line script with its change counts
//! - [`Formatter`] -- Decorates rendered text by [`Role`]
//!
//! # Example
//!
//! ```
//! use vdiff_diff::{compare, PartialDiffOptions};
//! use vdiff_types::Value;
//!
//! let out = compare(
//!     &Value::from("a\nb\nc"),
//!     &Value::from("a\nx\nc"),
//!     Some(&PartialDiffOptions::plain()),
//! );
//! assert_eq!(out.as_deref(), Some("- Expected\n+ Received\n\n  a\n- b\n+ x\n  c"));
//! ```

pub mod cleanup;
pub mod compare;
pub mod error;
pub mod formatter;
pub mod lines;
pub mod myers;
pub mod normalize;
pub mod options;
pub mod render;
pub mod script;

pub use cleanup::cleanup_semantic;
pub use compare::{Comparator, Comparison, NO_DIFF_MESSAGE, SIMILAR_MESSAGE};
pub use error::{OptionsError, OptionsResult};
pub use formatter::{ColoredFormatter, Formatter, PlainFormatter, Role};
pub use lines::{diff_lines_raw, diff_lines_unified, diff_strings_raw, split_lines, LineDiff};
pub use normalize::{sort_collection, sort_map, sort_set};
pub use options::{DiffOptions, PartialDiffOptions};
pub use render::render;
pub use script::{ChangeCounts, DiffOp, DiffTag, EditScript, Granularity};

use vdiff_types::Value;

/// Compare `a` (expected) with `b` (received) using the default serializer.
///
/// Returns `None` when no meaningful diff exists, for example when `a` is
/// an asymmetric matcher that cannot name the type it expects.
pub fn compare(a: &Value, b: &Value, overrides: Option<&PartialDiffOptions>) -> Option<String> {
    Comparator::default().compare(a, b, overrides)
}
