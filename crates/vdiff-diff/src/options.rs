//! Diff options: caller overrides merged over a fixed default table.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::OptionsResult;
use crate::formatter::{ColoredFormatter, Formatter, PlainFormatter};

/// Default number of common lines kept around each change.
pub const DEFAULT_CONTEXT_LINES: usize = 5;

/// Default text appended after a truncated diff.
pub const DEFAULT_TRUNCATE_ANNOTATION: &str = "... Diff result is truncated";

/// Fully populated, immutable diff configuration.
#[derive(Clone, Debug)]
pub struct DiffOptions {
    /// Label of the `a` side in the header.
    pub a_annotation: String,
    /// Label of the `b` side in the header.
    pub b_annotation: String,
    pub a_indicator: String,
    pub b_indicator: String,
    pub common_indicator: String,
    /// Common lines kept before and after each change when not expanded.
    pub context_lines: usize,
    /// Print every line instead of windowed hunks.
    pub expand: bool,
    /// Append the number of changed lines to each header line.
    pub include_change_counts: bool,
    /// Skip the two header lines and the blank line after them.
    pub omit_annotation_lines: bool,
    /// Printed instead of an empty common line at the very start or end.
    pub empty_first_or_last_line_placeholder: String,
    /// Highlight changed characters inside changed lines.
    pub highlight_changes: bool,
    /// Maximum number of body lines; `0` disables truncation.
    pub truncate_threshold: usize,
    pub truncate_annotation: String,
    pub formatter: Arc<dyn Formatter>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            a_annotation: "Expected".to_string(),
            b_annotation: "Received".to_string(),
            a_indicator: "-".to_string(),
            b_indicator: "+".to_string(),
            common_indicator: " ".to_string(),
            context_lines: DEFAULT_CONTEXT_LINES,
            expand: true,
            include_change_counts: false,
            omit_annotation_lines: false,
            empty_first_or_last_line_placeholder: String::new(),
            highlight_changes: true,
            truncate_threshold: 0,
            truncate_annotation: DEFAULT_TRUNCATE_ANNOTATION.to_string(),
            formatter: Arc::new(ColoredFormatter),
        }
    }
}

impl DiffOptions {
    /// Merge `overrides` over the defaults.
    ///
    /// Numeric overrides are floored and clamped to zero; `NaN` and the
    /// infinities fall back to the default value.
    pub fn normalize(overrides: Option<&PartialDiffOptions>) -> Self {
        let mut options = Self::default();
        let Some(o) = overrides else {
            return options;
        };

        if let Some(v) = &o.a_annotation {
            options.a_annotation = v.clone();
        }
        if let Some(v) = &o.b_annotation {
            options.b_annotation = v.clone();
        }
        if let Some(v) = &o.a_indicator {
            options.a_indicator = v.clone();
        }
        if let Some(v) = &o.b_indicator {
            options.b_indicator = v.clone();
        }
        if let Some(v) = &o.common_indicator {
            options.common_indicator = v.clone();
        }
        if let Some(v) = o.context_lines {
            options.context_lines = coerce_count(v, DEFAULT_CONTEXT_LINES);
        }
        if let Some(v) = o.expand {
            options.expand = v;
        }
        if let Some(v) = o.include_change_counts {
            options.include_change_counts = v;
        }
        if let Some(v) = o.omit_annotation_lines {
            options.omit_annotation_lines = v;
        }
        if let Some(v) = &o.empty_first_or_last_line_placeholder {
            options.empty_first_or_last_line_placeholder = v.clone();
        }
        if let Some(v) = o.highlight_changes {
            options.highlight_changes = v;
        }
        if let Some(v) = o.truncate_threshold {
            options.truncate_threshold = coerce_count(v, 0);
        }
        if let Some(v) = &o.truncate_annotation {
            options.truncate_annotation = v.clone();
        }
        if let Some(formatter) = &o.formatter {
            options.formatter = Arc::clone(formatter);
        }
        options
    }

    /// Default options with undecorated output.
    pub fn plain() -> Self {
        Self {
            formatter: Arc::new(PlainFormatter),
            ..Default::default()
        }
    }
}

/// Caller overrides. Every field is optional; unknown JSON keys are ignored.
///
/// Numeric fields are read as `f64` so that fractional or negative input
/// can be coerced rather than rejected.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialDiffOptions {
    pub a_annotation: Option<String>,
    pub b_annotation: Option<String>,
    pub a_indicator: Option<String>,
    pub b_indicator: Option<String>,
    pub common_indicator: Option<String>,
    pub context_lines: Option<f64>,
    pub expand: Option<bool>,
    pub include_change_counts: Option<bool>,
    pub omit_annotation_lines: Option<bool>,
    pub empty_first_or_last_line_placeholder: Option<String>,
    pub highlight_changes: Option<bool>,
    pub truncate_threshold: Option<f64>,
    pub truncate_annotation: Option<String>,
    #[serde(skip)]
    pub formatter: Option<Arc<dyn Formatter>>,
}

impl PartialDiffOptions {
    /// Parse overrides from a JSON object such as `{"contextLines": 2}`.
    pub fn from_json(json: &str) -> OptionsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overrides selecting the undecorated formatter and nothing else.
    pub fn plain() -> Self {
        Self::default().with_formatter(Arc::new(PlainFormatter))
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }
}

fn coerce_count(value: f64, default: usize) -> usize {
    if !value.is_finite() {
        return default;
    }
    // `as` saturates: negatives become 0, huge values usize::MAX.
    value.floor() as usize
}
