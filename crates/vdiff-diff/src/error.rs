//! Error types for the diff crate.

/// Errors raised while reading caller-supplied options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// The overrides were not a valid JSON object.
    #[error("invalid diff options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for option parsing results.
pub type OptionsResult<T> = Result<T, OptionsError>;
