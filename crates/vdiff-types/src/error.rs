use thiserror::Error;

/// Error returned by a custom serialization hook.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("custom serialization hook failed: {message}")]
pub struct HookError {
    /// What the hook reported.
    pub message: String,
}

impl HookError {
    /// Create a hook error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
