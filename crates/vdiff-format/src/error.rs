//! Error types for serialization.

use vdiff_types::HookError;

/// Errors that can occur while serializing a value.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// A custom serialization hook reported a failure.
    #[error("serialization hook failed on {constructor}: {source}")]
    HookFailed {
        /// Constructor name of the object whose hook failed.
        constructor: String,
        #[source]
        source: HookError,
    },

    /// A plugin could not print a value it claimed.
    #[error("plugin '{plugin}' failed: {message}")]
    Plugin { plugin: String, message: String },
}

impl SerializeError {
    /// Create a plugin error with a name and message.
    pub fn plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Plugin {
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias for serialization results.
pub type SerializeResult<T> = Result<T, SerializeError>;
