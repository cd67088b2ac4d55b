//! Value serialization for vdiff.
//!
//! The diff engine never prints values itself. It calls a [`Serializer`]
//! twice per composite comparison (hooks on, then hooks off) and diffs the
//! resulting text, so serializers must be pure and deterministic.
//!
//! # Key Types
//!
//! - [`Serializer`] -- The injected value-to-text seam
//! - [`SerializeConfig`] -- Hook, depth, indent, and plugin settings for one call
//! - [`Plugin`] / [`PluginSet`] -- Custom printers for specific values
//! - [`PrettyFormat`] -- The default multi-line pretty-printer
//! - [`AsymmetricMatcherPlugin`] -- Prints matchers as `Name sample`

pub mod asymmetric;
pub mod config;
pub mod error;
pub mod plugin;
pub mod printer;
pub mod traits;

pub use asymmetric::AsymmetricMatcherPlugin;
pub use config::{SerializeConfig, DEFAULT_INDENT, FALLBACK_MAX_DEPTH};
pub use error::{SerializeError, SerializeResult};
pub use plugin::{Plugin, PluginSet};
pub use printer::{PrettyFormat, Printer};
pub use traits::Serializer;
