//! Foundation types for vdiff.
//!
//! This crate provides the value model that the serializer prints and the
//! diff engine compares. Every other vdiff crate depends on `vdiff-types`.
//!
//! # Key Types
//!
//! - [`Value`] -- A runtime value: primitives, collections, and composite objects
//! - [`Object`] -- A named composite with fields and an optional serialization hook
//! - [`Matcher`] -- An asymmetric matcher (predicate-based expectation)
//! - [`Category`] -- The closed set of value categories used for dispatch
//! - [`Classification`] -- A concrete category, or a matcher with its expected category

pub mod category;
pub mod error;
pub mod matcher;
pub mod order;
pub mod value;

pub use category::{Category, Classification};
pub use error::HookError;
pub use matcher::Matcher;
pub use value::{Object, SerializeHook, Value};
