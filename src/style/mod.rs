//! Style model: property registry, value entries and the immutable style.
//!
//! This module provides the core styling primitives:
//!
//! - [`PropertyId`]: The fixed registry of text properties, in traversal order
//! - [`Property`]: A typed handle over a registered property
//! - [`ValueEntry`]: Either absent or a present [`PropertyValue`]
//! - [`TextStyle`]: An immutable mapping from every property to its entry
//! - [`StyleConfig`]: The serde form of a style
//! - [`StyleValidationError`]: Errors from fallback chain validation
//!
//! Styles never mutate. Every transformation returns a new handle, or the
//! receiver itself when the requested change is a no-op.

mod config;
mod entry;
mod error;
mod property;
pub mod properties;
mod text_style;
mod values;

pub use config::StyleConfig;
pub use entry::{PropertyValue, ValueEntry};
pub use error::StyleValidationError;
pub use property::{Property, PropertyId, StyleValue, ValueKind};
pub use text_style::TextStyle;
pub use values::{colors, fonts, FontPosition, FontWeight, TextDirection};
