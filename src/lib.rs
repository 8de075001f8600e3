//! # Textstyle - cascading text style resolution
//!
//! `textstyle` models the text formatting of a run as an immutable,
//! partially-defined property bag ([`TextStyle`]) and resolves it against
//! other styles: ancestors, explicit overrides and the library baseline.
//!
//! ## Core Concepts
//!
//! - [`TextStyle`]: An immutable, cheaply cloned set of optional properties
//! - [`Property`]: Typed handles for reading and writing single properties,
//!   one constant per property in [`properties`]
//! - [`Resolver`]: The merge policies, memoized per operation
//! - [`StyleConfig`]: Serde-friendly form for declaring styles in config files
//!
//! ## Quick Start
//!
//! ```rust
//! use textstyle::{properties, TextStyle};
//!
//! let block = TextStyle::new().with_font_family("Times").with_size(14.0);
//! let run = TextStyle::new().bold().with_color("#ff0000");
//!
//! let resolved = run.apply_inherited_style(&block).apply_global_style();
//!
//! assert_eq!(resolved.font_family(), Some("Times"));
//! assert_eq!(resolved.size(), Some(14.0));
//! assert_eq!(resolved.color(), Some("#ff0000"));
//! assert_eq!(resolved.is_italic(), Some(false));
//! assert_eq!(resolved.get(properties::LINE_HEIGHT), Some(1.2));
//! ```
//!
//! ## Reference Stability
//!
//! Every operation returns the receiver itself when nothing changes, and
//! repeated calls with equal arguments return the same cached instance:
//!
//! ```rust
//! use textstyle::TextStyle;
//!
//! let style = TextStyle::new().with_size(12.0);
//! assert!(style.with_size(12.0).ptr_eq(&style));
//! assert!(style.apply_global_style().ptr_eq(&style.apply_global_style()));
//! ```

pub mod resolve;
pub mod style;

pub use resolve::{merge, ApplyOptions, CacheStats, Resolver, MAX_FALLBACK_DEPTH};
pub use style::{
    colors, fonts, properties, FontPosition, FontWeight, Property, PropertyId, PropertyValue,
    StyleConfig, StyleValidationError, StyleValue, TextDirection, TextStyle, ValueEntry, ValueKind,
};
