//! The immutable text style.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::config::StyleConfig;
use super::entry::{PropertyValue, ValueEntry};
use super::error::StyleValidationError;
use super::properties;
use super::property::{Property, PropertyId, StyleValue};
use super::values::{colors, fonts, FontPosition, FontWeight, TextDirection};
use crate::resolve::{Resolver, MAX_FALLBACK_DEPTH};

struct StyleData {
    entries: [ValueEntry; PropertyId::COUNT],
    hash: u64,
}

/// An immutable set of optionally defined text properties.
///
/// Every registered property has exactly one [`ValueEntry`]; properties that
/// were never set hold [`ValueEntry::ABSENT`]. Cloning is cheap and shares
/// the underlying storage, and every transformation returns the receiver
/// itself when nothing changes, so [`TextStyle::ptr_eq`] can be used to
/// detect no-op merges.
///
/// Equality and hashing are structural over all entries, including the
/// whole fallback chain. The content hash is computed once at construction.
///
/// # Example
///
/// ```rust
/// use textstyle::{FontWeight, TextStyle};
///
/// let heading = TextStyle::new()
///     .with_font_family("Roboto")
///     .with_size(18.0)
///     .bold();
///
/// assert_eq!(heading.font_family(), Some("Roboto"));
/// assert_eq!(heading.font_weight(), Some(FontWeight::Bold));
/// assert_eq!(heading.color(), None);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "StyleConfig", into = "StyleConfig")]
pub struct TextStyle(Arc<StyleData>);

static RAW_DEFAULT: Lazy<TextStyle> = Lazy::new(|| TextStyle::from_entries(Default::default()));

static LIBRARY_DEFAULT: Lazy<TextStyle> = Lazy::new(|| {
    TextStyle::new()
        .with_value(properties::COLOR, Arc::from(colors::BLACK))
        .with_value(properties::BACKGROUND_COLOR, Arc::from(colors::TRANSPARENT))
        .with_value(properties::FONT_FAMILY, Arc::from(fonts::LATO))
        .with_value(properties::SIZE, 12.0)
        .with_value(properties::LINE_HEIGHT, 1.2)
        .with_value(properties::LETTER_SPACING, 0.0)
        .with_value(properties::FONT_WEIGHT, FontWeight::Normal)
        .with_value(properties::FONT_POSITION, FontPosition::Normal)
        .with_value(properties::IS_ITALIC, false)
        .with_value(properties::HAS_STRIKETHROUGH, false)
        .with_value(properties::HAS_UNDERLINE, false)
        .with_value(properties::WRAP_ANYWHERE, false)
        .with_value(properties::DIRECTION, TextDirection::Auto)
});

impl TextStyle {
    /// Returns the raw default style, with every property absent.
    ///
    /// All raw defaults share one allocation.
    pub fn new() -> Self {
        RAW_DEFAULT.clone()
    }

    /// Returns the library default style, with every property except the
    /// fallback concretely defined.
    pub fn library_default() -> Self {
        LIBRARY_DEFAULT.clone()
    }

    fn from_entries(entries: [ValueEntry; PropertyId::COUNT]) -> Self {
        let mut hasher = FxHasher::default();
        entries.hash(&mut hasher);
        let hash = hasher.finish();
        TextStyle(Arc::new(StyleData { entries, hash }))
    }

    /// Returns `true` if both handles share the same storage.
    pub fn ptr_eq(&self, other: &TextStyle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the entry held for a property.
    pub fn entry(&self, property: PropertyId) -> &ValueEntry {
        &self.0.entries[property.index()]
    }

    /// Returns a style identical to this one except for `property`.
    ///
    /// If `entry` equals the current entry, the receiver itself is returned.
    ///
    /// # Panics
    ///
    /// Panics if the entry's value kind does not match the property's kind.
    pub fn with_entry(&self, property: PropertyId, entry: ValueEntry) -> TextStyle {
        if let Some(value) = entry.value() {
            assert_eq!(
                value.kind(),
                property.kind(),
                "value of the wrong kind for property '{}'",
                property
            );
        }

        if self.entry(property) == &entry {
            return self.clone();
        }

        let mut entries = self.0.entries.clone();
        entries[property.index()] = entry;
        TextStyle::from_entries(entries)
    }

    fn with_value<T: StyleValue>(&self, property: Property<T>, value: T) -> TextStyle {
        self.with_entry(property.id(), ValueEntry::present(value))
    }

    /// Reads a property through its typed handle.
    pub fn get<T: StyleValue>(&self, property: Property<T>) -> Option<T> {
        self.entry(property.id()).get()
    }

    /// Returns `true` if no property is set.
    pub fn is_empty(&self) -> bool {
        self.0.entries.iter().all(|entry| !entry.has_value())
    }

    pub fn color(&self) -> Option<&str> {
        self.text(PropertyId::Color)
    }

    pub fn background_color(&self) -> Option<&str> {
        self.text(PropertyId::BackgroundColor)
    }

    pub fn font_family(&self) -> Option<&str> {
        self.text(PropertyId::FontFamily)
    }

    pub fn size(&self) -> Option<f32> {
        self.get(properties::SIZE)
    }

    pub fn line_height(&self) -> Option<f32> {
        self.get(properties::LINE_HEIGHT)
    }

    pub fn letter_spacing(&self) -> Option<f32> {
        self.get(properties::LETTER_SPACING)
    }

    pub fn font_weight(&self) -> Option<FontWeight> {
        self.get(properties::FONT_WEIGHT)
    }

    pub fn font_position(&self) -> Option<FontPosition> {
        self.get(properties::FONT_POSITION)
    }

    pub fn is_italic(&self) -> Option<bool> {
        self.get(properties::IS_ITALIC)
    }

    pub fn has_strikethrough(&self) -> Option<bool> {
        self.get(properties::HAS_STRIKETHROUGH)
    }

    pub fn has_underline(&self) -> Option<bool> {
        self.get(properties::HAS_UNDERLINE)
    }

    pub fn wrap_anywhere(&self) -> Option<bool> {
        self.get(properties::WRAP_ANYWHERE)
    }

    pub fn direction(&self) -> Option<TextDirection> {
        self.get(properties::DIRECTION)
    }

    /// Returns the next style in the fallback chain.
    pub fn fallback(&self) -> Option<&TextStyle> {
        self.entry(PropertyId::Fallback)
            .value()
            .and_then(PropertyValue::as_style)
    }

    fn text(&self, property: PropertyId) -> Option<&str> {
        self.entry(property).value().and_then(PropertyValue::as_text)
    }

    /// Number of styles reachable through the fallback chain.
    pub fn fallback_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.fallback();
        while let Some(style) = current {
            depth += 1;
            current = style.fallback();
        }
        depth
    }

    /// Checks that resolution can follow this style's fallback chain.
    ///
    /// Resolution panics on chains longer than [`MAX_FALLBACK_DEPTH`]; call
    /// this first to reject such input gracefully.
    pub fn validate(&self) -> Result<(), StyleValidationError> {
        let depth = self.fallback_depth();
        if depth > MAX_FALLBACK_DEPTH {
            return Err(StyleValidationError::FallbackChainTooDeep {
                depth,
                limit: MAX_FALLBACK_DEPTH,
            });
        }
        Ok(())
    }

    /// Sets one property, see [`Resolver::mutate`].
    ///
    /// Writing `None` never clears an existing value.
    pub fn mutate<T: StyleValue>(&self, property: Property<T>, value: Option<T>) -> TextStyle {
        Resolver::global().mutate(self, property, value)
    }

    /// Fills unset properties from an ancestor, see [`Resolver::apply_inherited_style`].
    pub fn apply_inherited_style(&self, parent: &TextStyle) -> TextStyle {
        Resolver::global().apply_inherited_style(self, parent)
    }

    /// Backstops every unset property with the library default, see
    /// [`Resolver::apply_global_style`].
    pub fn apply_global_style(&self) -> TextStyle {
        Resolver::global().apply_global_style(self)
    }

    /// Replaces properties with every value `parent` defines, see
    /// [`Resolver::override_style`].
    pub fn override_style(&self, parent: &TextStyle) -> TextStyle {
        Resolver::global().override_style(self, parent)
    }

    pub fn with_color(&self, color: impl Into<Arc<str>>) -> TextStyle {
        self.mutate(properties::COLOR, Some(color.into()))
    }

    pub fn with_background_color(&self, color: impl Into<Arc<str>>) -> TextStyle {
        self.mutate(properties::BACKGROUND_COLOR, Some(color.into()))
    }

    pub fn with_font_family(&self, family: impl Into<Arc<str>>) -> TextStyle {
        self.mutate(properties::FONT_FAMILY, Some(family.into()))
    }

    pub fn with_size(&self, size: f32) -> TextStyle {
        self.mutate(properties::SIZE, Some(size))
    }

    pub fn with_line_height(&self, line_height: f32) -> TextStyle {
        self.mutate(properties::LINE_HEIGHT, Some(line_height))
    }

    pub fn with_letter_spacing(&self, letter_spacing: f32) -> TextStyle {
        self.mutate(properties::LETTER_SPACING, Some(letter_spacing))
    }

    pub fn with_font_weight(&self, weight: FontWeight) -> TextStyle {
        self.mutate(properties::FONT_WEIGHT, Some(weight))
    }

    pub fn bold(&self) -> TextStyle {
        self.with_font_weight(FontWeight::Bold)
    }

    pub fn with_font_position(&self, position: FontPosition) -> TextStyle {
        self.mutate(properties::FONT_POSITION, Some(position))
    }

    pub fn subscript(&self) -> TextStyle {
        self.with_font_position(FontPosition::Subscript)
    }

    pub fn superscript(&self) -> TextStyle {
        self.with_font_position(FontPosition::Superscript)
    }

    pub fn with_italic(&self, italic: bool) -> TextStyle {
        self.mutate(properties::IS_ITALIC, Some(italic))
    }

    pub fn italic(&self) -> TextStyle {
        self.with_italic(true)
    }

    pub fn with_strikethrough(&self, strikethrough: bool) -> TextStyle {
        self.mutate(properties::HAS_STRIKETHROUGH, Some(strikethrough))
    }

    pub fn strikethrough(&self) -> TextStyle {
        self.with_strikethrough(true)
    }

    pub fn with_underline(&self, underline: bool) -> TextStyle {
        self.mutate(properties::HAS_UNDERLINE, Some(underline))
    }

    pub fn underline(&self) -> TextStyle {
        self.with_underline(true)
    }

    pub fn with_wrap_anywhere(&self, wrap_anywhere: bool) -> TextStyle {
        self.mutate(properties::WRAP_ANYWHERE, Some(wrap_anywhere))
    }

    pub fn with_direction(&self, direction: TextDirection) -> TextStyle {
        self.mutate(properties::DIRECTION, Some(direction))
    }

    /// Sets the style used for glyphs this style's font cannot render.
    pub fn with_fallback(&self, fallback: TextStyle) -> TextStyle {
        self.mutate(properties::FALLBACK, Some(fallback))
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TextStyle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.0.hash == other.0.hash && self.0.entries == other.0.entries)
    }
}

impl Eq for TextStyle {}

impl Hash for TextStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for property in PropertyId::all() {
            if let Some(value) = self.entry(property).value() {
                map.entry(&property.name(), value);
            }
        }
        map.finish()
    }
}
