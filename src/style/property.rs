//! The property registry.
//!
//! The set of properties is closed: [`PropertyId`] enumerates every one of
//! them with a stable code, and [`PropertyId::ALL`] fixes the order in which
//! merges visit them. [`Property`] adds the value type on top so reads and
//! writes through a handle are always paired with the right variant.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::entry::PropertyValue;
use super::text_style::TextStyle;
use super::values::{FontPosition, FontWeight, TextDirection};

/// Type tag for the values a property carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Number,
    FontWeight,
    FontPosition,
    Flag,
    Direction,
    Style,
}

/// Identity of a registered property.
///
/// The discriminant is the property code: codes are dense from 0 and never
/// change, so they can index per-style storage directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PropertyId {
    Color = 0,
    BackgroundColor = 1,
    FontFamily = 2,
    Size = 3,
    LineHeight = 4,
    LetterSpacing = 5,
    FontWeight = 6,
    FontPosition = 7,
    IsItalic = 8,
    HasStrikethrough = 9,
    HasUnderline = 10,
    WrapAnywhere = 11,
    Fallback = 12,
    Direction = 13,
}

impl PropertyId {
    /// Number of registered properties.
    pub const COUNT: usize = 14;

    /// Every property in merge traversal order.
    pub const ALL: [PropertyId; Self::COUNT] = [
        PropertyId::Color,
        PropertyId::BackgroundColor,
        PropertyId::FontFamily,
        PropertyId::Size,
        PropertyId::LineHeight,
        PropertyId::LetterSpacing,
        PropertyId::FontWeight,
        PropertyId::FontPosition,
        PropertyId::IsItalic,
        PropertyId::HasStrikethrough,
        PropertyId::HasUnderline,
        PropertyId::WrapAnywhere,
        PropertyId::Fallback,
        PropertyId::Direction,
    ];

    /// Iterates the registry in traversal order.
    pub fn all() -> impl Iterator<Item = PropertyId> {
        Self::ALL.into_iter()
    }

    /// Returns the stable code of this property.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a property by its code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::all().find(|property| property.code() == code)
    }

    /// Returns the type tag of the values this property carries.
    pub const fn kind(self) -> ValueKind {
        match self {
            PropertyId::Color | PropertyId::BackgroundColor | PropertyId::FontFamily => {
                ValueKind::Text
            }
            PropertyId::Size | PropertyId::LineHeight | PropertyId::LetterSpacing => {
                ValueKind::Number
            }
            PropertyId::FontWeight => ValueKind::FontWeight,
            PropertyId::FontPosition => ValueKind::FontPosition,
            PropertyId::IsItalic
            | PropertyId::HasStrikethrough
            | PropertyId::HasUnderline
            | PropertyId::WrapAnywhere => ValueKind::Flag,
            PropertyId::Fallback => ValueKind::Style,
            PropertyId::Direction => ValueKind::Direction,
        }
    }

    /// Returns the kebab-case name used in configuration and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            PropertyId::Color => "color",
            PropertyId::BackgroundColor => "background-color",
            PropertyId::FontFamily => "font-family",
            PropertyId::Size => "size",
            PropertyId::LineHeight => "line-height",
            PropertyId::LetterSpacing => "letter-spacing",
            PropertyId::FontWeight => "font-weight",
            PropertyId::FontPosition => "font-position",
            PropertyId::IsItalic => "italic",
            PropertyId::HasStrikethrough => "strikethrough",
            PropertyId::HasUnderline => "underline",
            PropertyId::WrapAnywhere => "wrap-anywhere",
            PropertyId::Fallback => "fallback",
            PropertyId::Direction => "direction",
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Rust type that can be stored in a style property.
pub trait StyleValue: Clone + Sized {
    /// The type tag of properties holding this type.
    const KIND: ValueKind;

    /// Wraps the value for storage.
    fn into_value(self) -> PropertyValue;

    /// Recovers the value, or `None` if the variant belongs to another type.
    fn from_value(value: &PropertyValue) -> Option<Self>;
}

macro_rules! style_value {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl StyleValue for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn into_value(self) -> PropertyValue {
                PropertyValue::$variant(self)
            }

            fn from_value(value: &PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(inner) => Some(inner.clone()),
                    _ => None,
                }
            }
        }
    };
}

style_value!(Arc<str>, Text, Text);
style_value!(f32, Number, Number);
style_value!(FontWeight, FontWeight, FontWeight);
style_value!(FontPosition, FontPosition, FontPosition);
style_value!(bool, Flag, Flag);
style_value!(TextDirection, Direction, Direction);
style_value!(TextStyle, Style, Style);

/// A typed handle for one registered property.
///
/// Handles are only created for the constants in [`properties`], each
/// declared with the value type its [`PropertyId::kind`] names.
///
/// [`properties`]: crate::properties
pub struct Property<T> {
    id: PropertyId,
    _value: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    pub(crate) const fn new(id: PropertyId) -> Self {
        Self {
            id,
            _value: PhantomData,
        }
    }

    /// Returns the untyped descriptor.
    pub const fn id(self) -> PropertyId {
        self.id
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

impl<T> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Property<T> {}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.id).finish()
    }
}
