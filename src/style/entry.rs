//! Value entries: the per-property slot of a style.

use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

use super::property::{StyleValue, ValueKind};
use super::text_style::TextStyle;
use super::values::{FontPosition, FontWeight, TextDirection};

/// A concrete property value, one variant per [`ValueKind`].
///
/// Numbers compare by value with `-0.0 == 0.0` and every NaN equal to every
/// other NaN, which keeps equality consistent with hashing.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Text(Arc<str>),
    Number(f32),
    FontWeight(FontWeight),
    FontPosition(FontPosition),
    Flag(bool),
    Direction(TextDirection),
    Style(TextStyle),
}

impl PropertyValue {
    /// Returns the type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::Text(_) => ValueKind::Text,
            PropertyValue::Number(_) => ValueKind::Number,
            PropertyValue::FontWeight(_) => ValueKind::FontWeight,
            PropertyValue::FontPosition(_) => ValueKind::FontPosition,
            PropertyValue::Flag(_) => ValueKind::Flag,
            PropertyValue::Direction(_) => ValueKind::Direction,
            PropertyValue::Style(_) => ValueKind::Style,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            PropertyValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            PropertyValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_style(&self) -> Option<&TextStyle> {
        match self {
            PropertyValue::Style(style) => Some(style),
            _ => None,
        }
    }
}

fn number_bits(number: f32) -> u32 {
    if number == 0.0 {
        0.0f32.to_bits()
    } else if number.is_nan() {
        f32::NAN.to_bits()
    } else {
        number.to_bits()
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::Text(a), PropertyValue::Text(b)) => a == b,
            (PropertyValue::Number(a), PropertyValue::Number(b)) => {
                number_bits(*a) == number_bits(*b)
            }
            (PropertyValue::FontWeight(a), PropertyValue::FontWeight(b)) => a == b,
            (PropertyValue::FontPosition(a), PropertyValue::FontPosition(b)) => a == b,
            (PropertyValue::Flag(a), PropertyValue::Flag(b)) => a == b,
            (PropertyValue::Direction(a), PropertyValue::Direction(b)) => a == b,
            (PropertyValue::Style(a), PropertyValue::Style(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PropertyValue {}

impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            PropertyValue::Text(text) => text.hash(state),
            PropertyValue::Number(number) => number_bits(*number).hash(state),
            PropertyValue::FontWeight(weight) => weight.hash(state),
            PropertyValue::FontPosition(position) => position.hash(state),
            PropertyValue::Flag(flag) => flag.hash(state),
            PropertyValue::Direction(direction) => direction.hash(state),
            PropertyValue::Style(style) => style.hash(state),
        }
    }
}

/// The slot a style holds for one property.
///
/// `Absent` means "never set". A logical null written through the typed API
/// (`None`) becomes `Absent`, so a present entry always carries a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ValueEntry {
    #[default]
    Absent,
    Present(PropertyValue),
}

impl ValueEntry {
    /// The entry shared by every unset property.
    pub const ABSENT: ValueEntry = ValueEntry::Absent;

    /// Creates a present entry.
    pub fn present<T: StyleValue>(value: T) -> Self {
        ValueEntry::Present(value.into_value())
    }

    /// Returns `true` if this entry carries a value.
    pub fn has_value(&self) -> bool {
        matches!(self, ValueEntry::Present(_))
    }

    /// Returns the carried value, if any.
    pub fn value(&self) -> Option<&PropertyValue> {
        match self {
            ValueEntry::Present(value) => Some(value),
            ValueEntry::Absent => None,
        }
    }

    /// Recovers a typed value from this entry.
    pub fn get<T: StyleValue>(&self) -> Option<T> {
        self.value().and_then(T::from_value)
    }
}

impl<T: StyleValue> From<Option<T>> for ValueEntry {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => ValueEntry::present(value),
            None => ValueEntry::Absent,
        }
    }
}
