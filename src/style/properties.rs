//! Typed handles for every registered property.

use std::sync::Arc;

use super::property::{Property, PropertyId};
use super::text_style::TextStyle;
use super::values::{FontPosition, FontWeight, TextDirection};

pub const COLOR: Property<Arc<str>> = Property::new(PropertyId::Color);
pub const BACKGROUND_COLOR: Property<Arc<str>> = Property::new(PropertyId::BackgroundColor);
pub const FONT_FAMILY: Property<Arc<str>> = Property::new(PropertyId::FontFamily);
pub const SIZE: Property<f32> = Property::new(PropertyId::Size);
pub const LINE_HEIGHT: Property<f32> = Property::new(PropertyId::LineHeight);
pub const LETTER_SPACING: Property<f32> = Property::new(PropertyId::LetterSpacing);
pub const FONT_WEIGHT: Property<FontWeight> = Property::new(PropertyId::FontWeight);
pub const FONT_POSITION: Property<FontPosition> = Property::new(PropertyId::FontPosition);
pub const IS_ITALIC: Property<bool> = Property::new(PropertyId::IsItalic);
pub const HAS_STRIKETHROUGH: Property<bool> = Property::new(PropertyId::HasStrikethrough);
pub const HAS_UNDERLINE: Property<bool> = Property::new(PropertyId::HasUnderline);
pub const WRAP_ANYWHERE: Property<bool> = Property::new(PropertyId::WrapAnywhere);
pub const FALLBACK: Property<TextStyle> = Property::new(PropertyId::Fallback);
pub const DIRECTION: Property<TextDirection> = Property::new(PropertyId::Direction);
