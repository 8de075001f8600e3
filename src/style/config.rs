//! Declarative style configuration.
//!
//! [`StyleConfig`] is the serde form of a [`TextStyle`]: one optional field
//! per property, named in kebab-case. Missing fields are absent entries, so
//! a configuration only lists what it wants to set.
//!
//! ```rust
//! use textstyle::{StyleConfig, TextStyle};
//!
//! let config: StyleConfig = serde_json::from_str(
//!     r#"{ "font-family": "Inter", "size": 10.5, "fallback": { "font-family": "Noto Emoji" } }"#,
//! ).unwrap();
//!
//! let style = TextStyle::from(config);
//! assert_eq!(style.font_family(), Some("Inter"));
//! assert_eq!(style.fallback().and_then(|f| f.font_family()), Some("Noto Emoji"));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::entry::ValueEntry;
use super::property::PropertyId;
use super::text_style::TextStyle;
use super::values::{FontPosition, FontWeight, TextDirection};

/// Serializable description of a style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct StyleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_position: Option<FontPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_anywhere: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Box<StyleConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<TextDirection>,
}

fn text(value: Option<String>) -> ValueEntry {
    value.map(Arc::<str>::from).into()
}

impl From<StyleConfig> for TextStyle {
    fn from(config: StyleConfig) -> Self {
        let fallback = config.fallback.map(|fallback| TextStyle::from(*fallback));
        let entries = [
            (PropertyId::Color, text(config.color)),
            (PropertyId::BackgroundColor, text(config.background_color)),
            (PropertyId::FontFamily, text(config.font_family)),
            (PropertyId::Size, config.size.into()),
            (PropertyId::LineHeight, config.line_height.into()),
            (PropertyId::LetterSpacing, config.letter_spacing.into()),
            (PropertyId::FontWeight, config.font_weight.into()),
            (PropertyId::FontPosition, config.font_position.into()),
            (PropertyId::IsItalic, config.italic.into()),
            (PropertyId::HasStrikethrough, config.strikethrough.into()),
            (PropertyId::HasUnderline, config.underline.into()),
            (PropertyId::WrapAnywhere, config.wrap_anywhere.into()),
            (PropertyId::Fallback, fallback.into()),
            (PropertyId::Direction, config.direction.into()),
        ];

        entries
            .into_iter()
            .fold(TextStyle::new(), |style, (property, entry)| {
                style.with_entry(property, entry)
            })
    }
}

impl From<TextStyle> for StyleConfig {
    fn from(style: TextStyle) -> Self {
        StyleConfig::from(&style)
    }
}

impl From<&TextStyle> for StyleConfig {
    fn from(style: &TextStyle) -> Self {
        StyleConfig {
            color: style.color().map(str::to_owned),
            background_color: style.background_color().map(str::to_owned),
            font_family: style.font_family().map(str::to_owned),
            size: style.size(),
            line_height: style.line_height(),
            letter_spacing: style.letter_spacing(),
            font_weight: style.font_weight(),
            font_position: style.font_position(),
            italic: style.is_italic(),
            strikethrough: style.has_strikethrough(),
            underline: style.has_underline(),
            wrap_anywhere: style.wrap_anywhere(),
            fallback: style
                .fallback()
                .map(|fallback| Box::new(StyleConfig::from(fallback))),
            direction: style.direction(),
        }
    }
}
