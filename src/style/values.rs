//! Concrete domain values carried by style properties.

use serde::{Deserialize, Serialize};

/// Font weight, from thin (100) to extra black (1000).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u16)]
pub enum FontWeight {
    Thin = 100,
    ExtraLight = 200,
    Light = 300,
    #[default]
    Normal = 400,
    Medium = 500,
    SemiBold = 600,
    Bold = 700,
    ExtraBold = 800,
    Black = 900,
    ExtraBlack = 1000,
}

impl FontWeight {
    /// Returns the numeric weight (e.g. 400 for normal, 700 for bold).
    pub fn value(self) -> u16 {
        self as u16
    }
}

/// Vertical placement of a run relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontPosition {
    #[default]
    Normal,
    Subscript,
    Superscript,
}

/// Base direction for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDirection {
    /// Determined from the content.
    #[default]
    Auto,
    LeftToRight,
    RightToLeft,
}

/// Color values used by the library default style.
///
/// Colors are free-form strings; nothing in this crate parses them.
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const WHITE: &str = "#ffffff";
    pub const TRANSPARENT: &str = "#00000000";
}

/// Font family names used by the library default style.
pub mod fonts {
    pub const LATO: &str = "Lato";
}
