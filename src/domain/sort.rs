//! Sort order for the home screen entry list.

use serde::{Deserialize, Serialize};

/// Ordering applied to vault entries on the home screen.
///
/// Exactly one option is active at any time; the bar's sort menu is the only
/// writer. Serialized with the short names the menu displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOption {
    /// User-defined order (the stored entry position).
    #[default]
    #[serde(rename = "custom")]
    Custom,

    /// Issuer, then account, A to Z.
    #[serde(rename = "a-z")]
    AlphabeticalAscending,

    /// Issuer, then account, Z to A.
    #[serde(rename = "z-a")]
    AlphabeticalDescending,
}

impl SortOption {
    /// All options in the order the sort menu lists them.
    pub const ALL: [Self; 3] = [
        Self::Custom,
        Self::AlphabeticalAscending,
        Self::AlphabeticalDescending,
    ];

    /// Label lookup for the sort menu.
    ///
    /// `Custom` is localized; the alphabetical options use fixed glyph labels.
    #[must_use]
    pub const fn label(self) -> SortLabel {
        match self {
            Self::Custom => SortLabel::Translated("appBar.custom"),
            Self::AlphabeticalAscending => SortLabel::Literal("A-Z"),
            Self::AlphabeticalDescending => SortLabel::Literal("Z-A"),
        }
    }
}

/// How a sort option's menu label is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortLabel {
    /// Resolve through the translation catalog.
    Translated(&'static str),
    /// Display as-is.
    Literal(&'static str),
}
