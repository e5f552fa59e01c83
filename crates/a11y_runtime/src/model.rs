use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key used when no configuration overrides it.
pub const DEFAULT_STORAGE_KEY: &str = "accessibilitySettings";

const WIRE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{value} is not a supported {field} value")]
/// A wire value fell outside one of the closed preference domains.
pub struct OutOfDomain {
    /// Persisted key of the field that rejected the value.
    pub field: &'static str,
    /// Rejected wire value.
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Successor in the left, center, right rotation.
    pub fn next(self) -> Self {
        match self {
            Self::Left => Self::Center,
            Self::Center => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum LineHeight {
    #[default]
    Normal,
    Relaxed,
    Loose,
}

impl LineHeight {
    /// Successor in the 1.2, 1.5, 1.8 rotation.
    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::Relaxed,
            Self::Relaxed => Self::Loose,
            Self::Loose => Self::Normal,
        }
    }

    /// Line-height multiplier written to storage.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Normal => 1.2,
            Self::Relaxed => 1.5,
            Self::Loose => 1.8,
        }
    }
}

impl From<LineHeight> for f64 {
    fn from(value: LineHeight) -> Self {
        value.multiplier()
    }
}

impl TryFrom<f64> for LineHeight {
    type Error = OutOfDomain;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        [Self::Normal, Self::Relaxed, Self::Loose]
            .into_iter()
            .find(|candidate| (candidate.multiplier() - value).abs() < WIRE_EPSILON)
            .ok_or(OutOfDomain {
                field: "lineHeight",
                value,
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub enum LetterSpacing {
    #[default]
    Normal,
    Wide,
    Wider,
}

impl LetterSpacing {
    /// Successor in the 0, 1, 2 rotation.
    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::Wide,
            Self::Wide => Self::Wider,
            Self::Wider => Self::Normal,
        }
    }

    /// Extra spacing in points, as written to storage.
    pub fn points(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Wide => 1,
            Self::Wider => 2,
        }
    }
}

impl From<LetterSpacing> for u8 {
    fn from(value: LetterSpacing) -> Self {
        value.points()
    }
}

impl TryFrom<f64> for LetterSpacing {
    type Error = OutOfDomain;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        [Self::Normal, Self::Wide, Self::Wider]
            .into_iter()
            .find(|candidate| (f64::from(candidate.points()) - value).abs() < WIRE_EPSILON)
            .ok_or(OutOfDomain {
                field: "letterSpacing",
                value,
            })
    }
}

/// Complete accessibility preference snapshot.
///
/// The runtime owns the canonical instance; callers receive copies and change the canonical state
/// only through [`crate::A11yAction`] transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityPreferences {
    pub dark_mode: bool,
    pub contrast: bool,
    pub highlight_links: bool,
    pub bigger_text: bool,
    pub text_spacing: bool,
    pub pause_animations: bool,
    pub dyslexia_font: bool,
    pub large_cursor: bool,
    pub text_align: TextAlign,
    pub line_height: LineHeight,
    pub letter_spacing: LetterSpacing,
    /// Panel visibility. Persisted for UI continuity but never cleared by a reset.
    pub is_menu_open: bool,
}

impl AccessibilityPreferences {
    /// Defaults for every user preference, keeping the current panel visibility.
    pub fn reset_keeping_menu(self) -> Self {
        Self {
            is_menu_open: self.is_menu_open,
            ..Self::default()
        }
    }
}

/// Persisted field names, including the keys written by earlier schema revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    DarkMode,
    Contrast,
    HighlightLinks,
    BiggerText,
    TextSpacing,
    PauseAnimations,
    DyslexiaFont,
    LargeCursor,
    TextAlign,
    LineHeight,
    LetterSpacing,
    IsMenuOpen,
}

impl PreferenceField {
    /// Every field, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::DarkMode,
        Self::Contrast,
        Self::HighlightLinks,
        Self::BiggerText,
        Self::TextSpacing,
        Self::PauseAnimations,
        Self::DyslexiaFont,
        Self::LargeCursor,
        Self::TextAlign,
        Self::LineHeight,
        Self::LetterSpacing,
        Self::IsMenuOpen,
    ];

    /// Canonical key written by the current serializer.
    pub fn key(self) -> &'static str {
        match self {
            Self::DarkMode => "darkMode",
            Self::Contrast => "contrast",
            Self::HighlightLinks => "highlightLinks",
            Self::BiggerText => "biggerText",
            Self::TextSpacing => "textSpacing",
            Self::PauseAnimations => "pauseAnimations",
            Self::DyslexiaFont => "dyslexiaFont",
            Self::LargeCursor => "largeCursor",
            Self::TextAlign => "textAlign",
            Self::LineHeight => "lineHeight",
            Self::LetterSpacing => "letterSpacing",
            Self::IsMenuOpen => "isMenuOpen",
        }
    }

    /// Resolves a persisted key. `dyslexia` and `cursor` are accepted from older payloads.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "dyslexia" => Some(Self::DyslexiaFont),
            "cursor" => Some(Self::LargeCursor),
            other => Self::ALL.into_iter().find(|field| field.key() == other),
        }
    }
}
