//! Resolution of panel control ids into reducer actions.

use crate::reducer::A11yAction;

impl A11yAction {
    /// Maps a panel control id to the action it triggers.
    ///
    /// Ids match the controls rendered by the accessibility panel, plus the field names for
    /// controls that use them directly. `letterSpacing` is the panel's text-spacing toggle; the
    /// three-step letter spacing cycle is `letterSpacingLevel`.
    pub fn from_setting_id(setting_id: &str) -> Option<Self> {
        let action = match setting_id.trim() {
            "darkMode" => Self::ToggleDarkMode,
            "highContrast" | "contrast" => Self::ToggleContrast,
            "highlightLinks" => Self::ToggleHighlightLinks,
            "fontSize" | "biggerText" => Self::ToggleBiggerText,
            "letterSpacing" | "textSpacing" => Self::ToggleTextSpacing,
            "pauseAnimations" => Self::TogglePauseAnimations,
            "dyslexiaFont" => Self::ToggleDyslexiaFont,
            "largerCursor" | "largeCursor" => Self::ToggleLargeCursor,
            "textAlign" => Self::CycleTextAlign,
            "lineHeight" => Self::CycleLineHeight,
            "letterSpacingLevel" => Self::CycleLetterSpacing,
            "menu" => Self::ToggleMenuVisibility,
            "reset" => Self::ResetAllPreferences,
            _ => return None,
        };
        Some(action)
    }
}
