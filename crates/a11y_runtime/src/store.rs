//! Owned preference container with named transition operations.

use serde_json::{Map, Value};

use crate::{
    model::AccessibilityPreferences,
    reducer::{self, reduce_a11y, A11yAction, MergeReport, RuntimeEffect},
};

/// Single source of truth for accessibility preferences.
///
/// State is private: it changes only through the transitions below, each of which returns the new
/// snapshot and queues any [`RuntimeEffect`] for the owning runtime to drain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceStore {
    state: AccessibilityPreferences,
    pending: Vec<RuntimeEffect>,
}

impl PreferenceStore {
    /// Store holding default preferences and no queued effects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> AccessibilityPreferences {
        self.state
    }

    /// Applies `action` and returns the resulting snapshot.
    pub fn apply(&mut self, action: A11yAction) -> AccessibilityPreferences {
        let effects = reduce_a11y(&mut self.state, action);
        self.pending.extend(effects);
        self.state
    }

    /// Removes and returns the effects queued since the last drain, in emission order.
    pub fn drain_effects(&mut self) -> Vec<RuntimeEffect> {
        std::mem::take(&mut self.pending)
    }

    /// Flips dark mode.
    pub fn toggle_dark_mode(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ToggleDarkMode)
    }

    /// Flips high contrast.
    pub fn toggle_contrast(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ToggleContrast)
    }

    /// Flips link highlighting.
    pub fn toggle_highlight_links(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ToggleHighlightLinks)
    }

    /// Flips enlarged text.
    pub fn toggle_bigger_text(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ToggleBiggerText)
    }

    /// Flips extra text spacing.
    pub fn toggle_text_spacing(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ToggleTextSpacing)
    }

    /// Flips paused animations.
    pub fn toggle_pause_animations(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::TogglePauseAnimations)
    }

    /// Flips the dyslexia-friendly font.
    pub fn toggle_dyslexia_font(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ToggleDyslexiaFont)
    }

    /// Flips the large cursor.
    pub fn toggle_large_cursor(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ToggleLargeCursor)
    }

    /// Advances text alignment one step.
    pub fn cycle_text_align(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::CycleTextAlign)
    }

    /// Advances line height one step.
    pub fn cycle_line_height(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::CycleLineHeight)
    }

    /// Advances letter spacing one step.
    pub fn cycle_letter_spacing(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::CycleLetterSpacing)
    }

    /// Shows or hides the panel.
    pub fn toggle_menu_visibility(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ToggleMenuVisibility)
    }

    /// Restores defaults while keeping panel visibility.
    pub fn reset_all_preferences(&mut self) -> AccessibilityPreferences {
        self.apply(A11yAction::ResetAllPreferences)
    }

    /// Merges a persisted field map and reports which entries were applied or skipped.
    ///
    /// Queues persistence under the same rule as [`reduce_a11y`]: only when the state changed.
    pub fn merge_partial(&mut self, payload: &Map<String, Value>) -> MergeReport {
        let previous = self.state;
        let report = reducer::merge_partial(&mut self.state, payload);
        self.pending.extend(reducer::persist_effects(&previous, &self.state));
        report
    }
}
