//! Reducer actions, side-effect intents, and transition logic for accessibility preferences.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{AccessibilityPreferences, LetterSpacing, LineHeight, PreferenceField, TextAlign};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_a11y`] to mutate [`AccessibilityPreferences`].
pub enum A11yAction {
    ToggleDarkMode,
    ToggleContrast,
    ToggleHighlightLinks,
    ToggleBiggerText,
    ToggleTextSpacing,
    TogglePauseAnimations,
    ToggleDyslexiaFont,
    ToggleLargeCursor,
    /// Advance text alignment one step (left, center, right, left).
    CycleTextAlign,
    /// Advance line height one step (1.2, 1.5, 1.8, 1.2).
    CycleLineHeight,
    /// Advance letter spacing one step (0, 1, 2, 0).
    CycleLetterSpacing,
    /// Show or hide the accessibility panel.
    ToggleMenuVisibility,
    /// Restore every preference default while keeping panel visibility.
    ResetAllPreferences,
    /// Apply a persisted field map, skipping unknown or invalid entries.
    MergePartial {
        /// Raw field-name to value map, usually decoded from storage.
        payload: Map<String, Value>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_a11y`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Write the full current snapshot to durable storage.
    PersistPreferences,
}

#[derive(Debug, Clone, PartialEq, Error)]
/// Reason a single persisted field was skipped during a merge.
pub enum MergeRejection {
    /// The key does not name any preference field.
    #[error("unknown preference field `{0}`")]
    UnknownField(String),
    /// The key is known but the value is outside the field's domain.
    #[error("invalid value {value} for preference field `{field}`")]
    InvalidValue {
        /// Persisted key as written in the payload.
        field: String,
        /// Offending value.
        value: Value,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Per-field outcome of a [`merge_partial`] call.
pub struct MergeReport {
    /// Fields overwritten from the payload, in key order of the payload map. Legacy aliases sort
    /// before or after their current names by key, so one field can appear twice.
    pub applied: Vec<PreferenceField>,
    /// Payload entries that were ignored.
    pub rejected: Vec<MergeRejection>,
}

impl MergeReport {
    /// Whether every payload entry was applied.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Applies an [`A11yAction`] to the preference state and collects resulting side effects.
///
/// Every action is total over the declared domains. Toggles and cycles always change the state
/// and therefore always request persistence; a reset or merge that leaves the state untouched
/// requests nothing.
pub fn reduce_a11y(
    state: &mut AccessibilityPreferences,
    action: A11yAction,
) -> Vec<RuntimeEffect> {
    let previous = *state;
    match action {
        A11yAction::ToggleDarkMode => state.dark_mode = !state.dark_mode,
        A11yAction::ToggleContrast => state.contrast = !state.contrast,
        A11yAction::ToggleHighlightLinks => state.highlight_links = !state.highlight_links,
        A11yAction::ToggleBiggerText => state.bigger_text = !state.bigger_text,
        A11yAction::ToggleTextSpacing => state.text_spacing = !state.text_spacing,
        A11yAction::TogglePauseAnimations => state.pause_animations = !state.pause_animations,
        A11yAction::ToggleDyslexiaFont => state.dyslexia_font = !state.dyslexia_font,
        A11yAction::ToggleLargeCursor => state.large_cursor = !state.large_cursor,
        A11yAction::CycleTextAlign => state.text_align = state.text_align.next(),
        A11yAction::CycleLineHeight => state.line_height = state.line_height.next(),
        A11yAction::CycleLetterSpacing => state.letter_spacing = state.letter_spacing.next(),
        A11yAction::ToggleMenuVisibility => state.is_menu_open = !state.is_menu_open,
        A11yAction::ResetAllPreferences => *state = state.reset_keeping_menu(),
        A11yAction::MergePartial { payload } => {
            merge_partial(state, &payload);
        }
    }
    persist_effects(&previous, state)
}

/// Effects owed for a transition from `previous` to `current`: one persist when they differ.
pub(crate) fn persist_effects(
    previous: &AccessibilityPreferences,
    current: &AccessibilityPreferences,
) -> Vec<RuntimeEffect> {
    if previous == current {
        Vec::new()
    } else {
        vec![RuntimeEffect::PersistPreferences]
    }
}

/// Overwrites the fields present in `payload`, leaving absent fields untouched.
///
/// Validation is per field: an unknown key or an out-of-domain value is recorded in the returned
/// [`MergeReport`], traced at debug level, and the remaining entries are still applied.
pub fn merge_partial(
    state: &mut AccessibilityPreferences,
    payload: &Map<String, Value>,
) -> MergeReport {
    let mut report = MergeReport::default();
    for (key, value) in payload {
        let Some(field) = PreferenceField::from_key(key) else {
            report.rejected.push(MergeRejection::UnknownField(key.clone()));
            continue;
        };
        if apply_field(state, field, value) {
            report.applied.push(field);
        } else {
            report.rejected.push(MergeRejection::InvalidValue {
                field: key.clone(),
                value: value.clone(),
            });
        }
    }
    for rejection in &report.rejected {
        tracing::debug!("skipped persisted preference: {rejection}");
    }
    report
}

fn apply_field(
    state: &mut AccessibilityPreferences,
    field: PreferenceField,
    value: &Value,
) -> bool {
    match field {
        PreferenceField::DarkMode => assign_bool(&mut state.dark_mode, value),
        PreferenceField::Contrast => assign_bool(&mut state.contrast, value),
        PreferenceField::HighlightLinks => assign_bool(&mut state.highlight_links, value),
        PreferenceField::BiggerText => assign_bool(&mut state.bigger_text, value),
        PreferenceField::TextSpacing => assign_bool(&mut state.text_spacing, value),
        PreferenceField::PauseAnimations => assign_bool(&mut state.pause_animations, value),
        PreferenceField::DyslexiaFont => assign_bool(&mut state.dyslexia_font, value),
        PreferenceField::LargeCursor => assign_bool(&mut state.large_cursor, value),
        PreferenceField::IsMenuOpen => assign_bool(&mut state.is_menu_open, value),
        PreferenceField::TextAlign => assign_parsed::<TextAlign>(&mut state.text_align, value),
        PreferenceField::LineHeight => assign_parsed::<LineHeight>(&mut state.line_height, value),
        PreferenceField::LetterSpacing => {
            assign_parsed::<LetterSpacing>(&mut state.letter_spacing, value)
        }
    }
}

fn assign_bool(slot: &mut bool, value: &Value) -> bool {
    match value.as_bool() {
        Some(flag) => {
            *slot = flag;
            true
        }
        None => false,
    }
}

fn assign_parsed<T: serde::de::DeserializeOwned>(slot: &mut T, value: &Value) -> bool {
    match T::deserialize(value) {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}
