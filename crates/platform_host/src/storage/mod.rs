//! Key-value storage contracts used for persisted preferences.

pub mod prefs;
