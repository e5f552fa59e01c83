use std::{cell::RefCell, rc::Rc};

use a11y_runtime::{
    A11yAction, A11yConfig, A11yRuntime, AccessibilityPreferences, LetterSpacing, LineHeight,
    LoadOutcome, PreferenceStore, TextAlign, DEFAULT_STORAGE_KEY,
};
use futures::{
    channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender},
    executor::LocalPool,
    lock::Mutex,
    StreamExt,
};
use platform_host::{MemoryLogSink, MemoryPrefsStore, PrefsStore, PrefsStoreFuture};
use pretty_assertions::assert_eq;

/// Store whose writes wait for a permit, so tests control when a save completes.
#[derive(Clone)]
struct GatedPrefsStore {
    inner: MemoryPrefsStore,
    permits: Rc<Mutex<UnboundedReceiver<()>>>,
    landed: Rc<RefCell<Vec<String>>>,
}

impl GatedPrefsStore {
    fn new() -> (Self, UnboundedSender<()>) {
        let (tx, rx) = unbounded();
        let store = Self {
            inner: MemoryPrefsStore::default(),
            permits: Rc::new(Mutex::new(rx)),
            landed: Rc::default(),
        };
        (store, tx)
    }

    fn landed(&self) -> Vec<AccessibilityPreferences> {
        self.landed
            .borrow()
            .iter()
            .map(|raw| serde_json::from_str(raw).expect("every landed write is a full snapshot"))
            .collect()
    }
}

impl PrefsStore for GatedPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        self.inner.load_pref(key)
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut permits = self.permits.lock().await;
            if permits.next().await.is_none() {
                return Err("gate closed".to_string());
            }
            drop(permits);
            self.landed.borrow_mut().push(raw_json.to_string());
            self.inner.save_pref(key, raw_json).await
        })
    }
}

fn runtime_over(prefs: Rc<dyn PrefsStore>, log: &MemoryLogSink, pool: &LocalPool) -> A11yRuntime {
    A11yRuntime::with_host(
        &A11yConfig::default(),
        prefs,
        Rc::new(log.clone()),
        Rc::new(pool.spawner()),
    )
}

#[test]
fn rapid_toggles_before_any_save_land_as_one_snapshot_with_both() {
    let mut pool = LocalPool::new();
    let (prefs, permits) = GatedPrefsStore::new();
    let log = MemoryLogSink::default();
    let runtime = runtime_over(Rc::new(prefs.clone()), &log, &pool);

    runtime.dispatch(A11yAction::ToggleDarkMode);
    runtime.dispatch(A11yAction::ToggleContrast);
    permits.unbounded_send(()).expect("permit");
    permits.unbounded_send(()).expect("permit");
    pool.run_until_stalled();

    let landed = prefs.landed();
    assert_eq!(landed.len(), 1);
    assert!(landed[0].dark_mode);
    assert!(landed[0].contrast);
    assert_eq!(prefs.inner.write_count(), 1);
    assert!(log.is_empty());
}

#[test]
fn mutations_during_in_flight_save_never_interleave_and_last_state_wins() {
    let mut pool = LocalPool::new();
    let (prefs, permits) = GatedPrefsStore::new();
    let log = MemoryLogSink::default();
    let runtime = runtime_over(Rc::new(prefs.clone()), &log, &pool);

    runtime.dispatch(A11yAction::ToggleDarkMode);
    pool.run_until_stalled();

    runtime.dispatch(A11yAction::ToggleContrast);
    runtime.dispatch(A11yAction::ToggleBiggerText);
    pool.run_until_stalled();
    assert!(prefs.landed().is_empty(), "first write still waiting");

    permits.unbounded_send(()).expect("permit");
    pool.run_until_stalled();
    permits.unbounded_send(()).expect("permit");
    pool.run_until_stalled();

    let landed = prefs.landed();
    assert_eq!(landed.len(), 2);
    assert_eq!(
        landed[0],
        AccessibilityPreferences {
            dark_mode: true,
            ..AccessibilityPreferences::default()
        }
    );
    assert_eq!(landed[1], runtime.snapshot());
    assert!(landed[1].dark_mode && landed[1].contrast && landed[1].bigger_text);
}

#[test]
fn saved_state_hydrates_a_fresh_runtime_field_for_field() {
    let mut pool = LocalPool::new();
    let prefs = MemoryPrefsStore::default();
    let log = MemoryLogSink::default();

    let first = runtime_over(Rc::new(prefs.clone()), &log, &pool);
    first.update(|store: &mut PreferenceStore| {
        store.toggle_highlight_links();
        store.toggle_dyslexia_font();
        store.toggle_pause_animations();
        store.cycle_text_align();
        store.cycle_text_align();
        store.cycle_line_height();
        store.cycle_letter_spacing();
        store.cycle_letter_spacing();
        store.toggle_menu_visibility();
    });
    pool.run_until_stalled();
    assert_eq!(prefs.write_count(), 1);

    let second = runtime_over(Rc::new(prefs.clone()), &log, &pool);
    let outcome = pool.run_until(second.hydrate());

    assert!(matches!(outcome, LoadOutcome::Merged(ref report) if report.is_clean()));
    assert_eq!(second.snapshot(), first.snapshot());
    assert_eq!(
        second.snapshot(),
        AccessibilityPreferences {
            highlight_links: true,
            dyslexia_font: true,
            pause_animations: true,
            text_align: TextAlign::Right,
            line_height: LineHeight::Relaxed,
            letter_spacing: LetterSpacing::Wider,
            is_menu_open: true,
            ..AccessibilityPreferences::default()
        }
    );
    assert!(log.is_empty());
}

#[test]
fn corrupt_snapshot_degrades_to_defaults_and_is_replaced_on_next_change() {
    let mut pool = LocalPool::new();
    let prefs = MemoryPrefsStore::with_entry(DEFAULT_STORAGE_KEY, "not json at all");
    let log = MemoryLogSink::default();
    let runtime = runtime_over(Rc::new(prefs.clone()), &log, &pool);

    let outcome = pool.run_until(runtime.hydrate());

    assert!(matches!(outcome, LoadOutcome::Failed(_)));
    assert_eq!(runtime.snapshot(), AccessibilityPreferences::default());
    assert_eq!(log.len(), 1);
    assert_eq!(prefs.write_count(), 0);

    runtime.dispatch(A11yAction::ToggleLargeCursor);
    pool.run_until_stalled();

    let stored: AccessibilityPreferences =
        serde_json::from_str(&prefs.raw(DEFAULT_STORAGE_KEY).expect("stored")).expect("json");
    assert!(stored.large_cursor);
    assert_eq!(log.len(), 1);
}

#[test]
fn legacy_payload_is_rewritten_under_current_field_names() {
    let mut pool = LocalPool::new();
    let prefs = MemoryPrefsStore::with_entry(
        DEFAULT_STORAGE_KEY,
        r#"{"darkMode":true,"dyslexia":true,"cursor":true,"textAlign":"center"}"#,
    );
    let log = MemoryLogSink::default();
    let runtime = runtime_over(Rc::new(prefs.clone()), &log, &pool);

    pool.run_until(runtime.hydrate());
    pool.run_until_stalled();

    let raw = prefs.raw(DEFAULT_STORAGE_KEY).expect("stored");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["dyslexiaFont"], serde_json::json!(true));
    assert_eq!(value["largeCursor"], serde_json::json!(true));
    assert!(value.get("dyslexia").is_none());
    assert_eq!(value["textAlign"], serde_json::json!("center"));
}
