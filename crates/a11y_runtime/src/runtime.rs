//! Runtime container wiring the preference store to write-through persistence.
//!
//! [`A11yRuntime`] owns the long-lived [`PreferenceStore`], the [`PersistenceBridge`], and the
//! spawner used for fire-and-forget saves. The presentation layer holds a clone, reads snapshots,
//! and dispatches actions; it never touches the store's state directly.

use std::{cell::RefCell, rc::Rc};

use futures::task::{LocalSpawn, LocalSpawnExt};
use platform_host::{LogSink, PrefsStore};

use crate::{
    config::A11yConfig,
    effect_executor,
    model::AccessibilityPreferences,
    persistence::{LoadOutcome, PersistenceBridge},
    reducer::A11yAction,
    store::PreferenceStore,
};

#[derive(Clone)]
/// Shared handle to the accessibility preference runtime.
pub struct A11yRuntime {
    store: Rc<RefCell<PreferenceStore>>,
    bridge: PersistenceBridge,
    spawner: Rc<dyn LocalSpawn>,
}

impl A11yRuntime {
    /// Runtime with default preferences persisting through `bridge`.
    pub fn new(bridge: PersistenceBridge, spawner: Rc<dyn LocalSpawn>) -> Self {
        Self {
            store: Rc::new(RefCell::new(PreferenceStore::new())),
            bridge,
            spawner,
        }
    }

    /// Builds a runtime and its bridge from host services.
    pub fn with_host(
        config: &A11yConfig,
        prefs: Rc<dyn PrefsStore>,
        log: Rc<dyn LogSink>,
        spawner: Rc<dyn LocalSpawn>,
    ) -> Self {
        Self::new(PersistenceBridge::new(config, prefs, log), spawner)
    }

    /// Current preference snapshot.
    pub fn snapshot(&self) -> AccessibilityPreferences {
        self.store.borrow().snapshot()
    }

    /// Persistence bridge shared by every clone of this runtime.
    pub fn bridge(&self) -> &PersistenceBridge {
        &self.bridge
    }

    pub(crate) fn spawner(&self) -> &dyn LocalSpawn {
        self.spawner.as_ref()
    }

    /// Applies `action`, schedules persistence, and returns the new snapshot.
    pub fn dispatch(&self, action: A11yAction) -> AccessibilityPreferences {
        self.update(|store| store.apply(action))
    }

    /// Resolves a panel control id and dispatches it. Unknown ids change nothing.
    pub fn dispatch_setting(&self, setting_id: &str) -> Option<AccessibilityPreferences> {
        let action = A11yAction::from_setting_id(setting_id)?;
        Some(self.dispatch(action))
    }

    /// Runs `apply` against the store, then executes every effect it queued.
    ///
    /// The store borrow ends before effects run, so effect handlers may read the runtime.
    ///
    /// # Panics
    ///
    /// The store stays mutably borrowed while `apply` runs. Calling back into this runtime from
    /// inside `apply` (`snapshot`, `dispatch`, or a nested `update`) panics; use the
    /// `&mut PreferenceStore` argument instead.
    pub fn update<R>(&self, apply: impl FnOnce(&mut PreferenceStore) -> R) -> R {
        let (result, effects) = {
            let mut store = self.store.borrow_mut();
            let result = apply(&mut *store);
            (result, store.drain_effects())
        };
        for effect in effects {
            effect_executor::run_runtime_effect(self, effect);
        }
        result
    }

    /// Loads the persisted snapshot and merges it into the store.
    ///
    /// Intended to complete before the first render. A merge that changes state is written back,
    /// which rewrites payloads from older schema revisions under their current field names.
    pub async fn hydrate(&self) -> LoadOutcome {
        match self.bridge.load_payload().await {
            Ok(Some(payload)) => {
                LoadOutcome::Merged(self.update(|store| store.merge_partial(&payload)))
            }
            Ok(None) => LoadOutcome::Missing,
            Err(err) => LoadOutcome::Failed(err),
        }
    }

    /// Spawns [`Self::hydrate`] on the runtime spawner without waiting for it.
    pub fn boot(&self) {
        let runtime = self.clone();
        let spawned = self.spawner.spawn_local(async move {
            if let LoadOutcome::Merged(report) = runtime.hydrate().await {
                tracing::debug!(
                    applied = report.applied.len(),
                    rejected = report.rejected.len(),
                    "accessibility settings hydrated"
                );
            }
        });
        if let Err(err) = spawned {
            tracing::warn!("accessibility settings hydration failed to spawn: {err}");
        }
    }
}
