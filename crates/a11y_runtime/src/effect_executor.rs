//! Executor for reducer-emitted runtime effects.

use futures::task::LocalSpawnExt;

use crate::{reducer::RuntimeEffect, runtime::A11yRuntime};

/// Runs one effect drained from the store after a transition.
pub(crate) fn run_runtime_effect(runtime: &A11yRuntime, effect: RuntimeEffect) {
    match effect {
        RuntimeEffect::PersistPreferences => persist_preferences(runtime),
    }
}

// The write ticket is taken here, synchronously, so spawn order never reorders snapshots.
fn persist_preferences(runtime: &A11yRuntime) {
    let save = runtime.bridge().save_snapshot(&runtime.snapshot());
    let spawned = runtime.spawner().spawn_local(async move {
        // Failures were already reported by the bridge.
        let _ = save.await;
    });
    if let Err(err) = spawned {
        tracing::warn!("persist accessibility settings failed to spawn: {err}");
    }
}
