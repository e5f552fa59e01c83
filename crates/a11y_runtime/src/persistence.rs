//! Persistence bridge between the preference store and the host key-value medium.
//!
//! Snapshots are stored as one JSON object under a fixed key. Loads are fail-soft: a missing,
//! unreadable, or malformed value leaves the store at its current values after a single report to
//! the [`LogSink`]. Saves are serialized through an async lock, and a save that is overtaken by a
//! newer request before it reaches the medium is dropped instead of written.

use std::{cell::Cell, rc::Rc};

use futures::{future::LocalBoxFuture, lock::Mutex};
use platform_host::{decode_pref, encode_pref, LogSink, PrefsStore};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    config::A11yConfig,
    model::AccessibilityPreferences,
    reducer::MergeReport,
    store::PreferenceStore,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Persistence failures. Each one is reported to the log sink before it is returned.
pub enum PersistenceError {
    #[error("failed to read accessibility settings: {0}")]
    StorageRead(String),
    #[error("failed to save accessibility settings: {0}")]
    StorageWrite(String),
    #[error("stored accessibility settings are malformed: {0}")]
    MalformedPersistedData(String),
    #[error("failed to serialize accessibility settings: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq)]
/// Result of [`PersistenceBridge::load_and_merge`].
pub enum LoadOutcome {
    /// Nothing was stored under the key.
    Missing,
    /// The stored object was merged field by field.
    Merged(MergeReport),
    /// Reading or parsing failed; the failure was reported and the store left untouched.
    Failed(PersistenceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Successful result of [`PersistenceBridge::save_snapshot`].
pub enum SaveOutcome {
    /// The snapshot reached the storage medium.
    Written,
    /// A newer save was requested before this one acquired the write lock.
    Superseded,
}

#[derive(Clone)]
/// Reads and writes [`AccessibilityPreferences`] snapshots under a fixed storage key.
///
/// Clones share the same write lock and ticket counter, so every clone participates in the same
/// write ordering.
pub struct PersistenceBridge {
    key: Rc<str>,
    prefs: Rc<dyn PrefsStore>,
    log: Rc<dyn LogSink>,
    write_lock: Rc<Mutex<()>>,
    latest_ticket: Rc<Cell<u64>>,
}

impl PersistenceBridge {
    /// Bridge over `prefs` using the configured storage key; failures are reported to `log`.
    pub fn new(config: &A11yConfig, prefs: Rc<dyn PrefsStore>, log: Rc<dyn LogSink>) -> Self {
        Self {
            key: Rc::from(config.storage_key.as_str()),
            prefs,
            log,
            write_lock: Rc::new(Mutex::new(())),
            latest_ticket: Rc::new(Cell::new(0)),
        }
    }

    /// Storage key this bridge reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored value and decodes it into a field map.
    ///
    /// Returns `Ok(None)` when the key is absent. Read and parse failures are reported to the log
    /// sink exactly once before being returned.
    pub async fn load_payload(&self) -> Result<Option<Map<String, Value>>, PersistenceError> {
        let raw = match self.prefs.load_pref(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(err) => return Err(self.report(PersistenceError::StorageRead(err))),
        };
        decode_pref::<Map<String, Value>>(&raw)
            .map(Some)
            .map_err(|err| self.report(PersistenceError::MalformedPersistedData(err)))
    }

    /// Loads the stored snapshot and merges it into `store`.
    pub async fn load_and_merge(&self, store: &mut PreferenceStore) -> LoadOutcome {
        match self.load_payload().await {
            Ok(Some(payload)) => LoadOutcome::Merged(store.merge_partial(&payload)),
            Ok(None) => LoadOutcome::Missing,
            Err(err) => LoadOutcome::Failed(err),
        }
    }

    /// Requests a write of `prefs` and returns the future that performs it.
    ///
    /// The snapshot is serialized and its write ticket taken when this is called, not when the
    /// future is first polled, so request order decides which snapshot wins. The returned future
    /// owns everything it needs and can be spawned.
    pub fn save_snapshot(
        &self,
        prefs: &AccessibilityPreferences,
    ) -> LocalBoxFuture<'static, Result<SaveOutcome, PersistenceError>> {
        let ticket = self.latest_ticket.get() + 1;
        self.latest_ticket.set(ticket);

        let encoded =
            encode_pref(prefs).map_err(|err| self.report(PersistenceError::Serialize(err)));
        let bridge = self.clone();

        Box::pin(async move {
            let raw = encoded?;
            let _guard = bridge.write_lock.lock().await;
            if bridge.latest_ticket.get() != ticket {
                tracing::trace!(ticket, "accessibility snapshot superseded before write");
                return Ok(SaveOutcome::Superseded);
            }
            bridge
                .prefs
                .save_pref(&bridge.key, &raw)
                .await
                .map(|()| SaveOutcome::Written)
                .map_err(|err| bridge.report(PersistenceError::StorageWrite(err)))
        })
    }

    fn report(&self, err: PersistenceError) -> PersistenceError {
        self.log.report(&err.to_string());
        err
    }
}
