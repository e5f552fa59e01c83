//! Accessibility preference runtime.
//!
//! The crate holds the state machine behind an accessibility settings panel: boolean toggles,
//! three-step cycles for text alignment, line height, and letter spacing, a reset that keeps the
//! panel open, and a fail-soft merge of persisted data. Every mutating transition is written
//! through to a host [`platform_host::PrefsStore`] under a single key.
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use a11y_runtime::{A11yAction, A11yConfig, A11yRuntime};
//! use futures::executor::LocalPool;
//! use platform_host::{MemoryPrefsStore, TracingLogSink};
//!
//! let mut pool = LocalPool::new();
//! let runtime = A11yRuntime::with_host(
//!     &A11yConfig::default(),
//!     Rc::new(MemoryPrefsStore::default()),
//!     Rc::new(TracingLogSink),
//!     Rc::new(pool.spawner()),
//! );
//! pool.run_until(runtime.hydrate());
//! runtime.dispatch(A11yAction::ToggleDarkMode);
//! pool.run_until_stalled();
//! ```

pub mod config;
mod effect_executor;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime;
mod settings;
pub mod store;

pub use config::{A11yConfig, ConfigError};
pub use model::*;
pub use persistence::{LoadOutcome, PersistenceBridge, PersistenceError, SaveOutcome};
pub use reducer::{
    merge_partial, reduce_a11y, A11yAction, MergeRejection, MergeReport, RuntimeEffect,
};
pub use runtime::A11yRuntime;
pub use store::PreferenceStore;
