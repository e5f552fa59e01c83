//! Typed host-domain contracts shared by the accessibility runtime and its host adapters.
//!
//! This crate is the boundary between preference state and the device: it exposes the
//! string-keyed [`PrefsStore`] storage medium and the [`LogSink`] failure-report collaborator,
//! each with a no-op or in-memory adapter usable on any target, plus typed JSON helpers for
//! values stored through a [`PrefsStore`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod log;
pub mod storage;

pub use log::{LogSink, MemoryLogSink, TracingLogSink};
pub use storage::prefs::{
    decode_pref, encode_pref, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
};
