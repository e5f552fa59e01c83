//! Logging collaborator contracts for host-side failure reports.

use std::{cell::RefCell, rc::Rc};

/// Sink for human-readable failure descriptions raised by host-facing services.
///
/// Reports are fire-and-forget: a sink never returns an error and callers never wait on it.
pub trait LogSink {
    /// Records one failure description.
    fn report(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Sink that forwards every report to [`tracing::warn!`].
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn report(&self, message: &str) {
        tracing::warn!(target: "platform_host::log", "{message}");
    }
}

#[derive(Debug, Clone, Default)]
/// Sink that retains reports in memory, also forwarding them to `tracing`.
///
/// Clones share the same buffer.
pub struct MemoryLogSink {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryLogSink {
    /// Returns all reports recorded so far, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Number of reports recorded so far.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no report has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl LogSink for MemoryLogSink {
    fn report(&self, message: &str) {
        tracing::warn!(target: "platform_host::log", "{message}");
        self.entries.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_reports_in_order() {
        let sink = MemoryLogSink::default();
        let shared = sink.clone();
        let sink_obj: &dyn LogSink = &sink;

        assert!(shared.is_empty());
        sink_obj.report("load failed");
        sink_obj.report("save failed");

        assert_eq!(shared.len(), 2);
        assert_eq!(
            shared.entries(),
            vec!["load failed".to_string(), "save failed".to_string()]
        );
    }

    #[test]
    fn tracing_sink_accepts_reports_without_subscriber() {
        TracingLogSink.report("no subscriber installed");
    }
}
