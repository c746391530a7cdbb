use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use super::status::StatusSink;

/// Lookup-by-identifier collaborator resolving sink ids to [`StatusSink`]
/// handles.
///
/// The registry stands in for the host UI's element lookup so the component
/// stays testable without a real UI host. Sinks are registered up front by
/// the host; the component only ever writes to them.
///
/// Writes to an unknown id are silent no-ops — missing-element handling is a
/// host concern, not classified or reported here.
#[derive(Clone, Debug, Default)]
pub struct SinkRegistry {
    sinks: Arc<Mutex<FxHashMap<String, StatusSink>>>,
}

impl SinkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink under `id` and return a handle to it.
    ///
    /// Registering the same id twice replaces the previous sink, matching a
    /// host re-creating a UI element.
    pub fn register(&self, id: impl Into<String>) -> StatusSink {
        let id = id.into();
        let sink = StatusSink::new(id.clone());
        self.sinks
            .lock()
            .expect("sink registry poisoned")
            .insert(id, sink.clone());
        sink
    }

    /// Resolve `id` to a sink handle, if one is registered.
    pub fn resolve(&self, id: &str) -> Option<StatusSink> {
        self.sinks
            .lock()
            .expect("sink registry poisoned")
            .get(id)
            .cloned()
    }

    /// Replace the text of the sink identified by `sink_id` with `message`.
    ///
    /// No-op when `sink_id` does not resolve.
    pub fn write_status(&self, sink_id: &str, message: impl Into<String>) {
        match self.resolve(sink_id) {
            Some(sink) => sink.set_text(message),
            None => {
                tracing::debug!(sink_id, "status write to unregistered sink dropped");
            }
        }
    }

    /// Snapshot of every registered sink's id and current text, sorted by id.
    ///
    /// This is what a repaint makes visible; the event loop records it in
    /// repaint trace events.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .sinks
            .lock()
            .expect("sink registry poisoned")
            .iter()
            .map(|(id, sink)| (id.clone(), sink.text()))
            .collect();
        entries.sort();
        entries
    }
}
