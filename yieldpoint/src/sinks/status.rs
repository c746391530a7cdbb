use std::sync::{Arc, Mutex};

/// A named, mutable, text-bearing destination in the host UI.
///
/// `StatusSink` is a cheap cloneable handle over shared text; every clone
/// observes the same cell. It always holds exactly the last message written
/// to it — the cooperative scheduler guarantees a single logical writer, so
/// the mutex never contends in normal operation.
///
/// # Examples
///
/// ```
/// use yieldpoint::sinks::StatusSink;
///
/// let sink = StatusSink::new("status");
/// sink.set_text("calculating....");
/// assert_eq!(sink.text(), "calculating....");
///
/// let other_handle = sink.clone();
/// other_handle.set_text("Done!");
/// assert_eq!(sink.text(), "Done!");
/// ```
#[derive(Clone, Debug)]
pub struct StatusSink {
    id: String,
    text: Arc<Mutex<String>>,
}

impl StatusSink {
    /// Create an empty sink with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Arc::new(Mutex::new(String::new())),
        }
    }

    /// The sink's identifier in the host UI.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Snapshot of the currently displayed text.
    pub fn text(&self) -> String {
        self.text.lock().expect("sink text poisoned").clone()
    }

    /// Replace the displayed text with `message`.
    pub fn set_text(&self, message: impl Into<String>) {
        *self.text.lock().expect("sink text poisoned") = message.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// A sink holds exactly the last message written to it.
    fn last_write_wins() {
        let sink = StatusSink::new("s");
        assert_eq!(sink.text(), "");
        sink.set_text("one");
        sink.set_text("two");
        assert_eq!(sink.text(), "two");
    }

    #[test]
    /// Clones share the same underlying text cell.
    fn clones_share_text() {
        let a = StatusSink::new("s");
        let b = a.clone();
        b.set_text("hello");
        assert_eq!(a.text(), "hello");
        assert_eq!(a.id(), b.id());
    }
}
