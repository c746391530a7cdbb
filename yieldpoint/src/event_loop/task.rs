use serde::{Deserialize, Serialize};

/// A queued unit of work awaiting its turn on the event loop.
///
/// Tasks carry a monotonic sequence number assigned at scheduling time and a
/// human-readable label for tracing. The closure runs exactly once, on the
/// loop's single logical thread; once queued it cannot be withdrawn.
pub struct Task {
    seq: u64,
    label: String,
    work: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
    pub(crate) fn new(seq: u64, label: String, work: Box<dyn FnOnce() + Send + 'static>) -> Self {
        Self { seq, label, work }
    }

    /// Sequence number assigned when the task was scheduled. FIFO delivery
    /// means tasks run in ascending `seq` order.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Human-readable label for trace output.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Metadata snapshot for trace events.
    pub fn meta(&self) -> TaskMeta {
        TaskMeta {
            seq: self.seq,
            label: self.label.clone(),
        }
    }

    /// Consume the task and run its work.
    pub(crate) fn run(self) {
        (self.work)();
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("seq", &self.seq)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Identifying metadata of a scheduled task, as recorded in trace events.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskMeta {
    pub seq: u64,
    pub label: String,
}
