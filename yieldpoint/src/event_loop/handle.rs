use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use miette::Diagnostic;
use thiserror::Error;

use super::task::Task;
use super::trace::{LoopEvent, TraceSink, broadcast};

/// Cloneable scheduling handle for an [`EventLoop`](super::EventLoop).
///
/// `defer` is the zero-delay scheduling primitive: the work is enqueued for
/// execution strictly after the currently-running code returns control to
/// the loop, FIFO behind anything already queued. There is no cancellation;
/// once scheduled a task will run.
#[derive(Clone)]
pub struct LoopHandle {
    pub(super) sender: flume::Sender<Task>,
    pub(super) next_seq: Arc<AtomicU64>,
    pub(super) trace_sinks: Arc<Mutex<Vec<Box<dyn TraceSink>>>>,
}

impl LoopHandle {
    /// Enqueue `work` as a zero-delay deferred task and return its sequence
    /// number.
    ///
    /// The `Scheduled` trace event is recorded before the task enters the
    /// queue, so a concurrent drain can never emit `Started` for a task
    /// whose `Scheduled` has not been broadcast yet. A schedule attempt on
    /// a closed loop therefore still leaves a `Scheduled` entry behind.
    ///
    /// Returns [`ScheduleError::LoopClosed`] when the loop has been dropped
    /// and can no longer accept work.
    pub fn defer(
        &self,
        label: impl Into<String>,
        work: impl FnOnce() + Send + 'static,
    ) -> Result<u64, ScheduleError> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let task = Task::new(seq, label.into(), Box::new(work));
        broadcast(&self.trace_sinks, &LoopEvent::scheduled(task.meta()));
        self.sender
            .send(task)
            .map_err(|_| ScheduleError::LoopClosed)?;
        tracing::trace!(seq, "deferred task enqueued");
        Ok(seq)
    }

    /// Number of tasks currently waiting in the queue.
    pub fn pending(&self) -> usize {
        self.sender.len()
    }
}

impl std::fmt::Debug for LoopHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopHandle")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when scheduling deferred work.
#[derive(Debug, Error, Diagnostic)]
pub enum ScheduleError {
    /// The loop's receiving side is gone; the task was not enqueued.
    #[error("event loop closed; deferred task was not scheduled")]
    #[diagnostic(code(yieldpoint::event_loop::closed))]
    LoopClosed,
}
