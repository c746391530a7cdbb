//! The deferred-execution demonstrator.
//!
//! Two triggers run the same CPU-bound work and report through the same
//! status sink; the only difference is *when* the work runs relative to the
//! status write. [`Demonstrator::run_blocking`] computes first and writes
//! "Done!" after, never yielding, so no repaint can happen mid-call.
//! [`Demonstrator::run_deferred`] schedules the work as a zero-delay task
//! and writes "calculating...." before returning, so the loop is free to
//! repaint that text before the computation occupies the thread.

use tracing::instrument;

use crate::event_loop::{LoopHandle, ScheduleError};
use crate::sinks::SinkRegistry;
use crate::work::run_cpu_bound_work;

/// Deferred Execution Demonstrator.
///
/// Holds its two collaborators explicitly — the sink registry standing in
/// for the host UI's element lookup, and a scheduling handle for the
/// zero-delay deferral primitive — so the component is testable without a
/// real UI host.
///
/// The triggers assume the cooperative single-writer model: deferred tasks
/// must not run until the trigger has returned. Drive the loop manually
/// ([`EventLoop::run_until_idle`](crate::event_loop::EventLoop::run_until_idle)),
/// or when using the background listener, fire all triggers *before*
/// [`EventLoop::listen`](crate::event_loop::EventLoop::listen) starts the
/// drain. A listener already running while `run_deferred` executes could
/// pick the task up between the enqueue and the synchronous status write,
/// leaving the stale "calculating...." text as the final state.
///
/// # Examples
///
/// ```
/// use yieldpoint::demo::{Demonstrator, STATUS_CALCULATING, STATUS_DONE};
/// use yieldpoint::event_loop::EventLoop;
/// use yieldpoint::sinks::SinkRegistry;
///
/// let registry = SinkRegistry::new();
/// let sink = registry.register("status_ok");
/// let event_loop = EventLoop::new(registry.clone());
/// let demo = Demonstrator::new(registry, event_loop.handle());
///
/// demo.run_deferred("status_ok")?;
/// assert_eq!(sink.text(), STATUS_CALCULATING);
///
/// event_loop.run_until_idle();
/// assert_eq!(sink.text(), STATUS_DONE);
/// # Ok::<(), yieldpoint::event_loop::ScheduleError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Demonstrator {
    registry: SinkRegistry,
    handle: LoopHandle,
}

/// Status text written once the computation has completed.
pub const STATUS_DONE: &str = "Done!";
/// Status text the deferred trigger writes before the computation runs.
pub const STATUS_CALCULATING: &str = "calculating....";

impl Demonstrator {
    #[must_use]
    pub fn new(registry: SinkRegistry, handle: LoopHandle) -> Self {
        Self { registry, handle }
    }

    /// Run the CPU-bound work synchronously, then write [`STATUS_DONE`].
    ///
    /// The deliberate negative example: the whole sequence runs inside the
    /// current task with no yield point, so the thread is unresponsive for
    /// the full duration and whatever text the sink held before the call
    /// stays on screen until the post-work repaint shows "Done!".
    #[instrument(skip(self))]
    pub fn run_blocking(&self, sink_id: &str) {
        let result = run_cpu_bound_work();
        tracing::debug!(result, "blocking computation finished");
        self.registry.write_status(sink_id, STATUS_DONE);
    }

    /// Defer the CPU-bound work as a zero-delay task, then immediately
    /// write [`STATUS_CALCULATING`].
    ///
    /// The status write completes and control returns to the host before
    /// the deferred task executes, which is the entire point: the
    /// "calculating...." text gets a repaint window even though the
    /// computation fully occupies the thread once it runs.
    #[instrument(skip(self), err)]
    pub fn run_deferred(&self, sink_id: &str) -> Result<(), ScheduleError> {
        let registry = self.registry.clone();
        let id = sink_id.to_string();
        self.handle.defer(format!("cpu-work:{sink_id}"), move || {
            let result = run_cpu_bound_work();
            tracing::debug!(result, "deferred computation finished");
            registry.write_status(&id, STATUS_DONE);
        })?;
        self.registry.write_status(sink_id, STATUS_CALCULATING);
        Ok(())
    }
}
