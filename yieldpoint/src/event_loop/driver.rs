use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};

use tokio::{sync::oneshot, task};

use crate::config::LoopConfig;
use crate::sinks::SinkRegistry;

use super::handle::LoopHandle;
use super::task::Task;
use super::trace::{LoopEvent, PaintedText, TraceSink, broadcast};

/// Single-threaded cooperative event loop draining a FIFO queue of
/// zero-delay deferred tasks.
///
/// The loop owns the receiving side of the task queue and a set of
/// [`TraceSink`]s. Between tasks it "repaints": it snapshots every
/// registered status sink and records the texts that became visible. That
/// boundary is the one suspension point the deferred demo relies on — code
/// running inside a task can never observe a repaint of its own writes.
///
/// Drive the loop either manually ([`turn`](Self::turn) /
/// [`run_until_idle`](Self::run_until_idle)) or in the background
/// ([`listen`](Self::listen)); the two modes are exclusive.
pub struct EventLoop {
    registry: SinkRegistry,
    queue: (flume::Sender<Task>, flume::Receiver<Task>),
    trace_sinks: Arc<Mutex<Vec<Box<dyn TraceSink>>>>,
    next_seq: Arc<AtomicU64>,
    listener: Arc<Mutex<Option<ListenerState>>>,
}

impl EventLoop {
    /// Create a loop over `registry` with no trace sinks attached.
    #[must_use]
    pub fn new(registry: SinkRegistry) -> Self {
        Self::with_trace_sinks(registry, Vec::new())
    }

    /// Create a loop with a single trace sink.
    pub fn with_trace_sink<T>(registry: SinkRegistry, sink: T) -> Self
    where
        T: TraceSink + 'static,
    {
        let sinks: Vec<Box<dyn TraceSink>> = vec![Box::new(sink)];
        Self::with_trace_sinks(registry, sinks)
    }

    /// Create a loop with multiple trace sinks.
    #[must_use]
    pub fn with_trace_sinks(registry: SinkRegistry, sinks: Vec<Box<dyn TraceSink>>) -> Self {
        Self {
            registry,
            queue: flume::unbounded(),
            trace_sinks: Arc::new(Mutex::new(sinks)),
            next_seq: Arc::new(AtomicU64::new(0)),
            listener: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a loop with trace sinks built from `config`.
    #[must_use]
    pub fn from_config(registry: SinkRegistry, config: &LoopConfig) -> Self {
        Self::with_trace_sinks(registry, config.trace.build_sinks())
    }

    /// Dynamically add a trace sink (useful for per-test capture).
    pub fn add_trace_sink<T: TraceSink + 'static>(&self, sink: T) {
        self.trace_sinks
            .lock()
            .expect("trace sinks poisoned")
            .push(Box::new(sink));
    }

    /// Get a cloneable scheduling handle so callers can defer work.
    #[must_use]
    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            sender: self.queue.0.clone(),
            next_seq: self.next_seq.clone(),
            trace_sinks: self.trace_sinks.clone(),
        }
    }

    /// The registry whose sinks this loop repaints.
    pub fn registry(&self) -> &SinkRegistry {
        &self.registry
    }

    /// Record a repaint: snapshot every registered sink's text and emit it
    /// as a [`LoopEvent::Repaint`].
    pub fn repaint(&self) {
        repaint_now(&self.registry, &self.trace_sinks);
    }

    /// Run exactly one pending task, then repaint. Returns whether a task
    /// ran.
    pub fn turn(&self) -> bool {
        let Ok(task) = self.queue.1.try_recv() else {
            return false;
        };
        let meta = task.meta();
        broadcast(&self.trace_sinks, &LoopEvent::started(meta.clone()));
        tracing::debug!(seq = meta.seq, label = %meta.label, "running deferred task");
        task.run();
        broadcast(&self.trace_sinks, &LoopEvent::completed(meta));
        self.repaint();
        true
    }

    /// Repaint once (the paint the host gets after its synchronous phase),
    /// then drain the queue one turn at a time. Returns the number of tasks
    /// run.
    pub fn run_until_idle(&self) -> usize {
        self.repaint();
        let mut ran = 0;
        while self.turn() {
            ran += 1;
        }
        ran
    }

    /// Spawn a background task that drains the queue, repainting after each
    /// task. Idempotent: calling multiple times has no effect.
    ///
    /// Starting the listener hands the logical thread to the drain: tasks
    /// still run strictly one at a time, FIFO, but the host thread now runs
    /// *concurrently* with them. The cooperative single-writer model — and
    /// with it the demonstrator's status-ordering guarantees — holds only
    /// while sink writes stay on one side of that boundary: finish any
    /// synchronous trigger phase before calling `listen`, and afterwards
    /// write sinks only from within deferred tasks.
    pub fn listen(&self) {
        let mut guard = self.listener.lock().expect("listener poisoned");
        if guard.is_some() {
            return; // Already listening
        }

        let receiver = self.queue.1.clone();
        let registry = self.registry.clone();
        let trace_sinks = self.trace_sinks.clone();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let handle = task::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    recv = receiver.recv_async() => match recv {
                        Err(_) => break, // all handles dropped
                        Ok(task) => {
                            let meta = task.meta();
                            broadcast(&trace_sinks, &LoopEvent::started(meta.clone()));
                            task.run();
                            broadcast(&trace_sinks, &LoopEvent::completed(meta));
                            repaint_now(&registry, &trace_sinks);
                        }
                    }
                }
            }
        });

        *guard = Some(ListenerState {
            shutdown_tx,
            handle,
        });
    }

    /// Stop the background listener task.
    pub async fn stop_listener(&self) {
        let state = {
            let mut guard = self.listener.lock().expect("listener poisoned");
            guard.take()
        };
        if let Some(state) = state {
            let _ = state.shutdown_tx.send(());
            let _ = state.handle.await;
        }
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.listener.lock() {
            if let Some(state) = guard.take() {
                let _ = state.shutdown_tx.send(());
                state.handle.abort();
            }
        }
    }
}

fn repaint_now(registry: &SinkRegistry, trace_sinks: &Arc<Mutex<Vec<Box<dyn TraceSink>>>>) {
    let painted = registry
        .snapshot()
        .into_iter()
        .map(|(sink_id, text)| PaintedText { sink_id, text })
        .collect();
    broadcast(trace_sinks, &LoopEvent::repaint(painted));
}

struct ListenerState {
    shutdown_tx: oneshot::Sender<()>,
    handle: task::JoinHandle<()>,
}
