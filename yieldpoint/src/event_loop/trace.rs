use std::fmt;
use std::io::{self, Result as IoResult, Stdout, Write};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::TaskMeta;

/// One sink text made visible at a repaint point.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaintedText {
    pub sink_id: String,
    pub text: String,
}

/// Structured record of event-loop activity.
///
/// `Scheduled`/`Started`/`Completed` bracket each task's life on the queue;
/// `Repaint` records the sink texts that became visible at a task boundary.
/// In tests a captured stream of these events is the rendering trace: text a
/// user could actually have seen appears in a `Repaint`, text that was
/// overwritten while the thread never yielded does not.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoopEvent {
    Scheduled {
        task: TaskMeta,
        when: DateTime<Utc>,
    },
    Started {
        task: TaskMeta,
        when: DateTime<Utc>,
    },
    Completed {
        task: TaskMeta,
        when: DateTime<Utc>,
    },
    Repaint {
        painted: Vec<PaintedText>,
        when: DateTime<Utc>,
    },
}

impl LoopEvent {
    pub fn scheduled(task: TaskMeta) -> Self {
        LoopEvent::Scheduled {
            task,
            when: Utc::now(),
        }
    }

    pub fn started(task: TaskMeta) -> Self {
        LoopEvent::Started {
            task,
            when: Utc::now(),
        }
    }

    pub fn completed(task: TaskMeta) -> Self {
        LoopEvent::Completed {
            task,
            when: Utc::now(),
        }
    }

    pub fn repaint(painted: Vec<PaintedText>) -> Self {
        LoopEvent::Repaint {
            painted,
            when: Utc::now(),
        }
    }

    /// Stable label for the event kind, useful in assertions and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LoopEvent::Scheduled { .. } => "scheduled",
            LoopEvent::Started { .. } => "started",
            LoopEvent::Completed { .. } => "completed",
            LoopEvent::Repaint { .. } => "repaint",
        }
    }

    /// Task metadata for the task-scoped variants.
    pub fn task(&self) -> Option<&TaskMeta> {
        match self {
            LoopEvent::Scheduled { task, .. }
            | LoopEvent::Started { task, .. }
            | LoopEvent::Completed { task, .. } => Some(task),
            LoopEvent::Repaint { .. } => None,
        }
    }

    /// Painted texts for the `Repaint` variant.
    pub fn painted(&self) -> Option<&[PaintedText]> {
        match self {
            LoopEvent::Repaint { painted, .. } => Some(painted),
            _ => None,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LoopEvent::Scheduled { when, .. }
            | LoopEvent::Started { when, .. }
            | LoopEvent::Completed { when, .. }
            | LoopEvent::Repaint { when, .. } => *when,
        }
    }
}

impl fmt::Display for LoopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopEvent::Scheduled { task, .. } => {
                write!(f, "[#{} {}] scheduled", task.seq, task.label)
            }
            LoopEvent::Started { task, .. } => write!(f, "[#{} {}] started", task.seq, task.label),
            LoopEvent::Completed { task, .. } => {
                write!(f, "[#{} {}] completed", task.seq, task.label)
            }
            LoopEvent::Repaint { painted, .. } => {
                write!(f, "repaint:")?;
                for entry in painted {
                    write!(f, " {}={:?}", entry.sink_id, entry.text)?;
                }
                Ok(())
            }
        }
    }
}

/// Abstraction over an output target that consumes loop trace events.
pub trait TraceSink: Send + Sync {
    /// Handle one event. The sink decides how to render or store it.
    fn handle(&mut self, event: &LoopEvent) -> IoResult<()>;
}

/// Stdout sink rendering events one per line.
pub struct StdOutTrace {
    handle: Stdout,
}

impl Default for StdOutTrace {
    fn default() -> Self {
        Self {
            handle: io::stdout(),
        }
    }
}

impl TraceSink for StdOutTrace {
    fn handle(&mut self, event: &LoopEvent) -> IoResult<()> {
        writeln!(self.handle, "{event}")?;
        self.handle.flush()
    }
}

/// In-memory sink for tests and snapshots.
///
/// Cloneable handle over shared storage: keep one clone, box the other into
/// the loop, and read back what the loop emitted.
#[derive(Clone, Default)]
pub struct MemoryTrace {
    entries: Arc<Mutex<Vec<LoopEvent>>>,
}

impl MemoryTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured events, in emission order.
    pub fn snapshot(&self) -> Vec<LoopEvent> {
        self.entries.lock().expect("trace entries poisoned").clone()
    }

    /// Clear all captured events.
    pub fn clear(&self) {
        self.entries.lock().expect("trace entries poisoned").clear();
    }

    /// Every text painted for `sink_id`, one entry per repaint, in order.
    ///
    /// This is the user-visible history of one sink: what a person watching
    /// the UI element would have read at each paint.
    pub fn painted_texts(&self, sink_id: &str) -> Vec<String> {
        self.snapshot()
            .iter()
            .filter_map(LoopEvent::painted)
            .flat_map(|painted| {
                painted
                    .iter()
                    .filter(|entry| entry.sink_id == sink_id)
                    .map(|entry| entry.text.clone())
            })
            .collect()
    }
}

impl TraceSink for MemoryTrace {
    fn handle(&mut self, event: &LoopEvent) -> IoResult<()> {
        self.entries
            .lock()
            .expect("trace entries poisoned")
            .push(event.clone());
        Ok(())
    }
}

/// Broadcast `event` to every sink, reporting (but not propagating) write
/// failures, so one broken sink cannot stall the loop.
pub(crate) fn broadcast(sinks: &Arc<Mutex<Vec<Box<dyn TraceSink>>>>, event: &LoopEvent) {
    let mut guard = sinks.lock().expect("trace sinks poisoned");
    for sink in guard.iter_mut() {
        if let Err(e) = sink.handle(event) {
            eprintln!("trace sink error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_are_stable() {
        let meta = TaskMeta {
            seq: 3,
            label: "cpu-work:status".into(),
        };
        assert_eq!(
            LoopEvent::started(meta).to_string(),
            "[#3 cpu-work:status] started"
        );
        let repaint = LoopEvent::repaint(vec![PaintedText {
            sink_id: "status".into(),
            text: "Done!".into(),
        }]);
        assert_eq!(repaint.to_string(), "repaint: status=\"Done!\"");
    }

    #[test]
    fn events_round_trip_through_serde() {
        let event = LoopEvent::repaint(vec![PaintedText {
            sink_id: "status".into(),
            text: "calculating....".into(),
        }]);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: LoopEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }

    #[test]
    fn painted_texts_filters_by_sink() {
        let trace = MemoryTrace::new();
        let mut writer = trace.clone();
        writer
            .handle(&LoopEvent::repaint(vec![
                PaintedText {
                    sink_id: "a".into(),
                    text: "one".into(),
                },
                PaintedText {
                    sink_id: "b".into(),
                    text: "two".into(),
                },
            ]))
            .unwrap();
        writer
            .handle(&LoopEvent::repaint(vec![PaintedText {
                sink_id: "a".into(),
                text: "three".into(),
            }]))
            .unwrap();
        assert_eq!(trace.painted_texts("a"), vec!["one", "three"]);
        assert_eq!(trace.painted_texts("b"), vec!["two"]);
    }
}
