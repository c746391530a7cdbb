//! Loop configuration with env-backed defaults.

use crate::event_loop::{MemoryTrace, StdOutTrace, TraceSink};

/// Where loop trace events go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceSinkConfig {
    StdOut,
    Memory,
}

/// Trace sink selection for an event loop.
#[derive(Clone, Debug, Default)]
pub struct TraceConfig {
    sinks: Vec<TraceSinkConfig>,
}

impl TraceConfig {
    #[must_use]
    pub fn new(sinks: Vec<TraceSinkConfig>) -> Self {
        Self { sinks }
    }

    #[must_use]
    pub fn with_stdout_only() -> Self {
        Self::new(vec![TraceSinkConfig::StdOut])
    }

    #[must_use]
    pub fn with_memory_sink() -> Self {
        Self::new(vec![TraceSinkConfig::StdOut, TraceSinkConfig::Memory])
    }

    #[must_use]
    pub fn add_sink(mut self, sink: TraceSinkConfig) -> Self {
        if !self.sinks.contains(&sink) {
            self.sinks.push(sink);
        }
        self
    }

    pub fn sinks(&self) -> &[TraceSinkConfig] {
        &self.sinks
    }

    /// Materialize the configured sinks.
    pub(crate) fn build_sinks(&self) -> Vec<Box<dyn TraceSink>> {
        self.sinks
            .iter()
            .map(|sink| -> Box<dyn TraceSink> {
                match sink {
                    TraceSinkConfig::StdOut => Box::new(StdOutTrace::default()),
                    TraceSinkConfig::Memory => Box::new(MemoryTrace::new()),
                }
            })
            .collect()
    }
}

/// Configuration for building an [`EventLoop`](crate::event_loop::EventLoop).
#[derive(Clone, Debug)]
pub struct LoopConfig {
    pub trace: TraceConfig,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            trace: Self::resolve_trace_config(),
        }
    }
}

impl LoopConfig {
    /// Read `YIELDPOINT_TRACE` (`stdout`, `memory`, or `none`) from the
    /// environment, `.env` included; stdout when unset or unrecognized.
    fn resolve_trace_config() -> TraceConfig {
        dotenvy::dotenv().ok();
        match std::env::var("YIELDPOINT_TRACE").as_deref() {
            Ok("memory") => TraceConfig::with_memory_sink(),
            Ok("none") => TraceConfig::default(),
            _ => TraceConfig::with_stdout_only(),
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: TraceConfig) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn with_stdout_trace(self) -> Self {
        self.with_trace(TraceConfig::with_stdout_only())
    }

    #[must_use]
    pub fn without_trace(self) -> Self {
        self.with_trace(TraceConfig::default())
    }
}
