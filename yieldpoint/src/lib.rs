//! # Yieldpoint: a deferred-execution demonstrator
//!
//! Yieldpoint demonstrates one concurrency fact about single-threaded
//! cooperative hosts (the browser UI thread being the canonical one): a
//! CPU-bound computation run synchronously blocks every repaint until it
//! finishes, while the *same* computation scheduled as a zero-delay deferred
//! task lets a status message written immediately afterwards become visible
//! first.
//!
//! ## Core Concepts
//!
//! - **Status sinks**: named mutable text cells standing in for UI elements
//! - **Event loop**: a FIFO queue of zero-delay deferred tasks, drained one
//!   at a time, with a repaint at every task boundary
//! - **Trace sinks**: structured records of what a watching user could have
//!   seen at each repaint
//! - **Demonstrator**: the two triggers, `run_blocking` and `run_deferred`
//!
//! ## Quick Start
//!
//! ```
//! use yieldpoint::demo::{Demonstrator, STATUS_CALCULATING, STATUS_DONE};
//! use yieldpoint::event_loop::{EventLoop, MemoryTrace};
//! use yieldpoint::sinks::SinkRegistry;
//!
//! let registry = SinkRegistry::new();
//! let sink = registry.register("status_ok");
//!
//! let trace = MemoryTrace::new();
//! let event_loop = EventLoop::with_trace_sink(registry.clone(), trace.clone());
//! let demo = Demonstrator::new(registry, event_loop.handle());
//!
//! // Schedule the work, then write the status synchronously.
//! demo.run_deferred("status_ok")?;
//! assert_eq!(sink.text(), STATUS_CALCULATING);
//!
//! // Drain the loop: the pre-work repaint shows "calculating....",
//! // the post-work repaint shows "Done!".
//! event_loop.run_until_idle();
//! assert_eq!(sink.text(), STATUS_DONE);
//! assert_eq!(
//!     trace.painted_texts("status_ok"),
//!     vec![STATUS_CALCULATING, STATUS_DONE]
//! );
//! # Ok::<(), yieldpoint::event_loop::ScheduleError>(())
//! ```
//!
//! ## Scheduling Model
//!
//! There is exactly one logical thread of control. `run_blocking` never
//! yields; `run_deferred` has exactly one suspension point, the boundary
//! between scheduling the deferred task and its execution. Deferred tasks
//! run FIFO, strictly after the current synchronous code, and cannot be
//! cancelled once queued.
//!
//! ## Module Guide
//!
//! - [`work`] - The fixed CPU-bound computation
//! - [`sinks`] - Status sinks and the registry that resolves them
//! - [`event_loop`] - Task queue, loop driver, and trace sinks
//! - [`config`] - Trace sink configuration with env-backed defaults
//! - [`demo`] - The two demonstration triggers

pub mod config;
pub mod demo;
pub mod event_loop;
pub mod sinks;
pub mod work;
