//! FIFO task queue, loop driver, and trace sinks.
//!
//! The module is organised around the [`EventLoop`] driver, the cloneable
//! [`LoopHandle`] producers use to defer work, and the [`TraceSink`] outputs
//! that record what a watching user could have seen at each repaint.

pub mod driver;
pub mod handle;
pub mod task;
pub mod trace;

pub use driver::EventLoop;
pub use handle::{LoopHandle, ScheduleError};
pub use task::{Task, TaskMeta};
pub use trace::{LoopEvent, MemoryTrace, PaintedText, StdOutTrace, TraceSink};
