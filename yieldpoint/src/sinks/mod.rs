//! Status sinks and the registry that resolves them.
//!
//! A [`StatusSink`] models one named text-bearing element in the host UI;
//! [`SinkRegistry`] is the explicit lookup collaborator the demo writes
//! through instead of touching ambient global state.

pub mod registry;
pub mod status;

pub use registry::SinkRegistry;
pub use status::StatusSink;
