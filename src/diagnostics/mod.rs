//! Logging and inspection.
//!
//! - **Logger**: the collaborator the machine reports transition progress
//!   and swallowed hook errors to
//! - **TracingLogger**: a `Logger` backed by `tracing`
//! - **Snapshots**: serializable views of the active stack

pub mod logger;
pub mod snapshot;

pub use logger::{Logger, TracingLogger};
pub use snapshot::{MachineSnapshot, SlotSnapshot};
