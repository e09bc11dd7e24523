//! Builder API for ergonomic machine construction.
//!
//! The builder collects configuration and a logger, validates the
//! configuration, and bootstraps the machine into its first state.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
