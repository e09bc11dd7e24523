//! The transition engine.
//!
//! This module owns the stack of active states and applies transitions:
//! - **Engine**: the tick walk and the bootstrap/sibling/inner protocol
//! - **Errors**: fatal machine errors and swallowed hook failures
//! - **Ticks**: what a single `update` call did

mod engine;
mod error;
mod tick;

pub use engine::StateMachine;
pub use error::{StateMachineError, TransitionError, TransitionHookError};
pub use tick::{AppliedTransition, SkipReason, TickOutcome, TickReport};
