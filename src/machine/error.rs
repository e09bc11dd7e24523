//! Machine error types.

use crate::core::{StateError, TransitionKind, TransitionPhase};
use thiserror::Error;

/// Errors surfaced to the host by the machine.
#[derive(Debug, Error)]
pub enum StateMachineError {
    /// Depth ran past capacity. This is a bug in state logic: unbounded inner
    /// pushes or a transition cycle that never settles.
    #[error("Runaway transition depth: {requested} active states exceed capacity {capacity}")]
    Overflow { requested: usize, capacity: usize },

    #[error("Transition dispatched while another is in flight (phase {phase})")]
    ConcurrentTransition { phase: TransitionPhase },

    #[error("Invalid target depth {target} for {kind} transition (current depth {depth:?})")]
    InvalidTarget {
        kind: TransitionKind,
        target: usize,
        depth: Option<usize>,
    },

    #[error("Bootstrap transition requires an empty stack")]
    AlreadyBootstrapped,
}

/// A lifecycle hook failed while a transition was applied.
///
/// The machine logs these and keeps running.
#[derive(Debug, Error)]
pub enum TransitionHookError {
    #[error("on_enter failed for state '{state}': {source}")]
    Enter {
        state: String,
        #[source]
        source: StateError,
    },

    #[error("on_exit failed for state '{state}' at depth {depth}: {source}")]
    Exit {
        state: String,
        depth: usize,
        #[source]
        source: StateError,
    },
}

/// Everything that can stop a transition part way.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Machine(#[from] StateMachineError),

    #[error(transparent)]
    Hook(#[from] TransitionHookError),
}
