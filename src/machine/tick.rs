//! Results of a single tick.

use crate::core::{TransitionKind, TransitionPhase};

/// Why a tick did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No state is installed.
    EmptyStack,
    /// A transition is still in flight.
    InFlight(TransitionPhase),
}

/// A transition taken during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedTransition {
    pub kind: TransitionKind,
    /// Depth of the state whose evaluation requested it
    pub depth: usize,
    /// Name of the incoming state
    pub state: String,
    /// False when a hook failed and the error was swallowed
    pub completed: bool,
}

/// What happened during a tick that ran.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Depth of the state that received `update`, if any
    pub updated: Option<usize>,
    /// Transitions applied, in walk order (deepest first)
    pub transitions: Vec<AppliedTransition>,
}

impl TickReport {
    pub fn transitioned(&self) -> bool {
        !self.transitions.is_empty()
    }
}

/// Result of [`StateMachine::update`](crate::StateMachine::update).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Skipped(SkipReason),
    Ran(TickReport),
}

impl TickOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// The report of a tick that ran.
    pub fn report(&self) -> Option<&TickReport> {
        match self {
            Self::Ran(report) => Some(report),
            Self::Skipped(_) => None,
        }
    }
}
