//! Transition phase flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which part of a transition the machine is in.
///
/// Ticks only evaluate states while the phase is [`TransitionPhase::Stable`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionPhase {
    /// No state has been installed yet, or the stack was emptied by a failure.
    #[default]
    Idle,

    /// The incoming state's `on_enter` is running.
    EnteringNewState,

    /// Outgoing states' `on_exit` hooks are running.
    ExitingOldState,

    /// No transition in flight.
    Stable,
}

impl TransitionPhase {
    /// True while a transition has started and not finished.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::EnteringNewState | Self::ExitingOldState)
    }
}

impl fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "Idle",
            Self::EnteringNewState => "EnteringNewState",
            Self::ExitingOldState => "ExitingOldState",
            Self::Stable => "Stable",
        };
        f.write_str(label)
    }
}
