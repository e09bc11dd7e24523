//! Core stack machine types.
//!
//! This module contains the building blocks the engine works with:
//! - The `State` trait and the owner back-reference
//! - Transition descriptors and their kinds
//! - The transition phase flag
//! - Bounded transition history

mod history;
mod phase;
mod state;
mod transition;

pub use history::{TransitionHistory, TransitionOutcome, TransitionRecord};
pub use phase::TransitionPhase;
pub use state::{Owner, State, StateError, StateId};
pub use transition::{Transition, TransitionKind};
