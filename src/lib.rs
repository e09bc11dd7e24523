//! Statestack: a stack-based hierarchical state machine
//!
//! Statestack drives a chain of nested active states from a single per-frame
//! tick. A state may push a child above itself (an inner transition) or be
//! replaced, together with everything stacked above it, by a new state (a
//! sibling transition). It suits behaviour that nests naturally: a "Playing"
//! mode containing a "Paused" mode containing a menu.
//!
//! # Core Concepts
//!
//! - **State**: behaviour with async enter/exit hooks, a per-tick update and a
//!   per-tick transition query
//! - **Transition**: a single-use request to install a new state
//! - **StateMachine**: the stack of active states and the tick protocol
//!
//! # Example
//!
//! ```rust
//! use statestack::{State, StateMachine, Transition};
//!
//! #[derive(Default)]
//! struct Menu {
//!     started: bool,
//! }
//!
//! #[derive(Default)]
//! struct Playing;
//!
//! impl State for Playing {}
//!
//! impl State for Menu {
//!     fn update(&mut self, _delta_time: f32) {
//!         self.started = true;
//!     }
//!
//!     fn evaluate_transition(&mut self) -> Option<Transition> {
//!         self.started.then(Transition::sibling::<Playing>)
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut machine = StateMachine::new(Menu::default()).await;
//! machine.update(0.016).await.unwrap();
//! machine.update(0.016).await.unwrap();
//!
//! assert_eq!(machine.current_depth(), Some(0));
//! assert!(machine.state_name_at(0).unwrap().ends_with("Playing"));
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{Owner, State, StateError, Transition, TransitionKind, TransitionPhase};
pub use async_trait::async_trait;
pub use machine::{StateMachine, StateMachineError, TickOutcome};
