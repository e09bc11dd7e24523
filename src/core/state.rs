//! Core State trait for stack machine states.
//!
//! A state is a unit of behaviour that lives in one slot of the machine's
//! stack. It is entered once, updated while it is the deepest active state,
//! asked every tick whether it wants to transition, and exited once.

use super::transition::Transition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identity of one installed state instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(Uuid);

impl StateId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying uuid.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-owning reference from a state to the state installed directly below it.
///
/// The reference names the parent slot as it was at install time. It does not
/// keep the parent alive; once the parent leaves the stack the reference is
/// only a record of who the parent was.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Identity of the parent instance
    pub id: StateId,
    /// Display name of the parent
    pub name: String,
    /// Depth of the parent slot
    pub depth: usize,
}

/// Error returned by a failing `on_enter` or `on_exit` hook.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StateError {
    /// Build a failure from a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Trait for states of a stack machine.
///
/// Every method has a default, so a state implements only the hooks it
/// needs. `on_enter` and `on_exit` may suspend; `update` and
/// `evaluate_transition` are synchronous and must not block.
///
/// # Example
///
/// ```rust
/// use statestack::core::{State, Transition};
///
/// #[derive(Default)]
/// struct Paused;
///
/// #[derive(Default)]
/// struct Playing {
///     elapsed: f32,
/// }
///
/// impl State for Paused {}
///
/// impl State for Playing {
///     fn update(&mut self, delta_time: f32) {
///         self.elapsed += delta_time;
///     }
///
///     fn evaluate_transition(&mut self) -> Option<Transition> {
///         (self.elapsed > 1.0).then(Transition::inner::<Paused>)
///     }
/// }
/// ```
#[async_trait]
pub trait State: Send {
    /// Display name for logs, history and snapshots.
    ///
    /// Defaults to the Rust type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once before the state joins the stack.
    async fn on_enter(&mut self) -> Result<(), StateError> {
        Ok(())
    }

    /// Called once before the state leaves the stack.
    async fn on_exit(&mut self) -> Result<(), StateError> {
        Ok(())
    }

    /// Per-tick work. Only the deepest state is updated, and only on ticks
    /// where it did not ask for a transition.
    fn update(&mut self, _delta_time: f32) {}

    /// Ask the state whether it wants to transition.
    ///
    /// Called every tick for each visited depth, not only the deepest one.
    fn evaluate_transition(&mut self) -> Option<Transition> {
        None
    }

    /// Receives the owner reference when the machine installs the state.
    ///
    /// Called by the machine exactly once per instance. States that need
    /// their parent should store it.
    fn attach(&mut self, _owner: Option<Owner>) {}
}
