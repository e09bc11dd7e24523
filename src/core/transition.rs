//! Transition descriptors produced by states and consumed by the machine.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a transition changes the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Installs the first state at depth 0. Only the machine creates these.
    Bootstrap,

    /// Replaces the state at the target depth and everything above it.
    Sibling,

    /// Pushes a child above the current deepest state.
    Inner,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bootstrap => "bootstrap",
            Self::Sibling => "sibling",
            Self::Inner => "inner",
        };
        f.write_str(label)
    }
}

/// A single-use request to install a new state.
///
/// A transition carries no depth. The machine targets the depth of the state
/// whose evaluation produced it.
pub struct Transition {
    state: Box<dyn State>,
    kind: TransitionKind,
}

impl Transition {
    pub(crate) fn bootstrap(state: Box<dyn State>) -> Self {
        Self {
            state,
            kind: TransitionKind::Bootstrap,
        }
    }

    /// Replace the evaluating state (and all states above it) with a fresh `T`.
    pub fn sibling<T: State + Default + 'static>() -> Self {
        Self::sibling_with(T::default())
    }

    /// Push a fresh `T` above the current deepest state.
    pub fn inner<T: State + Default + 'static>() -> Self {
        Self::inner_with(T::default())
    }

    /// Sibling transition to an already constructed state.
    pub fn sibling_with(state: impl State + 'static) -> Self {
        Self {
            state: Box::new(state),
            kind: TransitionKind::Sibling,
        }
    }

    /// Inner transition to an already constructed state.
    pub fn inner_with(state: impl State + 'static) -> Self {
        Self {
            state: Box::new(state),
            kind: TransitionKind::Inner,
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Name of the state this transition installs.
    pub fn state_name(&self) -> &str {
        self.state.name()
    }

    pub(crate) fn into_parts(self) -> (Box<dyn State>, TransitionKind) {
        (self.state, self.kind)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("state", &self.state.name())
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Menu;

    impl State for Menu {
        fn name(&self) -> &str {
            "Menu"
        }
    }

    #[test]
    fn sibling_builds_fresh_state() {
        let transition = Transition::sibling::<Menu>();
        assert_eq!(transition.kind(), TransitionKind::Sibling);
        assert_eq!(transition.state_name(), "Menu");
    }

    #[test]
    fn inner_builds_fresh_state() {
        let transition = Transition::inner::<Menu>();
        assert_eq!(transition.kind(), TransitionKind::Inner);
    }

    #[test]
    fn with_constructors_keep_the_instance() {
        let transition = Transition::inner_with(Menu);
        let (state, kind) = transition.into_parts();
        assert_eq!(state.name(), "Menu");
        assert_eq!(kind, TransitionKind::Inner);
    }

    #[test]
    fn bootstrap_is_crate_internal_kind() {
        let transition = Transition::bootstrap(Box::new(Menu));
        assert_eq!(transition.kind(), TransitionKind::Bootstrap);
    }

    #[test]
    fn debug_shows_state_name() {
        let rendered = format!("{:?}", Transition::sibling::<Menu>());
        assert!(rendered.contains("Menu"));
        assert!(rendered.contains("Sibling"));
    }

    #[test]
    fn kind_displays_lowercase() {
        assert_eq!(TransitionKind::Sibling.to_string(), "sibling");
        assert_eq!(TransitionKind::Inner.to_string(), "inner");
        assert_eq!(TransitionKind::Bootstrap.to_string(), "bootstrap");
    }
}
