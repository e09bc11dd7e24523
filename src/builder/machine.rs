//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::{MachineConfig, WalkPolicy};
use crate::core::State;
use crate::diagnostics::Logger;
use crate::machine::StateMachine;
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use statestack::builder::StateMachineBuilder;
/// use statestack::config::WalkPolicy;
/// use statestack::diagnostics::TracingLogger;
/// use statestack::State;
/// use std::sync::Arc;
///
/// struct Boot;
/// impl State for Boot {}
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let machine = StateMachineBuilder::new()
///     .max_depth(8)
///     .walk_policy(WalkPolicy::ContinueAfterTransition)
///     .logger(Arc::new(TracingLogger))
///     .start(Boot)
///     .await
///     .unwrap();
///
/// assert_eq!(machine.capacity(), 8);
/// # }
/// ```
#[derive(Default)]
pub struct StateMachineBuilder {
    config: MachineConfig,
    logger: Option<Arc<dyn Logger>>,
}

impl StateMachineBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum number of simultaneously active states.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn walk_policy(mut self, policy: WalkPolicy) -> Self {
        self.config.walk_policy = policy;
        self
    }

    /// Set how many transition records the machine keeps.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Report transition progress and swallowed errors to `logger`.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Validate the configuration and bootstrap a machine into `initial`.
    pub async fn start(self, initial: impl State + 'static) -> Result<StateMachine, BuildError> {
        let violations = self.config.violations();
        if !violations.is_empty() {
            return Err(BuildError::InvalidConfig(violations));
        }

        Ok(StateMachine::bootstrap(Box::new(initial), self.config, self.logger).await)
    }
}
