//! Machine configuration.
//!
//! Configuration is a plain serde value so hosts can load it alongside their
//! own settings. Validation uses Stillwater's `Validation` type so every
//! problem is reported at once instead of one per attempt.
//!
//! # Example
//!
//! ```rust
//! use statestack::config::{MachineConfig, WalkPolicy};
//!
//! let config: MachineConfig = serde_json::from_str(r#"{ "max_depth": 16 }"#).unwrap();
//! assert_eq!(config.max_depth, 16);
//! assert_eq!(config.walk_policy, WalkPolicy::StopAtFirstTransition);
//! assert!(config.validate().is_success());
//! ```

pub mod violations;

pub use violations::ConfigViolation;

use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Default stack capacity.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Default number of retained transition records.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Upper bound accepted for `max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 4096;

/// Upper bound accepted for `history_limit`.
pub const HISTORY_LIMIT_MAX: usize = 65_536;

/// What the tick walk does after a state requests a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkPolicy {
    /// Apply the transition and end the tick.
    #[default]
    StopAtFirstTransition,

    /// Apply the transition, then keep evaluating shallower depths against
    /// the updated stack. Several transitions may be applied in one tick.
    ContinueAfterTransition,
}

/// Tunables for a [`StateMachine`](crate::StateMachine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Maximum number of simultaneously active states
    pub max_depth: usize,
    /// Tick walk behaviour after a transition
    pub walk_policy: WalkPolicy,
    /// Number of transition records kept; zero disables history
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            walk_policy: WalkPolicy::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MachineConfig {
    /// Check every field, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        checks.push(if self.max_depth == 0 {
            Validation::fail(ConfigViolation::ZeroCapacity)
        } else {
            Validation::success(())
        });

        checks.push(if self.max_depth > MAX_DEPTH_LIMIT {
            Validation::fail(ConfigViolation::CapacityTooLarge {
                requested: self.max_depth,
                limit: MAX_DEPTH_LIMIT,
            })
        } else {
            Validation::success(())
        });

        checks.push(if self.history_limit > HISTORY_LIMIT_MAX {
            Validation::fail(ConfigViolation::HistoryTooLarge {
                requested: self.history_limit,
                limit: HISTORY_LIMIT_MAX,
            })
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and collect the violations into a plain list.
    pub fn violations(&self) -> Vec<ConfigViolation> {
        match self.validate() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }
}
