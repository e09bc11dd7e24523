//! Point-in-time views of a machine for inspection and debugging.
//!
//! Snapshots are diagnostics, not checkpoints: they name the active states
//! but cannot rebuild them.

use crate::core::{Owner, StateId, TransitionPhase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One occupied stack slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    pub depth: usize,
    pub id: StateId,
    pub name: String,
    pub owner: Option<Owner>,
}

/// Serializable view of a machine's stack and phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    /// Machine identity
    pub machine_id: Uuid,
    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
    /// Phase at snapshot time
    pub phase: TransitionPhase,
    /// Configured capacity
    pub capacity: usize,
    /// Active slots, root first
    pub stack: Vec<SlotSnapshot>,
    /// Failed transitions still in the retained history
    pub failed_transitions: usize,
}

impl MachineSnapshot {
    /// Depth of the deepest active state.
    pub fn current_depth(&self) -> Option<usize> {
        self.stack.len().checked_sub(1)
    }

    /// Names of the active states joined root first, e.g. `Playing > Paused`.
    pub fn path(&self) -> String {
        self.stack
            .iter()
            .map(|slot| slot.name.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}
