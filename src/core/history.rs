//! Transition history tracking.
//!
//! The machine records every transition it applies, successful or not, in a
//! bounded history. Records are plain serializable values meant for
//! diagnostics.

use super::state::StateId;
use super::transition::TransitionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// How an applied transition ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionOutcome {
    /// The new state was installed.
    Completed,

    /// A hook failed; the stack was left as the failure found it.
    Failed { reason: String },
}

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use statestack::core::{TransitionKind, TransitionOutcome, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     kind: TransitionKind::Inner,
///     depth: 1,
///     state: "Paused".to_string(),
///     state_id: None,
///     exited: Vec::new(),
///     outcome: TransitionOutcome::Completed,
///     timestamp: Utc::now(),
/// };
/// assert!(record.is_completed());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Kind of transition
    pub kind: TransitionKind,
    /// Depth the new state was installed at (or meant for)
    pub depth: usize,
    /// Name of the incoming state
    pub state: String,
    /// Identity of the incoming state, if it was installed
    pub state_id: Option<StateId>,
    /// Names of states exited, deepest first
    pub exited: Vec<String>,
    /// How the transition ended
    pub outcome: TransitionOutcome,
    /// When the transition finished
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, TransitionOutcome::Completed)
    }
}

/// Bounded, ordered history of transitions.
///
/// When the limit is reached the oldest record is dropped. A limit of zero
/// disables recording.
///
/// # Example
///
/// ```rust
/// use statestack::core::{TransitionHistory, TransitionKind, TransitionOutcome, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::with_limit(2);
/// for state in ["A", "B", "C"] {
///     history.record(TransitionRecord {
///         kind: TransitionKind::Sibling,
///         depth: 0,
///         state: state.to_string(),
///         state_id: None,
///         exited: Vec::new(),
///         outcome: TransitionOutcome::Completed,
///         timestamp: Utc::now(),
///     });
/// }
///
/// assert_eq!(history.get_path(), vec!["B", "C"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory {
    limit: usize,
    records: VecDeque<TransitionRecord>,
}

impl TransitionHistory {
    /// Create an empty history that keeps at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            records: VecDeque::new(),
        }
    }

    /// Append a record, evicting the oldest one past the limit.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.limit == 0 {
            return;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Names of the states installed by completed transitions, in order.
    pub fn get_path(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.is_completed())
            .map(|r| r.state.as_str())
            .collect()
    }

    /// Time between the first and last retained record.
    ///
    /// Returns `None` if the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Number of retained records whose hooks failed.
    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| !r.is_completed()).count()
    }

    pub fn records(&self) -> impl ExactSizeIterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, outcome: TransitionOutcome) -> TransitionRecord {
        TransitionRecord {
            kind: TransitionKind::Sibling,
            depth: 0,
            state: state.to_string(),
            state_id: None,
            exited: Vec::new(),
            outcome,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = TransitionHistory::with_limit(8);
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_evicts_oldest_past_limit() {
        let mut history = TransitionHistory::with_limit(2);
        history.record(record("A", TransitionOutcome::Completed));
        history.record(record("B", TransitionOutcome::Completed));
        history.record(record("C", TransitionOutcome::Completed));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec!["B", "C"]);
    }

    #[test]
    fn zero_limit_disables_recording() {
        let mut history = TransitionHistory::with_limit(0);
        history.record(record("A", TransitionOutcome::Completed));
        assert!(history.is_empty());
    }

    #[test]
    fn path_skips_failed_transitions() {
        let mut history = TransitionHistory::with_limit(8);
        history.record(record("A", TransitionOutcome::Completed));
        history.record(record(
            "B",
            TransitionOutcome::Failed {
                reason: "boom".to_string(),
            },
        ));

        assert_eq!(history.get_path(), vec!["A"]);
        assert_eq!(history.failures(), 1);
        assert_eq!(history.last().map(|r| r.state.as_str()), Some("B"));
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = TransitionHistory::with_limit(8);
        history.record(record("A", TransitionOutcome::Completed));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(record("B", TransitionOutcome::Completed));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = TransitionHistory::with_limit(4);
        history.record(record("A", TransitionOutcome::Completed));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: TransitionHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history.len(), deserialized.len());
        assert_eq!(deserialized.limit(), 4);
    }
}
