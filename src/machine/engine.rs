//! Stack machine that drives nested states tick by tick.

use crate::config::{MachineConfig, WalkPolicy};
use crate::core::{
    Owner, State, StateId, Transition, TransitionHistory, TransitionKind, TransitionOutcome,
    TransitionPhase, TransitionRecord,
};
use crate::diagnostics::{Logger, MachineSnapshot, SlotSnapshot};
use crate::machine::error::{StateMachineError, TransitionError, TransitionHookError};
use crate::machine::tick::{AppliedTransition, SkipReason, TickOutcome, TickReport};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

const COMPONENT: &str = "StateMachine";

/// One occupied stack position.
struct Slot {
    id: StateId,
    name: String,
    owner: Option<Owner>,
    state: Box<dyn State>,
}

impl Slot {
    fn as_owner(&self, depth: usize) -> Owner {
        Owner {
            id: self.id,
            name: self.name.clone(),
            depth,
        }
    }
}

/// Hierarchical state machine built on a stack of active states.
///
/// Depth 0 is the root state; the last slot is the deepest (current) state.
/// The host calls [`update`](Self::update) once per tick. Each tick walks the
/// stack from the deepest state to the root, asking every state whether it
/// wants to transition. The deepest state is updated when it does not; any
/// ancestor may still redirect its whole subtree.
///
/// Transitions are applied to completion before the walk continues, so at
/// most one transition is ever in flight.
///
/// # Example
///
/// ```rust
/// use statestack::{State, StateMachine, Transition};
///
/// #[derive(Default)]
/// struct Playing {
///     ticks: u32,
/// }
///
/// #[derive(Default)]
/// struct Paused;
///
/// impl State for Paused {}
///
/// impl State for Playing {
///     fn update(&mut self, _delta_time: f32) {
///         self.ticks += 1;
///     }
///
///     fn evaluate_transition(&mut self) -> Option<Transition> {
///         (self.ticks == 2).then(Transition::inner::<Paused>)
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut machine = StateMachine::new(Playing::default()).await;
/// assert_eq!(machine.current_depth(), Some(0));
///
/// for _ in 0..3 {
///     machine.update(0.016).await.unwrap();
/// }
/// assert_eq!(machine.stack_names().len(), 2);
/// # }
/// ```
pub struct StateMachine {
    id: Uuid,
    config: MachineConfig,
    stack: Vec<Slot>,
    phase: TransitionPhase,
    logger: Option<Arc<dyn Logger>>,
    history: TransitionHistory,
}

impl StateMachine {
    /// Create a machine with the default configuration and bootstrap it
    /// into `initial`.
    pub async fn new(initial: impl State + 'static) -> Self {
        Self::bootstrap(Box::new(initial), MachineConfig::default(), None).await
    }

    /// Like [`new`](Self::new), reporting progress to `logger`.
    pub async fn with_logger(initial: impl State + 'static, logger: Arc<dyn Logger>) -> Self {
        Self::bootstrap(Box::new(initial), MachineConfig::default(), Some(logger)).await
    }

    /// Build an empty machine and apply the bootstrap transition.
    ///
    /// A failing `on_enter` is logged and leaves the machine empty and idle.
    pub(crate) async fn bootstrap(
        initial: Box<dyn State>,
        config: MachineConfig,
        logger: Option<Arc<dyn Logger>>,
    ) -> Self {
        let mut machine = Self {
            id: Uuid::new_v4(),
            history: TransitionHistory::with_limit(config.history_limit),
            config,
            stack: Vec::new(),
            phase: TransitionPhase::Idle,
            logger,
        };

        if let Err(err) = machine.dispatch(Transition::bootstrap(initial), 0).await {
            machine.log_error(&err.to_string());
        }

        machine
    }

    /// Advance the machine by one tick.
    ///
    /// Returns [`StateMachineError::Overflow`] when state logic has pushed the
    /// stack past its capacity. Hook failures are logged and do not surface
    /// here.
    pub async fn update(&mut self, delta_time: f32) -> Result<TickOutcome, StateMachineError> {
        // Backstop only; enter_inner refuses any push past capacity.
        if self.stack.len() > self.config.max_depth {
            return Err(StateMachineError::Overflow {
                requested: self.stack.len(),
                capacity: self.config.max_depth,
            });
        }

        let Some(top) = self.current_depth() else {
            tracing::trace!(machine = %self.id, "tick skipped: empty stack");
            return Ok(TickOutcome::Skipped(SkipReason::EmptyStack));
        };

        if self.phase != TransitionPhase::Stable {
            tracing::trace!(machine = %self.id, phase = %self.phase, "tick skipped: transition in flight");
            return Ok(TickOutcome::Skipped(SkipReason::InFlight(self.phase)));
        }

        let mut report = TickReport::default();

        for depth in (0..=top).rev() {
            let is_deepest = depth + 1 == self.stack.len();
            let Some(slot) = self.stack.get_mut(depth) else {
                continue;
            };

            match slot.state.evaluate_transition() {
                None => {
                    if is_deepest {
                        slot.state.update(delta_time);
                        report.updated = Some(depth);
                    }
                }
                Some(transition) => {
                    let applied = self.dispatch(transition, depth).await?;
                    report.transitions.push(applied);

                    if self.config.walk_policy == WalkPolicy::StopAtFirstTransition {
                        break;
                    }
                }
            }
        }

        Ok(TickOutcome::Ran(report))
    }

    /// Apply a transition on behalf of the host, outside the tick walk.
    ///
    /// `depth` is the sibling target; inner transitions always push above the
    /// deepest state and ignore it. A sibling transition into depth 0 is also
    /// accepted on an empty stack, which re-seeds a machine whose states were
    /// lost to hook failures.
    pub async fn transition(
        &mut self,
        transition: Transition,
        depth: usize,
    ) -> Result<AppliedTransition, StateMachineError> {
        self.dispatch(transition, depth).await
    }

    /// Exit every active state, deepest first, and leave the machine empty.
    ///
    /// Exit failures are logged and do not stop the teardown. The phase ends
    /// `Idle` on every path, which also clears a transition abandoned mid-hook.
    pub async fn shutdown(&mut self) {
        if self.stack.is_empty() {
            self.phase = TransitionPhase::Idle;
            return;
        }

        self.phase = TransitionPhase::ExitingOldState;
        while let Some(mut slot) = self.stack.pop() {
            let depth = self.stack.len();
            self.log(format_args!("{COMPONENT} {} in state {}", self.phase, slot.name));
            if let Err(source) = slot.state.on_exit().await {
                let err = TransitionHookError::Exit {
                    state: slot.name,
                    depth,
                    source,
                };
                self.log_error(&err.to_string());
            }
        }
        self.phase = TransitionPhase::Idle;
        tracing::debug!(machine = %self.id, "machine shut down");
    }

    /// Depth of the deepest active state, `None` when the stack is empty.
    pub fn current_depth(&self) -> Option<usize> {
        self.stack.len().checked_sub(1)
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Maximum number of simultaneously active states.
    pub fn capacity(&self) -> usize {
        self.config.max_depth
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn state_name_at(&self, depth: usize) -> Option<&str> {
        self.stack.get(depth).map(|slot| slot.name.as_str())
    }

    pub fn state_id_at(&self, depth: usize) -> Option<StateId> {
        self.stack.get(depth).map(|slot| slot.id)
    }

    /// Owner the state at `depth` was installed with.
    pub fn owner_of(&self, depth: usize) -> Option<&Owner> {
        self.stack.get(depth).and_then(|slot| slot.owner.as_ref())
    }

    /// Names of the active states, root first.
    pub fn stack_names(&self) -> Vec<&str> {
        self.stack.iter().map(|slot| slot.name.as_str()).collect()
    }

    pub fn history(&self) -> &TransitionHistory {
        &self.history
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            machine_id: self.id,
            taken_at: Utc::now(),
            phase: self.phase,
            capacity: self.config.max_depth,
            stack: self
                .stack
                .iter()
                .enumerate()
                .map(|(depth, slot)| SlotSnapshot {
                    depth,
                    id: slot.id,
                    name: slot.name.clone(),
                    owner: slot.owner.clone(),
                })
                .collect(),
            failed_transitions: self.history.failures(),
        }
    }

    /// Apply one transition to completion.
    ///
    /// Hook failures are logged, recorded and swallowed; the stack keeps
    /// whatever changes were made before the failure. Machine errors are
    /// returned untouched.
    async fn dispatch(
        &mut self,
        transition: Transition,
        depth: usize,
    ) -> Result<AppliedTransition, StateMachineError> {
        if self.phase.is_in_flight() {
            return Err(StateMachineError::ConcurrentTransition { phase: self.phase });
        }

        let (state, kind) = transition.into_parts();
        let name = state.name().to_string();
        let target = match kind {
            TransitionKind::Inner => self.stack.len(),
            TransitionKind::Sibling => depth,
            TransitionKind::Bootstrap => 0,
        };
        let mut exited = Vec::new();

        let result = match kind {
            TransitionKind::Bootstrap => self.enter_first(state).await,
            TransitionKind::Sibling => self.enter_sibling(state, depth, &mut exited).await,
            TransitionKind::Inner => self.enter_inner(state).await,
        };

        let (state_id, outcome) = match result {
            Ok(id) => (Some(id), TransitionOutcome::Completed),
            Err(TransitionError::Machine(err)) => return Err(err),
            Err(TransitionError::Hook(err)) => {
                self.log_error(&err.to_string());
                self.phase = if self.stack.is_empty() {
                    TransitionPhase::Idle
                } else {
                    TransitionPhase::Stable
                };
                (
                    None,
                    TransitionOutcome::Failed {
                        reason: err.to_string(),
                    },
                )
            }
        };

        let completed = matches!(outcome, TransitionOutcome::Completed);
        tracing::debug!(
            machine = %self.id,
            %kind,
            depth = target,
            state = %name,
            completed,
            "transition applied"
        );

        self.history.record(TransitionRecord {
            kind,
            depth: target,
            state: name.clone(),
            state_id,
            exited,
            outcome,
            timestamp: Utc::now(),
        });

        Ok(AppliedTransition {
            kind,
            depth,
            state: name,
            completed,
        })
    }

    async fn enter_first(&mut self, mut state: Box<dyn State>) -> Result<StateId, TransitionError> {
        if !self.stack.is_empty() {
            return Err(StateMachineError::AlreadyBootstrapped.into());
        }

        self.set_phase(TransitionPhase::EnteringNewState, state.name());
        if let Err(source) = state.on_enter().await {
            return Err(enter_failed(&*state, source));
        }
        state.attach(None);

        Ok(self.install(state, None))
    }

    /// Enter the new state, then tear down `depth..` deepest first, then
    /// install the new state at `depth`.
    async fn enter_sibling(
        &mut self,
        mut state: Box<dyn State>,
        depth: usize,
        exited: &mut Vec<String>,
    ) -> Result<StateId, TransitionError> {
        let valid = depth < self.stack.len() || (depth == 0 && self.stack.is_empty());
        if !valid {
            return Err(StateMachineError::InvalidTarget {
                kind: TransitionKind::Sibling,
                target: depth,
                depth: self.current_depth(),
            }
            .into());
        }

        self.set_phase(TransitionPhase::EnteringNewState, state.name());
        if let Err(source) = state.on_enter().await {
            return Err(enter_failed(&*state, source));
        }

        if !self.stack.is_empty() {
            self.phase = TransitionPhase::ExitingOldState;
            while self.stack.len() > depth {
                let Some(mut slot) = self.stack.pop() else {
                    break;
                };
                let old_depth = self.stack.len();
                self.log(format_args!("{COMPONENT} {} in state {}", self.phase, slot.name));

                if let Err(source) = slot.state.on_exit().await {
                    return Err(TransitionHookError::Exit {
                        state: slot.name,
                        depth: old_depth,
                        source,
                    }
                    .into());
                }
                exited.push(slot.name);
            }
        }

        let owner = depth
            .checked_sub(1)
            .and_then(|parent| self.stack.get(parent).map(|slot| slot.as_owner(parent)));
        state.attach(owner.clone());

        Ok(self.install(state, owner))
    }

    /// Push the new state above the deepest one. The capacity check runs
    /// before anything is touched.
    async fn enter_inner(&mut self, mut state: Box<dyn State>) -> Result<StateId, TransitionError> {
        let Some(top) = self.current_depth() else {
            return Err(StateMachineError::InvalidTarget {
                kind: TransitionKind::Inner,
                target: 0,
                depth: None,
            }
            .into());
        };

        if self.stack.len() >= self.config.max_depth {
            return Err(StateMachineError::Overflow {
                requested: self.stack.len() + 1,
                capacity: self.config.max_depth,
            }
            .into());
        }

        self.set_phase(TransitionPhase::EnteringNewState, state.name());
        let owner = self.stack.get(top).map(|slot| slot.as_owner(top));
        state.attach(owner.clone());
        if let Err(source) = state.on_enter().await {
            return Err(enter_failed(&*state, source));
        }

        Ok(self.install(state, owner))
    }

    fn install(&mut self, state: Box<dyn State>, owner: Option<Owner>) -> StateId {
        let id = StateId::new();
        let name = state.name().to_string();
        self.stack.push(Slot {
            id,
            name,
            owner,
            state,
        });
        self.phase = TransitionPhase::Stable;
        if let Some(slot) = self.stack.last() {
            self.log(format_args!("{COMPONENT} {} in state {}", self.phase, slot.name));
        }
        id
    }

    fn set_phase(&mut self, phase: TransitionPhase, state_name: &str) {
        self.phase = phase;
        self.log(format_args!("{COMPONENT} {phase} in state {state_name}"));
    }

    fn log(&self, message: fmt::Arguments<'_>) {
        if let Some(logger) = &self.logger {
            logger.log(&message.to_string());
        }
    }

    fn log_error(&self, message: &str) {
        tracing::warn!(machine = %self.id, "{}", message);
        if let Some(logger) = &self.logger {
            logger.log_error(COMPONENT, message);
        }
    }
}

fn enter_failed(state: &dyn State, source: crate::core::StateError) -> TransitionError {
    TransitionHookError::Enter {
        state: state.name().to_string(),
        source,
    }
    .into()
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("stack", &self.stack_names())
            .field("config", &self.config)
            .finish()
    }
}
