//! Shared test states.
//!
//! `Probe` records every hook call into a shared journal and takes its
//! transitions from a shared plan book keyed by label, so tests can script
//! which state asks for what on which tick.

#![allow(dead_code)]

use statestack::{async_trait, Owner, State, StateError, Transition};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Enter { state: String, owner: Option<String> },
    Exit(String),
    Update(String),
    Attach { state: String, owner: Option<String> },
}

#[derive(Clone, Debug)]
pub enum Plan {
    Inner(String),
    Sibling(String),
    FailEnter(String),
    FailExitSibling(String),
}

#[derive(Clone, Default)]
pub struct Harness {
    journal: Arc<Mutex<Vec<Event>>>,
    plans: Arc<Mutex<HashMap<String, VecDeque<Plan>>>>,
    fail_exit: Arc<Mutex<Vec<String>>>,
}

impl Harness {
    pub fn probe(&self, label: &str) -> Probe {
        Probe {
            label: label.to_string(),
            harness: self.clone(),
            fail_enter: false,
            owner: None,
        }
    }

    pub fn plan(&self, label: &str, plan: Plan) {
        self.plans
            .lock()
            .unwrap()
            .entry(label.to_string())
            .or_default()
            .push_back(plan);
    }

    pub fn inner(&self, label: &str, child: &str) {
        self.plan(label, Plan::Inner(child.to_string()));
    }

    pub fn sibling(&self, label: &str, replacement: &str) {
        self.plan(label, Plan::Sibling(replacement.to_string()));
    }

    /// Make `label`'s `on_exit` fail.
    pub fn fail_exit_of(&self, label: &str) {
        self.fail_exit.lock().unwrap().push(label.to_string());
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.journal.lock().unwrap())
    }

    fn record(&self, event: Event) {
        self.journal.lock().unwrap().push(event);
    }

    fn next_plan(&self, label: &str) -> Option<Plan> {
        self.plans
            .lock()
            .unwrap()
            .get_mut(label)
            .and_then(VecDeque::pop_front)
    }
}

pub struct Probe {
    label: String,
    harness: Harness,
    fail_enter: bool,
    owner: Option<Owner>,
}

#[async_trait]
impl State for Probe {
    fn name(&self) -> &str {
        &self.label
    }

    async fn on_enter(&mut self) -> Result<(), StateError> {
        self.harness.record(Event::Enter {
            state: self.label.clone(),
            owner: self.owner.as_ref().map(|o| o.name.clone()),
        });
        if self.fail_enter {
            return Err(StateError::failed(format!("{} refused to enter", self.label)));
        }
        Ok(())
    }

    async fn on_exit(&mut self) -> Result<(), StateError> {
        self.harness.record(Event::Exit(self.label.clone()));
        if self.harness.fail_exit.lock().unwrap().contains(&self.label) {
            return Err(StateError::failed(format!("{} refused to exit", self.label)));
        }
        Ok(())
    }

    fn update(&mut self, _delta_time: f32) {
        self.harness.record(Event::Update(self.label.clone()));
    }

    fn evaluate_transition(&mut self) -> Option<Transition> {
        let plan = self.harness.next_plan(&self.label)?;
        Some(match plan {
            Plan::Inner(child) => Transition::inner_with(self.harness.probe(&child)),
            Plan::Sibling(replacement) => {
                Transition::sibling_with(self.harness.probe(&replacement))
            }
            Plan::FailEnter(child) => {
                let mut probe = self.harness.probe(&child);
                probe.fail_enter = true;
                Transition::inner_with(probe)
            }
            Plan::FailExitSibling(replacement) => {
                self.harness.fail_exit_of(&self.label);
                Transition::sibling_with(self.harness.probe(&replacement))
            }
        })
    }

    fn attach(&mut self, owner: Option<Owner>) {
        self.harness.record(Event::Attach {
            state: self.label.clone(),
            owner: owner.as_ref().map(|o| o.name.clone()),
        });
        self.owner = owner;
    }
}

pub fn enter(state: &str, owner: Option<&str>) -> Event {
    Event::Enter {
        state: state.to_string(),
        owner: owner.map(str::to_string),
    }
}

pub fn attach(state: &str, owner: Option<&str>) -> Event {
    Event::Attach {
        state: state.to_string(),
        owner: owner.map(str::to_string),
    }
}

pub fn exit(state: &str) -> Event {
    Event::Exit(state.to_string())
}

pub fn update(state: &str) -> Event {
    Event::Update(state.to_string())
}
