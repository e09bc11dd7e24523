//! Nested Modes
//!
//! This example drives a small game loop through nested modes.
//!
//! Key concepts:
//! - Inner transitions push a sub-mode (Playing -> Paused)
//! - Sibling transitions replace a mode and everything above it
//! - Async enter/exit hooks for loading and teardown
//! - Any ancestor can redirect its subtree during the tick walk
//!
//! Run with: cargo run --example nested_modes

use statestack::diagnostics::Logger;
use statestack::{async_trait, Owner, State, StateError, StateMachine, Transition};
use std::sync::Arc;
use std::time::Duration;

struct PrintLogger;

impl Logger for PrintLogger {
    fn log(&self, message: &str) {
        println!("  [log] {message}");
    }

    fn log_error(&self, component: &str, message: &str) {
        println!("  [error] {component}: {message}");
    }
}

#[derive(Default)]
struct Loading {
    done: bool,
}

#[async_trait]
impl State for Loading {
    fn name(&self) -> &str {
        "Loading"
    }

    async fn on_enter(&mut self) -> Result<(), StateError> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.done = true;
        Ok(())
    }

    fn evaluate_transition(&mut self) -> Option<Transition> {
        self.done.then(Transition::sibling::<Playing>)
    }
}

#[derive(Default)]
struct Playing {
    clock: f32,
}

impl State for Playing {
    fn name(&self) -> &str {
        "Playing"
    }

    fn update(&mut self, delta_time: f32) {
        self.clock += delta_time;
    }

    fn evaluate_transition(&mut self) -> Option<Transition> {
        if self.clock > 0.05 {
            self.clock = 0.0;
            return Some(Transition::inner::<Paused>());
        }
        None
    }
}

#[derive(Default)]
struct Paused {
    owner: Option<Owner>,
    ticks: u32,
}

#[async_trait]
impl State for Paused {
    fn name(&self) -> &str {
        "Paused"
    }

    fn attach(&mut self, owner: Option<Owner>) {
        self.owner = owner;
    }

    async fn on_exit(&mut self) -> Result<(), StateError> {
        let parent = self.owner.as_ref().map_or("nothing", |o| o.name.as_str());
        println!("  leaving pause, back to {parent}");
        Ok(())
    }

    fn update(&mut self, _delta_time: f32) {
        self.ticks += 1;
    }

    fn evaluate_transition(&mut self) -> Option<Transition> {
        (self.ticks >= 3).then(Transition::sibling::<GameOver>)
    }
}

#[derive(Default)]
struct GameOver;

impl State for GameOver {
    fn name(&self) -> &str {
        "GameOver"
    }
}

#[tokio::main]
async fn main() {
    println!("=== Nested Modes Example ===\n");

    let mut machine = StateMachine::with_logger(Loading::default(), Arc::new(PrintLogger)).await;

    for tick in 1..=12 {
        if let Err(err) = machine.update(0.016).await {
            println!("fatal: {err}");
            return;
        }
        println!("tick {tick:2}: {}", machine.snapshot().path());
    }

    println!("\nTransitions taken:");
    for record in machine.history().records() {
        println!("  {} -> {} at depth {}", record.kind, record.state, record.depth);
    }

    machine.shutdown().await;
    println!("\n=== Example Complete ===");
}
