use statig::prelude::*;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    FetchSucceeded,
    FetchFailed,
    Written,
    Published,
    Skipped,
}

/// Where a run ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Start,
    Fetched,
    Written,
    Published,
    Skipped,
    Aborted,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Start => "start",
            RunPhase::Fetched => "fetched",
            RunPhase::Written => "written",
            RunPhase::Published => "published",
            RunPhase::Skipped => "skipped",
            RunPhase::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// `start -> fetched -> written -> {published | skipped}`, with `aborted`
/// reachable only from `start`. Events that do not apply are ignored.
#[derive(Default)]
pub struct SyncLifecycle;

#[state_machine(initial = "State::start()")]
impl SyncLifecycle {
    #[state]
    fn start(&mut self, event: &SyncEvent) -> Outcome<State> {
        match event {
            SyncEvent::FetchSucceeded => Transition(State::fetched()),
            SyncEvent::FetchFailed => Transition(State::aborted()),
            _ => Handled,
        }
    }

    #[state]
    fn fetched(&mut self, event: &SyncEvent) -> Outcome<State> {
        match event {
            SyncEvent::Written => Transition(State::written()),
            _ => Handled,
        }
    }

    #[state]
    fn written(&mut self, event: &SyncEvent) -> Outcome<State> {
        match event {
            SyncEvent::Published => Transition(State::published()),
            SyncEvent::Skipped => Transition(State::skipped()),
            _ => Handled,
        }
    }

    #[state]
    fn published(&mut self, event: &SyncEvent) -> Outcome<State> {
        let _ = event;
        Handled
    }

    #[state]
    fn skipped(&mut self, event: &SyncEvent) -> Outcome<State> {
        let _ = event;
        Handled
    }

    #[state]
    fn aborted(&mut self, event: &SyncEvent) -> Outcome<State> {
        let _ = event;
        Handled
    }
}

/// Drives a [`SyncLifecycle`] and reports its current phase
pub struct RunTracker {
    machine: StateMachine<SyncLifecycle>,
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            machine: SyncLifecycle.state_machine(),
        }
    }

    pub fn handle(&mut self, event: SyncEvent) -> RunPhase {
        let before = self.phase();
        self.machine.handle(&event);
        let after = self.phase();
        debug!(?event, from = %before, to = %after, "Run lifecycle event");
        after
    }

    pub fn phase(&self) -> RunPhase {
        match self.machine.state() {
            State::Start { .. } => RunPhase::Start,
            State::Fetched { .. } => RunPhase::Fetched,
            State::Written { .. } => RunPhase::Written,
            State::Published { .. } => RunPhase::Published,
            State::Skipped { .. } => RunPhase::Skipped,
            State::Aborted { .. } => RunPhase::Aborted,
        }
    }
}
