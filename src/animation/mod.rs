//! Throttled release of traversal events
//!
//! A traversal produces its whole event list at once; the animation hands
//! the events out one per `delay`, in order. Each release time is chained
//! off the previous one: event `i` is due at `due(i - 1) + delay`, with
//! `due(-1)` being the start time.
//!
//! [`Animation`] is clock-agnostic: callers pass timestamps (any monotonic
//! `Duration` since an origin of their choosing) to [`Animation::advance`].
//! [`Player`] drives the same schedule on a background thread.

mod player;

pub use player::{Player, PlayerHandle};

use std::collections::VecDeque;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::tree::TraversalEvent;

/// Delay between two consecutive releases
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(500);

/// Run state of an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No run active; input may be edited
    #[default]
    Idle,
    /// A run is active (possibly with every event already released)
    Running,
}

/// Errors from the animation state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// `start` called while a run is active
    #[error("A traversal is already running")]
    AlreadyRunning,
}

/// Pollable event scheduler
#[derive(Debug)]
pub struct Animation {
    delay: Duration,
    state: RunState,
    pending: VecDeque<TraversalEvent>,
    next_due: Duration,
    released: usize,
}

impl Animation {
    /// Create an idle animation releasing one event per `delay`
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: RunState::Idle,
            pending: VecDeque::new(),
            next_due: Duration::ZERO,
            released: 0,
        }
    }

    /// Step delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Whether a run is active
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Events still waiting for release
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Events released in the current run
    pub fn released(&self) -> usize {
        self.released
    }

    /// Running with nothing left to release
    pub fn is_drained(&self) -> bool {
        self.is_running() && self.pending.is_empty()
    }

    /// When the next event becomes due, if any
    pub fn next_due(&self) -> Option<Duration> {
        (!self.pending.is_empty()).then_some(self.next_due)
    }

    /// Begin a run at `now`.
    ///
    /// The first event is due one delay after `now`.
    pub fn start(&mut self, events: Vec<TraversalEvent>, now: Duration) -> Result<(), AnimationError> {
        if self.is_running() {
            return Err(AnimationError::AlreadyRunning);
        }

        info!(events = events.len(), delay_ms = self.delay.as_millis() as u64, "traversal started");
        self.state = RunState::Running;
        self.pending = events.into();
        self.next_due = now + self.delay;
        self.released = 0;
        Ok(())
    }

    /// Release every event due at or before `now`, in order.
    pub fn advance(&mut self, now: Duration) -> Vec<TraversalEvent> {
        let mut out = Vec::new();
        if !self.is_running() {
            return out;
        }

        while self.next_due <= now {
            let Some(event) = self.pending.pop_front() else {
                break;
            };
            out.push(event);
            self.released += 1;
            self.next_due += self.delay;
        }

        if !out.is_empty() {
            debug!(released = out.len(), pending = self.pending.len(), "events released");
        }
        out
    }

    /// Stop the run, discarding every unreleased event.
    ///
    /// Returns how many events were discarded.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.pending.len();
        if self.is_running() {
            info!(released = self.released, dropped, "traversal stopped");
        }
        self.pending.clear();
        self.state = RunState::Idle;
        self.released = 0;
        dropped
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}
