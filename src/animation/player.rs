//! Real-time playback on a background thread
//!
//! The thread waits one delay, hands the next event to the sink, and
//! repeats. Waits happen on a condvar so `cancel` interrupts a sleeping
//! player at once. The sink runs while the shared lock is held: once
//! `cancel` returns, the sink is never called again.
//!
//! The sink must not call back into its own [`PlayerHandle`].

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::tree::TraversalEvent;

#[derive(Debug, Default)]
struct PlayState {
    cancelled: bool,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<PlayState>,
    wake: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PlayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Spawns playback threads with a fixed step delay
#[derive(Debug, Clone)]
pub struct Player {
    delay: Duration,
}

impl Player {
    /// Player releasing one event per `delay`
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Start playing `events` into `sink`.
    pub fn spawn<F>(&self, events: Vec<TraversalEvent>, mut sink: F) -> PlayerHandle
    where
        F: FnMut(TraversalEvent) + Send + 'static,
    {
        let shared = Arc::new(Shared::default());
        let delay = self.delay;
        let worker = Arc::clone(&shared);

        let thread = thread::spawn(move || {
            let mut released = 0;
            for event in events {
                let guard = worker.lock();
                let (guard, _) = worker
                    .wake
                    .wait_timeout_while(guard, delay, |state| !state.cancelled)
                    .unwrap_or_else(PoisonError::into_inner);
                if guard.cancelled {
                    debug!(released, "playback cancelled");
                    return released;
                }
                sink(event);
                released += 1;
            }
            debug!(released, "playback finished");
            released
        });

        PlayerHandle {
            shared,
            thread: Some(thread),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(super::DEFAULT_STEP_DELAY)
    }
}

/// Cancellation handle for a playback thread
///
/// Dropping the handle cancels playback without waiting for the thread.
#[derive(Debug)]
pub struct PlayerHandle {
    shared: Arc<Shared>,
    thread: Option<JoinHandle<usize>>,
}

impl PlayerHandle {
    /// Stop playback. No event reaches the sink after this returns.
    pub fn cancel(&self) {
        let mut state = self.shared.lock();
        state.cancelled = true;
        self.shared.wake.notify_all();
    }

    /// Whether `cancel` was called
    pub fn is_cancelled(&self) -> bool {
        self.shared.lock().cancelled
    }

    /// Whether the thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the thread and return how many events reached the sink.
    pub fn join(mut self) -> usize {
        let Some(thread) = self.thread.take() else {
            return 0;
        };
        match thread.join() {
            Ok(released) => released,
            Err(_) => {
                warn!("playback thread panicked");
                0
            }
        }
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.cancel();
        }
    }
}
