//! Deferred computer-move scheduling.
//!
//! The computer "thinks" for a moment before it moves. The core does not
//! own an event loop, so the delay is a capability the presentation layer
//! provides: the session asks its [`MoveScheduler`] for a one-shot
//! callback after a delay and keeps the returned [`ScheduleToken`] so a
//! round reset can cancel the callback before it fires.
//!
//! At most one computer move is ever pending; the session cancels before
//! it schedules anew. A scheduler therefore never has to coalesce or
//! order multiple entries for correctness.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long the computer pretends to think before moving.
pub const COMPUTER_MOVE_DELAY: Duration = Duration::from_millis(1500);

/// Cancel handle for one scheduled computer move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleToken(pub u64);

impl ScheduleToken {
    /// Create a token from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw token value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ScheduleToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "schedule#{}", self.0)
    }
}

/// One-shot deferred-callback capability.
///
/// Implementations arrange for the driving loop to call the session's
/// `run_computer_move` once `delay` has elapsed, unless the token is
/// cancelled first.
pub trait MoveScheduler {
    /// Schedule a computer move after `delay`. Returns the cancel handle.
    fn schedule(&mut self, delay: Duration) -> ScheduleToken;

    /// Cancel a scheduled move. Cancelling a token that already fired or
    /// was never issued is a no-op.
    fn cancel(&mut self, token: ScheduleToken);
}

#[derive(Debug, Default)]
struct ManualInner {
    next_token: u64,
    queue: VecDeque<(ScheduleToken, Duration)>,
}

/// Queue-backed scheduler for tests and polling frontends.
///
/// `schedule` only records the request; the driving loop decides when
/// "later" is by calling [`ManualScheduler::fire_next`] and then invoking
/// the session's `run_computer_move`. Clones share one queue, so a
/// frontend can keep a handle to the scheduler it moved into the session.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// Tokens waiting to fire, oldest first.
    #[must_use]
    pub fn pending_tokens(&self) -> Vec<ScheduleToken> {
        self.lock().queue.iter().map(|(token, _)| *token).collect()
    }

    /// Pops the oldest pending callback, as if its delay elapsed.
    pub fn fire_next(&self) -> Option<ScheduleToken> {
        self.lock().queue.pop_front().map(|(token, _)| token)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        // Poisoning requires a panic in one of these short sections.
        self.inner.lock().expect("scheduler mutex poisoned")
    }
}

impl MoveScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> ScheduleToken {
        let mut inner = self.lock();
        let token = ScheduleToken::new(inner.next_token);
        inner.next_token += 1;
        inner.queue.push_back((token, delay));
        token
    }

    fn cancel(&mut self, token: ScheduleToken) {
        self.lock().queue.retain(|(pending, _)| *pending != token);
    }
}
