/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Classic monitor implementation of the turn protocol.
//!
//! [`TurnMonitor`] owns the [`SequenceState`] and the sink behind a single
//! mutex, paired with two condition variables: one dedicated to the Zero
//! role and one shared by the Odd and Even roles. All waiting is
//! suspend-with-mutex-release; no actor ever polls.
//!
//! A zero commit wakes both parity waiters and lets the predicate sort out
//! which one proceeds (broadcast-wake-then-recheck). Every wait re-checks
//! its predicate after waking, which also covers spurious wake-ups.

use super::actor::Role;
use super::emission::{Emission, Symbol};
use super::sink::{MemorySink, Sink};
use super::state::SequenceState;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Outcome of a wait operation, consulted by the caller after every wake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnVerdict {
    /// The caller's predicate holds; it may commit exactly one emission.
    Proceed,

    /// The run is complete (`position > bound`); the caller must exit
    /// without emitting.
    Finished,

    /// The run was cancelled; the caller must exit without emitting.
    Cancelled,
}

struct MonitorInner<S> {
    state: SequenceState,
    emitted: u64,
    sink: S,
}

impl<S: Sink> MonitorInner<S> {
    fn record(&mut self, symbol: Symbol) {
        self.emitted += 1;
        trace!(index = self.emitted, %symbol, "emission committed");
        self.sink.record(Emission::new(self.emitted, symbol));
    }
}

/// Mutex-and-condvar monitor coordinating the three sequence actors.
///
/// The monitor serializes all access to the shared [`SequenceState`] and
/// implements the wake-up protocol: a zero commit hands the turn to
/// whichever parity role matches the current position, a non-zero commit
/// hands the turn back to the Zero role, and reaching `position > bound`
/// wakes every waiter so all actors observe termination.
///
/// # Examples
///
/// ```
/// use turnwise::{DefaultMonitor, Role, TurnVerdict};
///
/// let monitor = DefaultMonitor::new(1);
/// assert_eq!(monitor.wait_zero_turn(), TurnVerdict::Proceed);
/// monitor.commit_zero();
/// assert_eq!(monitor.wait_odd_turn(), TurnVerdict::Proceed);
/// monitor.commit_value(Role::Odd);
/// assert_eq!(monitor.wait_even_turn(), TurnVerdict::Finished);
/// ```
pub struct TurnMonitor<S: Sink> {
    bound: u64,
    inner: Mutex<MonitorInner<S>>,
    zero_cv: Condvar,
    parity_cv: Condvar,
}

impl TurnMonitor<MemorySink> {
    /// Creates a monitor for a run bounded by `bound`, backed by an
    /// in-memory sink pre-sized for the transcript (capped, since huge
    /// bounds are typically paired with cancellation).
    #[must_use]
    pub fn new(bound: u64) -> Self {
        let capacity = bound.saturating_mul(2).min(65_536) as usize;
        Self::with_sink(bound, MemorySink::with_capacity(capacity))
    }
}

impl<S: Sink> TurnMonitor<S> {
    /// Creates a monitor for a run bounded by `bound` writing into `sink`.
    #[must_use]
    pub fn with_sink(bound: u64, sink: S) -> Self {
        Self {
            bound,
            inner: Mutex::new(MonitorInner {
                state: SequenceState::new(),
                emitted: 0,
                sink,
            }),
            zero_cv: Condvar::new(),
            parity_cv: Condvar::new(),
        }
    }

    /// Returns the termination bound `n` for this run.
    #[inline]
    #[must_use]
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Blocks the Zero actor until it holds the turn.
    ///
    /// Returns [`TurnVerdict::Finished`] without blocking once
    /// `position > bound` is observed, and [`TurnVerdict::Cancelled`] once
    /// a cancellation request is observed. Both exit checks run before the
    /// first wait and again after every wake.
    pub fn wait_zero_turn(&self) -> TurnVerdict {
        let mut inner = self.lock();
        loop {
            if let Some(verdict) = self.exit_verdict(&inner.state) {
                return verdict;
            }
            if inner.state.zero_turn {
                return TurnVerdict::Proceed;
            }
            inner = self.wait_on(&self.zero_cv, inner);
        }
    }

    /// Blocks the Odd actor until it holds the turn.
    ///
    /// The predicate is `!zero_turn && position is odd`; termination and
    /// cancellation behave as in [`wait_zero_turn`](Self::wait_zero_turn).
    pub fn wait_odd_turn(&self) -> TurnVerdict {
        self.wait_parity_turn(Role::Odd)
    }

    /// Blocks the Even actor until it holds the turn.
    ///
    /// The predicate is `!zero_turn && position is even`; termination and
    /// cancellation behave as in [`wait_zero_turn`](Self::wait_zero_turn).
    pub fn wait_even_turn(&self) -> TurnVerdict {
        self.wait_parity_turn(Role::Even)
    }

    fn wait_parity_turn(&self, role: Role) -> TurnVerdict {
        let mut inner = self.lock();
        loop {
            if let Some(verdict) = self.exit_verdict(&inner.state) {
                return verdict;
            }
            if !inner.state.zero_turn && role.matches_position(inner.state.position) {
                return TurnVerdict::Proceed;
            }
            inner = self.wait_on(&self.parity_cv, inner);
        }
    }

    /// Commits a zero emission and hands the turn to the parity roles.
    ///
    /// Must only be called after [`wait_zero_turn`](Self::wait_zero_turn)
    /// returned [`TurnVerdict::Proceed`]; calling it out of turn is a
    /// programming error that fails fast in debug builds.
    ///
    /// Both parity waiters are woken; only the one whose parity matches the
    /// current position will pass its predicate, the other re-blocks.
    pub fn commit_zero(&self) {
        let mut inner = self.lock();
        debug_assert!(
            inner.state.zero_turn && inner.state.position <= self.bound,
            "commit_zero called without passing wait_zero_turn"
        );
        inner.record(Symbol::Zero);
        inner.state.zero_turn = false;
        drop(inner);
        self.parity_cv.notify_all();
    }

    /// Commits the current position as a non-zero emission for `role`,
    /// advances the position, and hands the turn back to the Zero role.
    ///
    /// Must only be called after the matching parity wait returned
    /// [`TurnVerdict::Proceed`]. When the advance pushes `position` past the
    /// bound, every waiter is woken so all actors observe termination.
    pub fn commit_value(&self, role: Role) {
        let mut inner = self.lock();
        let position = inner.state.position;
        debug_assert!(
            role != Role::Zero
                && !inner.state.zero_turn
                && position <= self.bound
                && role.matches_position(position),
            "commit_value called without passing the matching parity wait"
        );
        inner.record(Symbol::Value(position));
        inner.state.position = position + 1;
        inner.state.zero_turn = true;
        let finished = inner.state.position > self.bound;
        drop(inner);
        if finished {
            self.zero_cv.notify_all();
            self.parity_cv.notify_all();
        } else {
            self.zero_cv.notify_one();
        }
    }

    /// Requests cancellation of the run.
    ///
    /// Every blocked actor is woken, observes the latch at the top of its
    /// wait loop, and exits without emitting. The mutex is never held across
    /// the notification.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        inner.state.cancelled = true;
        drop(inner);
        self.zero_cv.notify_all();
        self.parity_cv.notify_all();
    }

    /// Returns `true` if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.lock().state.cancelled
    }

    /// Returns a copy of the current shared state.
    #[must_use]
    pub fn state(&self) -> SequenceState {
        self.lock().state
    }

    fn exit_verdict(&self, state: &SequenceState) -> Option<TurnVerdict> {
        if state.cancelled {
            Some(TurnVerdict::Cancelled)
        } else if state.position > self.bound {
            Some(TurnVerdict::Finished)
        } else {
            None
        }
    }

    // A poisoned mutex means an actor panicked mid-commit; the state is
    // still structurally valid (commits never unwind between mutations),
    // so we recover the guard and let the driver surface the panic.
    fn lock(&self) -> MutexGuard<'_, MonitorInner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_on<'a>(
        &self,
        cv: &Condvar,
        guard: MutexGuard<'a, MonitorInner<S>>,
    ) -> MutexGuard<'a, MonitorInner<S>> {
        cv.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }
}

impl TurnMonitor<MemorySink> {
    /// Removes and returns the emissions recorded so far.
    #[must_use]
    pub fn take_emissions(&self) -> Vec<Emission> {
        self.lock().sink.take()
    }
}
