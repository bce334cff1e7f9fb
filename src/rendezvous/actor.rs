/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Actor roles and the actor loop.
//!
//! Each run spawns three actors, one per [`Role`]. An actor is a loop of
//! wait → re-check → commit against a [`TurnMonitor`]: it blocks until its
//! turn predicate holds, emits exactly one symbol, and goes back to
//! waiting. Termination and cancellation are observed through the verdict
//! returned by the wait, never by polling.
//!
//! [`TurnMonitor`]: super::monitor::TurnMonitor

use super::monitor::{TurnMonitor, TurnVerdict};
use super::sink::Sink;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// The three concurrent roles of a sequence run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Emits the `0` separator before every non-zero value.
    Zero,

    /// Emits the odd sequence values `1, 3, 5, …`.
    Odd,

    /// Emits the even sequence values `2, 4, 6, …`.
    Even,
}

impl Role {
    /// All three roles, in spawn order.
    pub const ALL: [Role; 3] = [Role::Zero, Role::Odd, Role::Even];

    /// Returns `true` if this parity role is the one that emits `position`.
    ///
    /// Always `false` for [`Role::Zero`], which never emits positions.
    #[inline]
    #[must_use]
    pub fn matches_position(self, position: u64) -> bool {
        match self {
            Role::Zero => false,
            Role::Odd => position % 2 == 1,
            Role::Even => position % 2 == 0,
        }
    }

    /// Returns the parity role that emits `position`.
    #[inline]
    #[must_use]
    pub fn of_position(position: u64) -> Role {
        if position % 2 == 1 { Role::Odd } else { Role::Even }
    }

    /// Returns the lowercase role name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Zero => "zero",
            Role::Odd => "odd",
            Role::Even => "even",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an actor's loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorOutcome {
    /// The actor observed `position > bound` and exited cleanly.
    Completed,

    /// The actor observed a cancellation request and exited without
    /// emitting further.
    Cancelled,
}

/// One concurrent role of a run, bound to its [`Role`] at construction.
///
/// Actors are stateless beyond their role; all shared state lives in the
/// monitor. The per-actor state machine is
/// `WAITING → ELIGIBLE → EMITTING → WAITING | TERMINATED`, driven entirely
/// by [`run`](Self::run).
pub struct Actor {
    role: Role,
    delay: Option<Box<dyn Fn() + Send + Sync>>,
}

impl Actor {
    /// Creates an actor for the given role.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self { role, delay: None }
    }

    /// Creates an actor that invokes `delay` between becoming eligible and
    /// committing.
    ///
    /// Used by stress tests to inject scheduling jitter: the emitted order
    /// must be unaffected because eligibility is predicate-enforced, not
    /// timing-enforced.
    #[must_use]
    pub fn with_delay(role: Role, delay: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            role,
            delay: Some(Box::new(delay)),
        }
    }

    /// Returns this actor's role.
    #[inline]
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Runs the actor loop until termination or cancellation.
    ///
    /// The verdict returned by each wait is consulted before every commit;
    /// an actor that wakes to `position > bound` exits without emitting and
    /// without further signalling.
    pub fn run<S: Sink>(&self, monitor: &TurnMonitor<S>) -> ActorOutcome {
        debug!(role = %self.role, bound = monitor.bound(), "actor started");
        loop {
            let verdict = match self.role {
                Role::Zero => monitor.wait_zero_turn(),
                Role::Odd => monitor.wait_odd_turn(),
                Role::Even => monitor.wait_even_turn(),
            };
            match verdict {
                TurnVerdict::Proceed => {}
                TurnVerdict::Finished => {
                    debug!(role = %self.role, "actor terminated");
                    return ActorOutcome::Completed;
                }
                TurnVerdict::Cancelled => {
                    debug!(role = %self.role, "actor cancelled");
                    return ActorOutcome::Cancelled;
                }
            }
            // Between Proceed and commit no other actor's predicate can
            // hold, so injected delay stalls the run but cannot reorder it.
            if let Some(delay) = &self.delay {
                delay();
            }
            match self.role {
                Role::Zero => monitor.commit_zero(),
                role => monitor.commit_value(role),
            }
        }
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("role", &self.role)
            .field("has_delay", &self.delay.is_some())
            .finish()
    }
}
