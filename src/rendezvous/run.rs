/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Thread-based run driver.
//!
//! [`SequenceDriver`] owns a [`TurnMonitor`], spawns one OS thread per
//! [`Role`], joins all three, and returns the run transcript. The emitted
//! order is fully determined by the monitor's predicates, so repeated runs
//! with the same bound produce identical transcripts regardless of how the
//! host schedules the threads.

use super::actor::{Actor, ActorOutcome, Role};
use super::emission::{Emission, Symbol};
use super::monitor::TurnMonitor;
use super::sink::MemorySink;
use super::transcript::{RunId, RunReport};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by a run driver.
#[derive(Debug, Error)]
pub enum RunError {
    /// The run was cancelled before completing.
    ///
    /// The carried emissions are a strict prefix of the canonical
    /// sequence — cancellation never produces a reordered transcript.
    #[error("run cancelled after {} emissions", emitted.len())]
    Cancelled {
        /// Emissions committed before every actor observed cancellation.
        emitted: Vec<Emission>,
    },

    /// An actor panicked mid-run.
    #[error("{role} actor panicked during the run")]
    ActorPanicked {
        /// The role whose thread panicked.
        role: Role,
    },

    /// The host refused to spawn an actor thread.
    #[error("failed to spawn {role} actor thread")]
    Spawn {
        /// The role that could not be spawned.
        role: Role,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The channel-based turn server is no longer accepting requests.
    #[error("turn server has been shut down")]
    Shutdown,
}

/// Handle for cancelling an in-flight run from outside.
///
/// Cloneable and cheap; cancelling an already-finished run is a no-op.
#[derive(Clone)]
pub struct CancelHandle {
    monitor: Arc<TurnMonitor<MemorySink>>,
}

impl CancelHandle {
    /// Requests cancellation: every blocked actor wakes, exits without
    /// emitting, and the driver returns [`RunError::Cancelled`].
    pub fn cancel(&self) {
        self.monitor.cancel();
    }
}

/// Thread-based driver for one sequence run.
///
/// # Examples
///
/// ```
/// use turnwise::SequenceDriver;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = SequenceDriver::new(5).run()?;
/// assert_eq!(report.as_string(), "0102030405");
/// # Ok(())
/// # }
/// ```
pub struct SequenceDriver {
    monitor: Arc<TurnMonitor<MemorySink>>,
    run_id: RunId,
    delay: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl SequenceDriver {
    /// Creates a driver for a run bounded by `bound`.
    #[must_use]
    pub fn new(bound: u64) -> Self {
        Self {
            monitor: Arc::new(TurnMonitor::new(bound)),
            run_id: RunId::new(),
            delay: None,
        }
    }

    /// Returns the identity assigned to this run.
    #[inline]
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns a handle that can cancel the run from another thread.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            monitor: Arc::clone(&self.monitor),
        }
    }

    /// Installs a delay invoked by every actor between eligibility and
    /// commit.
    ///
    /// Intended for stress tests that inject scheduling jitter; the
    /// transcript must be unaffected.
    #[must_use]
    pub fn with_commit_delay(mut self, delay: impl Fn() + Send + Sync + 'static) -> Self {
        self.delay = Some(Arc::new(delay));
        self
    }

    /// Spawns the three actors, joins them, and returns the transcript.
    ///
    /// Blocks the caller until every actor has terminated. If spawning any
    /// actor fails, actors already running are cancelled and joined before
    /// the error is returned, so no thread is leaked.
    ///
    /// # Errors
    ///
    /// - [`RunError::Cancelled`] if the run was cancelled mid-flight
    /// - [`RunError::ActorPanicked`] if an actor thread panicked
    /// - [`RunError::Spawn`] if the host could not spawn an actor thread
    pub fn run(self) -> Result<RunReport, RunError> {
        debug!(run_id = %self.run_id, bound = self.monitor.bound(), "run starting");

        let mut handles = Vec::with_capacity(Role::ALL.len());
        for role in Role::ALL {
            match self.spawn_actor(role) {
                Ok(handle) => handles.push((role, handle)),
                Err(e) => {
                    // Wake the actors already spawned so join cannot hang.
                    self.monitor.cancel();
                    for (_, handle) in handles {
                        let _ = handle.join();
                    }
                    return Err(e);
                }
            }
        }

        let mut cancelled = false;
        for (role, handle) in handles {
            match handle.join() {
                Ok(ActorOutcome::Completed) => {}
                Ok(ActorOutcome::Cancelled) => cancelled = true,
                Err(_) => {
                    // Unblock the remaining actors before reporting.
                    self.monitor.cancel();
                    return Err(RunError::ActorPanicked { role });
                }
            }
        }

        let emissions = self.monitor.take_emissions();
        if cancelled {
            debug!(run_id = %self.run_id, emitted = emissions.len(), "run cancelled");
            return Err(RunError::Cancelled { emitted: emissions });
        }

        debug!(run_id = %self.run_id, emitted = emissions.len(), "run complete");
        Ok(RunReport::new(
            self.run_id,
            self.monitor.bound(),
            emissions,
        ))
    }

    fn spawn_actor(&self, role: Role) -> Result<thread::JoinHandle<ActorOutcome>, RunError> {
        let monitor = Arc::clone(&self.monitor);
        let delay = self.delay.clone();
        thread::Builder::new()
            .name(format!("{role}-actor"))
            .spawn(move || {
                let actor = match delay {
                    Some(f) => Actor::with_delay(role, move || f()),
                    None => Actor::new(role),
                };
                actor.run(&monitor)
            })
            .map_err(|source| RunError::Spawn { role, source })
    }
}

/// Runs a full sequence bounded by `n` and returns the emitted symbols.
///
/// Blocks until all three actors have terminated. The result is always the
/// canonical interleaving `0, 1, 0, 2, …, 0, n`, empty for `n = 0`.
///
/// # Errors
///
/// See [`SequenceDriver::run`].
///
/// # Examples
///
/// ```
/// use turnwise::{Symbol, run_sequence};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let symbols = run_sequence(2)?;
/// assert_eq!(
///     symbols,
///     vec![Symbol::Zero, Symbol::Value(1), Symbol::Zero, Symbol::Value(2)]
/// );
/// # Ok(())
/// # }
/// ```
pub fn run_sequence(n: u64) -> Result<Vec<Symbol>, RunError> {
    run_report(n).map(|report| report.symbols())
}

/// Runs a full sequence bounded by `n` and returns the complete
/// [`RunReport`].
///
/// # Errors
///
/// See [`SequenceDriver::run`].
pub fn run_report(n: u64) -> Result<RunReport, RunError> {
    SequenceDriver::new(n).run()
}
