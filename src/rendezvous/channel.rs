/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Channel-based turn server.
//!
//! [`TurnServer`] is the message-passing rendition of the turn protocol: a
//! single async task owns the [`SequenceState`] and the sink outright, and
//! actors interact with it exclusively through request/grant channels. No
//! mutex or condition variable is involved, yet the happens-before
//! guarantees are identical — eligibility, emission, mutation, and signal
//! are coupled inside the one owning task.
//!
//! A turn request whose role is not currently eligible is parked until a
//! commit makes it eligible; the grant doubles as the wake-up. This is the
//! directed-signal equivalent of the monitor's broadcast-wake: the server
//! computes which role is next and wakes exactly that one.
//!
//! [`SequenceState`]: super::state::SequenceState

use super::actor::Role;
use super::emission::{Emission, Symbol};
use super::run::RunError;
use super::sink::{MemorySink, Sink};
use super::state::SequenceState;
use super::transcript::{RunId, RunReport};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

/// Type alias for emission listener functions.
type EmissionListener = Arc<dyn Fn(&Emission) + Send + Sync>;

/// A request submitted to the turn server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRequest {
    /// The given role asks for its next turn.
    Turn(Role),

    /// External request to cancel the run.
    Cancel,
}

/// The server's reply to a [`TurnRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnGrant {
    /// The role's turn arrived and its emission was committed.
    Emitted(Emission),

    /// The run is complete; the requester must exit.
    Finished,

    /// The run was cancelled; the requester must exit.
    Cancelled,
}

/// Sender half used by actors to reach the server.
pub type RequestSender = mpsc::Sender<(TurnRequest, oneshot::Sender<TurnGrant>)>;

type RequestReceiver = mpsc::Receiver<(TurnRequest, oneshot::Sender<TurnGrant>)>;

/// Parked reply slots, at most one per role.
#[derive(Default)]
struct PendingWaits {
    zero: Option<oneshot::Sender<TurnGrant>>,
    odd: Option<oneshot::Sender<TurnGrant>>,
    even: Option<oneshot::Sender<TurnGrant>>,
}

impl PendingWaits {
    fn park(&mut self, role: Role, reply: oneshot::Sender<TurnGrant>) {
        let slot = self.slot(role);
        debug_assert!(slot.is_none(), "role requested a turn while one is pending");
        *slot = Some(reply);
    }

    fn take(&mut self, role: Role) -> Option<oneshot::Sender<TurnGrant>> {
        self.slot(role).take()
    }

    fn flush(&mut self, grant: TurnGrant) {
        for role in Role::ALL {
            if let Some(reply) = self.take(role) {
                let _ = reply.send(grant);
            }
        }
    }

    fn slot(&mut self, role: Role) -> &mut Option<oneshot::Sender<TurnGrant>> {
        match role {
            Role::Zero => &mut self.zero,
            Role::Odd => &mut self.odd,
            Role::Even => &mut self.even,
        }
    }
}

/// State owned by the server loop task.
struct ServerCore {
    bound: u64,
    state: SequenceState,
    emitted: u64,
    sink: MemorySink,
    run_id: RunId,
    listeners: Vec<EmissionListener>,
}

impl ServerCore {
    /// Server event loop: parks requests until their role is eligible,
    /// commits emissions in canonical order, and replies with grants.
    /// Ends once every request sender has been dropped.
    async fn run_loop(mut self, mut request_rx: RequestReceiver) -> Result<RunReport, RunError> {
        let mut pending = PendingWaits::default();

        while let Some((request, reply)) = request_rx.recv().await {
            match request {
                TurnRequest::Turn(role) => {
                    if self.state.cancelled {
                        let _ = reply.send(TurnGrant::Cancelled);
                        continue;
                    }
                    pending.park(role, reply);
                    self.grant_eligible(&mut pending);
                }
                TurnRequest::Cancel => {
                    self.state.cancelled = true;
                    let _ = reply.send(TurnGrant::Cancelled);
                    pending.flush(TurnGrant::Cancelled);
                }
            }
        }

        let emissions = self.sink.take();
        if self.state.cancelled {
            debug!(run_id = %self.run_id, emitted = emissions.len(), "turn server cancelled");
            return Err(RunError::Cancelled { emitted: emissions });
        }

        debug!(run_id = %self.run_id, emitted = emissions.len(), "turn server complete");
        Ok(RunReport::new(self.run_id, self.bound, emissions))
    }

    /// Grants turns for as long as the next eligible role has a parked
    /// request; flushes everyone with `Finished` once the bound is passed.
    fn grant_eligible(&mut self, pending: &mut PendingWaits) {
        loop {
            if self.state.position > self.bound {
                pending.flush(TurnGrant::Finished);
                return;
            }
            let next = if self.state.zero_turn {
                Role::Zero
            } else {
                Role::of_position(self.state.position)
            };
            let Some(reply) = pending.take(next) else {
                return;
            };
            let emission = self.commit(next);
            let _ = reply.send(TurnGrant::Emitted(emission));
        }
    }

    /// Commits one emission for `role`: records it, notifies listeners, and
    /// advances the turn state. All four steps happen inside the owning
    /// task, which is the message-passing equivalent of the monitor's
    /// critical section.
    fn commit(&mut self, role: Role) -> Emission {
        let symbol = match role {
            Role::Zero => Symbol::Zero,
            Role::Odd | Role::Even => Symbol::Value(self.state.position),
        };
        self.emitted += 1;
        let emission = Emission::new(self.emitted, symbol);
        trace!(index = emission.index, %symbol, "emission committed");
        self.sink.record(emission);

        for listener in &self.listeners {
            listener(&emission);
        }

        match role {
            Role::Zero => self.state.zero_turn = false,
            Role::Odd | Role::Even => {
                self.state.position += 1;
                self.state.zero_turn = true;
            }
        }

        emission
    }
}

/// Single-owner turn server coordinating the three sequence actors.
///
/// # Examples
///
/// ```no_run
/// use turnwise::channel::TurnServer;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut server = TurnServer::new(5);
/// server.add_listener(|emission| {
///     println!("{}: {}", emission.index, emission.symbol);
/// });
/// let report = server.run().await?;
/// assert_eq!(report.as_string(), "0102030405");
/// # Ok(())
/// # }
/// ```
pub struct TurnServer {
    core: ServerCore,
    request_tx: RequestSender,
    request_rx: Option<RequestReceiver>,
}

impl TurnServer {
    /// Creates a server for a run bounded by `bound`.
    ///
    /// Three actors each keep at most one request in flight, so the request
    /// channel stays small.
    #[must_use]
    pub fn new(bound: u64) -> Self {
        let (request_tx, request_rx) = mpsc::channel(8);
        Self {
            core: ServerCore {
                bound,
                state: SequenceState::new(),
                emitted: 0,
                sink: MemorySink::with_capacity(bound.saturating_mul(2).min(65_536) as usize),
                run_id: RunId::new(),
                listeners: Vec::new(),
            },
            request_tx,
            request_rx: Some(request_rx),
        }
    }

    /// Registers an emission listener.
    ///
    /// Listeners are called synchronously in commit order for each emission.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&Emission) + Send + Sync + 'static,
    {
        self.core.listeners.push(Arc::new(listener));
    }

    /// Returns a clone of the request sender.
    ///
    /// Useful for driving actors by hand or for submitting
    /// [`TurnRequest::Cancel`] from outside. The server loop ends only when
    /// every sender has been dropped, so don't hold clones past their use.
    #[must_use]
    pub fn sender(&self) -> RequestSender {
        self.request_tx.clone()
    }

    /// Returns the identity assigned to this run.
    #[inline]
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.core.run_id
    }

    /// Spawns the server loop on a new task, dropping the server's own
    /// sender so the loop ends once actors finish.
    ///
    /// Returns a handle that resolves to the run transcript.
    ///
    /// # Panics
    ///
    /// Panics if called more than once on the same server instance.
    #[must_use]
    pub fn spawn(mut self) -> ServerHandle {
        let request_rx = self.request_rx.take().expect("spawn called twice");
        let core = self.core;

        let handle = tokio::spawn(async move { core.run_loop(request_rx).await });

        ServerHandle { handle }
    }

    /// Runs the full sequence: spawns the server and the three actors,
    /// joins everything, and returns the transcript.
    ///
    /// # Errors
    ///
    /// - [`RunError::Cancelled`] if a cancel request arrived mid-run
    /// - [`RunError::ActorPanicked`] if an actor task panicked
    /// - [`RunError::Shutdown`] if the server stopped while actors were
    ///   still requesting turns
    pub async fn run(self) -> Result<RunReport, RunError> {
        debug!(run_id = %self.core.run_id, bound = self.core.bound, "turn server starting");
        let sender = self.sender();
        let handle = self.spawn();

        let mut actors = Vec::with_capacity(Role::ALL.len());
        for role in Role::ALL {
            let sender = sender.clone();
            actors.push((role, tokio::spawn(drive_role(role, sender))));
        }
        drop(sender);

        for (role, task) in actors {
            task.await.map_err(|_| RunError::ActorPanicked { role })??;
        }

        handle.wait().await
    }
}

/// Handle to a spawned turn server task.
pub struct ServerHandle {
    handle: tokio::task::JoinHandle<Result<RunReport, RunError>>,
}

impl ServerHandle {
    /// Waits for the server to shut down and returns the transcript.
    ///
    /// # Errors
    ///
    /// Propagates the server's [`RunError`]; a panicked server task is
    /// surfaced as [`RunError::Shutdown`].
    pub async fn wait(self) -> Result<RunReport, RunError> {
        self.handle.await.map_err(|_| RunError::Shutdown)?
    }
}

/// Actor loop for the channel variant: request a turn, await the grant,
/// repeat until the server reports completion or cancellation.
pub async fn drive_role(role: Role, sender: RequestSender) -> Result<(), RunError> {
    debug!(%role, "channel actor started");
    loop {
        let (tx, rx) = oneshot::channel();
        sender
            .send((TurnRequest::Turn(role), tx))
            .await
            .map_err(|_| RunError::Shutdown)?;
        match rx.await.map_err(|_| RunError::Shutdown)? {
            TurnGrant::Emitted(_) => {}
            TurnGrant::Finished => {
                debug!(%role, "channel actor terminated");
                return Ok(());
            }
            TurnGrant::Cancelled => {
                debug!(%role, "channel actor cancelled");
                return Ok(());
            }
        }
    }
}

/// Runs a full sequence bounded by `n` on the channel-based server.
///
/// Observably equivalent to [`run_sequence`](super::run::run_sequence);
/// the two variants produce byte-identical transcripts.
///
/// # Errors
///
/// See [`TurnServer::run`].
pub async fn run_sequence_channel(n: u64) -> Result<RunReport, RunError> {
    TurnServer::new(n).run().await
}
