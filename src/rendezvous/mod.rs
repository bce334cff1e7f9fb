/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Bounded turn-based rendezvous.
//!
//! Three concurrent actors — Zero, Odd, and Even — cooperate to emit the
//! canonical interleaving `0, 1, 0, 2, …, 0, n` for a fixed bound `n`. The
//! order is enforced purely by the turn predicates, never by scheduler
//! timing: at any instant exactly one actor's predicate can hold, and each
//! commit atomically couples the emission with the turn hand-off.
//!
//! # Architecture
//!
//! - [`state::SequenceState`] is the single shared mutable record
//! - [`monitor::TurnMonitor`] guards it with one mutex and two condition
//!   variables (one for the Zero role, one shared by the parity roles)
//! - [`actor::Actor`] is the wait → re-check → commit loop run once per role
//! - [`sink::Sink`] receives emissions in exact commit order
//! - [`run::SequenceDriver`] spawns and joins the three actor threads
//! - [`channel::TurnServer`] is the lock-free alternative: a single task
//!   owning the state, coordinating actors over request/grant channels
//!
//! # Examples
//!
//! ```
//! use turnwise::run_sequence;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let symbols = run_sequence(5)?;
//! assert_eq!(symbols.len(), 10);
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod channel;
pub mod emission;
pub mod monitor;
pub mod run;
pub mod sink;
pub mod state;
pub mod transcript;

#[cfg(test)]
mod tests;

// Re-export main types
pub use actor::{Actor, ActorOutcome, Role};
pub use channel::{TurnServer, run_sequence_channel};
pub use emission::{Emission, Symbol};
pub use monitor::{TurnMonitor, TurnVerdict};
pub use run::{CancelHandle, RunError, SequenceDriver, run_report, run_sequence};
pub use sink::{MemorySink, Sink};
pub use state::SequenceState;
pub use transcript::{RunId, RunReport, TranscriptError};
