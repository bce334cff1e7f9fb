/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! # turnwise
//!
//! A bounded turn-based rendezvous primitive: three concurrent actors
//! (Zero, Odd, Even) coordinate turns through a shared monitor to emit the
//! deterministic interleaved sequence `0, 1, 0, 2, …, 0, n` — without
//! busy-waiting, without missed wake-ups, and without deadlock.
//!
//! Two coordination strategies are provided with identical observable
//! behavior:
//!
//! - [`TurnMonitor`]: a classic monitor (one mutex, two condition
//!   variables) driven by OS threads via [`SequenceDriver`]
//! - [`channel::TurnServer`]: a single async task owning the state,
//!   coordinating actors over request/grant channels
//!
//! Completed runs produce a serializable [`RunReport`] whose transcript can
//! be re-verified against the canonical interleaving at any time.
//!
//! # Quick start
//!
//! ```
//! use turnwise::run_report;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = run_report(5)?;
//! assert_eq!(report.as_string(), "0102030405");
//! report.verify()?;
//! # Ok(())
//! # }
//! ```

pub mod rendezvous;

pub use rendezvous::channel;
pub use rendezvous::{
    Actor, ActorOutcome, CancelHandle, Emission, MemorySink, Role, RunError, RunId, RunReport,
    SequenceDriver, SequenceState, Sink, Symbol, TranscriptError, TurnMonitor, TurnServer,
    TurnVerdict, run_report, run_sequence, run_sequence_channel,
};

/// Monitor type used by the default thread-based driver.
pub type DefaultMonitor = TurnMonitor<MemorySink>;
