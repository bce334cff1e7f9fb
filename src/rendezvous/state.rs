/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Shared turn state for a single sequence run.
//!
//! [`SequenceState`] is the only shared mutable record in the system. It is
//! owned exclusively by the coordination layer ([`TurnMonitor`] or
//! [`TurnServer`]) and is never read or written outside its guarded section.
//!
//! [`TurnMonitor`]: super::monitor::TurnMonitor
//! [`TurnServer`]: super::channel::TurnServer

/// Mutable turn-tracking record shared by the three actors.
///
/// Invariants maintained by the coordination layer:
/// - `position` starts at 1 and increases by exactly 1 per non-zero emission.
/// - `zero_turn` alternates strictly: true before every non-zero emission,
///   false immediately after a zero emission.
/// - `cancelled` is a one-way latch; once set it is never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceState {
    /// Next non-zero value to be emitted (1-based).
    pub position: u64,

    /// `true` when the Zero role emits next, `false` when a parity role does.
    pub zero_turn: bool,

    /// Set by an external cancellation request; observed at every wait point.
    pub cancelled: bool,
}

impl SequenceState {
    /// Creates the initial state for a fresh run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: 1,
            zero_turn: true,
            cancelled: false,
        }
    }
}

impl Default for SequenceState {
    fn default() -> Self {
        Self::new()
    }
}
