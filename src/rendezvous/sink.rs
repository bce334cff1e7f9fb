/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Sink trait and in-memory implementation for emission storage.
//!
//! A sink is an append-only log of [`Emission`]s. Emissions are recorded
//! inside the coordination layer's critical section, so the stored order is
//! exactly the order in which actors committed.

use super::emission::Emission;

/// Append-only log of [`Emission`]s.
///
/// Implementations must preserve insertion order; no reordering is
/// permitted. The sink is the externally observable output channel of
/// a run.
pub trait Sink {
    /// Appends a new emission to the sink.
    fn record(&mut self, emission: Emission);

    /// Returns the total number of emissions stored.
    #[must_use]
    fn len(&self) -> usize;

    /// Returns `true` if nothing has been emitted.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory implementation of [`Sink`].
///
/// Stores all emissions in a `Vec` in insertion order.
///
/// # Examples
///
/// ```
/// use turnwise::{Emission, MemorySink, Sink, Symbol};
///
/// let mut sink = MemorySink::new();
/// assert!(sink.is_empty());
///
/// sink.record(Emission::new(1, Symbol::Zero));
/// sink.record(Emission::new(2, Symbol::Value(1)));
/// assert_eq!(sink.len(), 2);
/// assert_eq!(sink.emissions()[1].symbol, Symbol::Value(1));
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    emissions: Vec<Emission>,
}

impl MemorySink {
    /// Creates a new empty in-memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            emissions: Vec::new(),
        }
    }

    /// Creates a sink with pre-allocated capacity.
    ///
    /// A run bounded by `n` produces exactly `2 * n` emissions, so callers
    /// that know the bound can avoid reallocations.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            emissions: Vec::with_capacity(capacity),
        }
    }

    /// Returns a slice of all stored emissions.
    #[must_use]
    pub fn emissions(&self) -> &[Emission] {
        &self.emissions
    }

    /// Removes and returns all stored emissions, leaving the sink empty.
    #[must_use]
    pub fn take(&mut self) -> Vec<Emission> {
        std::mem::take(&mut self.emissions)
    }
}

impl Sink for MemorySink {
    fn record(&mut self, emission: Emission) {
        self.emissions.push(emission);
    }

    #[inline]
    fn len(&self) -> usize {
        self.emissions.len()
    }
}
