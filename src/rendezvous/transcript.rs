/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Run transcripts and canonical-sequence verification.
//!
//! A [`RunReport`] is the serializable record of one completed run: the run
//! identity, the bound, and the ordered emissions. [`RunReport::verify`]
//! checks the transcript against the canonical interleaving
//! `0, 1, 0, 2, …, 0, n` independently of how the run was produced.

use super::emission::{Emission, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a fresh random run identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors detected while verifying a transcript against the canonical
/// interleaving.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    /// The transcript does not contain exactly `2 * bound` emissions.
    #[error("transcript length mismatch: expected {expected} emissions, found {found}")]
    LengthMismatch {
        /// Expected emission count (`2 * bound`).
        expected: u64,
        /// Actual emission count.
        found: u64,
    },

    /// An emission's recorded index does not follow its predecessor's.
    #[error("emission index gap: expected {expected}, found {found}")]
    IndexGap {
        /// The expected next index.
        expected: u64,
        /// The index actually recorded.
        found: u64,
    },

    /// An odd output position holds something other than a zero emission.
    #[error("output position {index} must be a zero emission, found {found}")]
    MisplacedZero {
        /// 1-based output position.
        index: u64,
        /// The symbol actually found there.
        found: u64,
    },

    /// An even output position `2k` holds a value other than `k`.
    #[error("output position {index} must be {expected}, found {found}")]
    WrongValue {
        /// 1-based output position.
        index: u64,
        /// The canonical value `k` for position `2k`.
        expected: u64,
        /// The value actually found there.
        found: u64,
    },
}

/// Serializable record of one completed sequence run.
///
/// # Examples
///
/// ```
/// use turnwise::run_report;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_report(3)?;
/// assert_eq!(report.as_string(), "010203");
/// report.verify()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Identity of the run that produced this transcript.
    pub run_id: RunId,

    /// The termination bound `n` the run was configured with.
    pub bound: u64,

    /// Ordered emissions, ascending by index.
    pub emissions: Vec<Emission>,
}

impl RunReport {
    /// Creates a report from a finished run's emissions.
    #[must_use]
    pub fn new(run_id: RunId, bound: u64, emissions: Vec<Emission>) -> Self {
        Self {
            run_id,
            bound,
            emissions,
        }
    }

    /// Returns the emitted symbols in output order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.emissions.iter().map(|e| e.symbol).collect()
    }

    /// Returns the transcript as concatenated digits, e.g. `"0102030405"`
    /// for a run bounded by 5.
    #[must_use]
    pub fn as_string(&self) -> String {
        use std::fmt::Write;
        let mut out = String::with_capacity(self.emissions.len() * 2);
        for emission in &self.emissions {
            let _ = write!(out, "{}", emission.symbol);
        }
        out
    }

    /// Verifies the transcript against the canonical interleaving.
    ///
    /// Checks, in order: total length `2 * bound`, contiguous 1-based
    /// indices, a zero emission at every odd output position, and the value
    /// `k` at every output position `2k`. The zero-count/value-count balance
    /// follows from the positional checks.
    ///
    /// # Errors
    ///
    /// Returns the first [`TranscriptError`] encountered.
    pub fn verify(&self) -> Result<(), TranscriptError> {
        let expected_len = self.bound.saturating_mul(2);
        if self.emissions.len() as u64 != expected_len {
            return Err(TranscriptError::LengthMismatch {
                expected: expected_len,
                found: self.emissions.len() as u64,
            });
        }

        for (i, emission) in self.emissions.iter().enumerate() {
            let index = i as u64 + 1;
            if emission.index != index {
                return Err(TranscriptError::IndexGap {
                    expected: index,
                    found: emission.index,
                });
            }
            if index % 2 == 1 {
                if !emission.symbol.is_zero() {
                    return Err(TranscriptError::MisplacedZero {
                        index,
                        found: emission.symbol.value(),
                    });
                }
            } else {
                let expected = index / 2;
                if emission.symbol != Symbol::Value(expected) {
                    return Err(TranscriptError::WrongValue {
                        index,
                        expected,
                        found: emission.symbol.value(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Serializes the report to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns any [`serde_json`] serialization error.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
