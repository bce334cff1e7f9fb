/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Emission types.
//!
//! This module defines the symbols emitted by actors and the ordered
//! emission records collected by a [`Sink`].
//!
//! [`Sink`]: super::sink::Sink

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single symbol emitted by an actor.
///
/// The Zero role emits [`Symbol::Zero`]; the Odd and Even roles emit
/// [`Symbol::Value`] carrying the sequence position at commit time.
///
/// # Examples
///
/// ```
/// use turnwise::Symbol;
///
/// assert_eq!(Symbol::Zero.to_string(), "0");
/// assert_eq!(Symbol::Value(42).to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    /// The separator emitted by the Zero role.
    Zero,

    /// A non-zero sequence value emitted by the Odd or Even role.
    Value(u64),
}

impl Symbol {
    /// Returns the numeric value of the symbol (`0` for [`Symbol::Zero`]).
    #[inline]
    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            Self::Zero => 0,
            Self::Value(v) => *v,
        }
    }

    /// Returns `true` if this is a zero emission.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// An ordered emission record.
///
/// `index` is the 1-based output position assigned at commit time; reading
/// emissions in ascending index order reproduces the exact wall-clock order
/// in which actors were released by the coordination layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emission {
    /// 1-based output position of this emission.
    pub index: u64,

    /// The symbol emitted.
    pub symbol: Symbol,
}

impl Emission {
    /// Creates a new emission record.
    #[must_use]
    pub fn new(index: u64, symbol: Symbol) -> Self {
        Self { index, symbol }
    }
}
