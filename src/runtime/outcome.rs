//! Control signals.
//!
//! Brewin exceptions never unwind the Rust stack. Every statement sequence
//! reports an [`Outcome`], every forced expression a [`Forced`], and each
//! caller checks and forwards `Raised` explicitly (see [`forced!`]).

use crate::runtime::Value;

/// Result of executing a statement sequence
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Ran to completion; the enclosing sequence keeps going
    Continue,
    /// `return` executed; carries the computed result
    Return(Value),
    /// An exception with this name is propagating
    Raised(String),
}

/// Result of forcing an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Forced {
    /// The expression produced a value
    Value(Value),
    /// Forcing raised an exception with this name
    Raised(String),
}

impl Outcome {
    /// True for `Return` and `Raised`, which end the enclosing sequence
    pub fn is_abrupt(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// Unwraps a [`Forced::Value`], or returns early with the raised exception
/// wrapped by the given constructor (`Forced::Raised` or `Outcome::Raised`).
macro_rules! forced {
    ($forced:expr, $raised:path) => {
        match $forced {
            $crate::runtime::Forced::Value(value) => value,
            $crate::runtime::Forced::Raised(name) => return Ok($raised(name)),
        }
    };
}

pub(crate) use forced;
