//! Error types for the Brewin interpreter
//!
//! Every variant here is a *fatal* fault: it aborts the whole run. Exceptions
//! raised by Brewin programs (`raise "name";`, division by zero) are not errors
//! at this level; they travel as [`crate::runtime::Outcome::Raised`] values and
//! only become [`Error::UncaughtException`] once they reach program entry.

use thiserror::Error;

/// Brewin interpreter faults
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Name resolution
    /// Reference to something that is not in scope
    ///
    /// **Triggered by:** reading or assigning an undeclared variable, calling an
    /// unknown function or a known one with the wrong number of arguments,
    /// redeclaring a variable in the same block, passing more than one
    /// argument to `inputi`/`inputs`
    /// **Example:** `x = 5;` without a preceding `var x;`
    #[error("Name error: {message}")]
    NameError {
        /// Error description
        message: String,
    },

    // Typing
    /// Operation applied to operands of the wrong type
    ///
    /// **Triggered by:** `1 + "a"`, `if (5) { ... }`, `raise 3;`, `-true`
    #[error("Type error: {message}")]
    TypeError {
        /// Error description
        message: String,
    },

    // Faults
    /// A raised exception reached program entry without being caught
    #[error("Fault: exception \"{name}\" was not caught")]
    UncaughtException {
        /// Exception name
        name: String,
    },

    /// Integer arithmetic left the 64-bit range
    #[error("Fault: integer overflow in {op}")]
    IntegerOverflow {
        /// Operator symbol
        op: String,
    },

    /// Too many nested user function calls
    #[error("Fault: call depth exceeded (max: {limit})")]
    CallDepthExceeded {
        /// Configured maximum depth
        limit: usize,
    },

    /// `inputi`/`inputs` found no more input lines
    #[error("Fault: input exhausted")]
    InputExhausted,

    /// Reading from the console failed
    #[error("I/O error: {0}")]
    Io(String),

    /// The AST document handed over by the parser could not be decoded
    #[error("Invalid program: {0}")]
    InvalidProgram(String),
}

/// Kind tag reported to the host for a fatal fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown variable/function, redeclaration, bad builtin arity
    Name,
    /// Incompatible operand or condition type
    Type,
    /// Uncaught exception and every other terminal fault
    Fault,
}

impl Error {
    /// Create a name error with a message
    pub fn name(msg: impl Into<String>) -> Self {
        Error::NameError {
            message: msg.into(),
        }
    }

    /// Create a type error with a message
    pub fn type_error(msg: impl Into<String>) -> Self {
        Error::TypeError {
            message: msg.into(),
        }
    }

    /// Classify the fault
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NameError { .. } => ErrorKind::Name,
            Error::TypeError { .. } => ErrorKind::Type,
            Error::UncaughtException { .. }
            | Error::IntegerOverflow { .. }
            | Error::CallDepthExceeded { .. }
            | Error::InputExhausted
            | Error::Io(_)
            | Error::InvalidProgram(_) => ErrorKind::Fault,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidProgram(err.to_string())
    }
}

/// Result type for Brewin operations
pub type Result<T> = std::result::Result<T, Error>;
