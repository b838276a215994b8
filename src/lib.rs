//! # Brewin - a call-by-need imperative language
//!
//! A tree-walking interpreter for Brewin: functions, block-scoped variables,
//! `if`/`for`, and string-named exceptions with `try`/`catch`. Assignments and
//! function arguments are lazy. The right-hand side is captured as a thunk and
//! computed at most once, the first time something needs its value.
//!
//! The crate starts from an already-parsed program. The front end hands over
//! a [`Program`], either built directly or decoded from its JSON form with
//! [`parser::load_program`].
//!
//! ## Quick Start
//!
//! ```rust
//! use brewin::{run_program, BufferedConsole, Expression, FunctionDef, Program, Statement};
//!
//! # fn main() -> brewin::Result<()> {
//! // func main() { var x; x = 3 + 4; print(x); }
//! let program = Program {
//!     functions: vec![FunctionDef::new(
//!         "main",
//!         &[],
//!         vec![
//!             Statement::vardef("x"),
//!             Statement::assign(
//!                 "x",
//!                 Expression::binary(brewin::BinaryOp::Add, Expression::int(3), Expression::int(4)),
//!             ),
//!             Statement::call("print", vec![Expression::var("x")]),
//!         ],
//!     )],
//! };
//!
//! let mut console = BufferedConsole::new();
//! run_program(&program, &mut console)?;
//! assert_eq!(console.outputs(), ["7"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! JSON AST → Program → FunctionTable → Interpreter (statements → Outcome,
//!                                                   expressions → Thunk → Forced)
//! ```
//!
//! - [`Interpreter`] - statement executor and call engine
//! - [`Thunk`] - shared, self-memoizing deferred expression
//! - [`Environment`] - scope stack with function-boundary lookup
//! - [`Outcome`] / [`Forced`] - explicit control signals (`Continue`,
//!   `Return`, `Raised`)
//! - [`ToolRegistry`] - builtins (`print`, `inputi`, `inputs`)
//! - [`Console`] - host I/O seam
//!
//! ## Error Handling
//!
//! Brewin exceptions are ordinary values. They are caught by `try`/`catch`,
//! or they escape `main` and become [`Error::UncaughtException`]. Everything
//! else in [`Error`] is a fatal fault. Its [`Error::kind`] tells the host
//! whether it was a name, type or other fault.

// Module declarations
pub mod error;
pub mod parser;
pub mod runtime;
pub mod tools;

// Re-export main types
pub use error::{Error, ErrorKind, Result};
pub use parser::{
    Assignment, BinaryOp, Catcher, Expression, FunctionDef, Program, Statement, UnaryOp,
};
pub use runtime::{
    Environment, Forced, FunctionTable, Interpreter, InterpreterConfig, Node, Outcome, Thunk,
    Value,
};
pub use tools::{BufferedConsole, Console, StdConsole, Tool, ToolRegistry};

/// Version of the Brewin interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs `program` from `main` with the default configuration
pub fn run_program(program: &Program, console: &mut dyn Console) -> Result<()> {
    Interpreter::new(program, console).run()
}

/// Runs `program` from `main` with an explicit configuration
pub fn run_program_with_config(
    program: &Program,
    console: &mut dyn Console,
    config: InterpreterConfig,
) -> Result<()> {
    Interpreter::with_config(program, console, config).run()
}
