//! Runtime execution for Brewin programs using call-by-need evaluation

mod config;
mod environment;
mod evaluator;
mod functions;
pub mod operators;
mod outcome;
mod stack;
mod thunk;
mod value;

pub use config::InterpreterConfig;
pub use environment::Environment;
pub use evaluator::{Interpreter, ENTRY_POINT};
pub use functions::FunctionTable;
pub use outcome::{Forced, Outcome};
pub use thunk::{Node, Thunk};
pub use value::Value;
