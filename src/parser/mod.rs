//! Brewin AST Module
//!
//! Brewin source text is lexed and parsed by an external front end. What the
//! interpreter consumes is the resulting tree, handed over either as Rust
//! values or as a JSON document in the shape of [`Program`].

mod ast;

pub use ast::{
    Assignment, BinaryOp, Catcher, Expression, FunctionDef, Program, Statement, UnaryOp,
};

use crate::error::Result;
use std::path::Path;

/// Decode a program from its JSON AST representation
pub fn load_program(json: &str) -> Result<Program> {
    let program: Program = serde_json::from_str(json)?;
    tracing::debug!(functions = program.functions.len(), "loaded program");
    Ok(program)
}

/// Read and decode a JSON AST file
pub fn load_program_file(path: impl AsRef<Path>) -> Result<Program> {
    let json = std::fs::read_to_string(path)?;
    load_program(&json)
}
