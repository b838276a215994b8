//! Basic I/O builtins
//!
//! - `print(args...)` - concatenate the display form of every argument into
//!   one output line
//! - `inputi([prompt])` - read one line and parse it as an integer
//! - `inputs([prompt])` - read one line as a string

use crate::error::{Error, Result};
use crate::runtime::Value;
use crate::tools::{Console, Tool, ToolRegistry};

// ============================================================================
// OUTPUT
// ============================================================================

/// print - Emit the concatenation of all arguments as one line
pub struct PrintTool;

impl Tool for PrintTool {
    fn name(&self) -> &str {
        "print"
    }

    fn description(&self) -> &str {
        "Concatenate all arguments and emit them as one output line"
    }

    fn execute(&self, args: &[Value], console: &mut dyn Console) -> Result<Value> {
        let line: String = args.iter().map(ToString::to_string).collect();
        console.output(&line);
        Ok(Value::Nil)
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Shared prompt-then-read step of `inputi`/`inputs`
fn prompt_and_read(args: &[Value], console: &mut dyn Console) -> Result<String> {
    if let Some(prompt) = args.first() {
        console.prompt(&prompt.to_string());
    }
    console.read_input()
}

/// inputi - Read one line as an integer
pub struct InputiTool;

impl Tool for InputiTool {
    fn name(&self) -> &str {
        "inputi"
    }

    fn description(&self) -> &str {
        "Optionally prompt, then read one line and parse it as an integer"
    }

    fn execute(&self, args: &[Value], console: &mut dyn Console) -> Result<Value> {
        let line = prompt_and_read(args, console)?;
        line.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            Error::type_error(format!("inputi expected an integer, got {:?}", line))
        })
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// inputs - Read one line as a string
pub struct InputsTool;

impl Tool for InputsTool {
    fn name(&self) -> &str {
        "inputs"
    }

    fn description(&self) -> &str {
        "Optionally prompt, then read one line as a string"
    }

    fn execute(&self, args: &[Value], console: &mut dyn Console) -> Result<Value> {
        prompt_and_read(args, console).map(Value::String)
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// Register the I/O builtins
pub fn register(registry: &mut ToolRegistry) {
    registry.register(PrintTool);
    registry.register(InputiTool);
    registry.register(InputsTool);
}
