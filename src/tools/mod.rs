//! Builtin function system for Brewin
//!
//! Builtins are looked up by name before the user function table, so a Brewin
//! program cannot shadow them. The interpreter forces every argument (left to
//! right, propagating any raise) before handing the values to a tool.

pub mod console;
pub mod stdlib;

pub use console::{BufferedConsole, Console, StdConsole};

use crate::error::Result;
use crate::runtime::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool trait - every builtin implements this
pub trait Tool: Send + Sync {
    /// Name the program calls the tool by
    fn name(&self) -> &str;

    /// Tool description
    fn description(&self) -> &str;

    /// Execute the tool on forced arguments
    fn execute(&self, args: &[Value], console: &mut dyn Console) -> Result<Value>;

    /// Maximum number of arguments accepted
    fn max_args(&self) -> Option<usize> {
        None // None means variadic
    }
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create new registry with the standard builtins
    pub fn new() -> Self {
        let mut registry = ToolRegistry::empty();
        stdlib::register_all(&mut registry);
        registry
    }

    /// Create empty registry (for testing)
    pub fn empty() -> Self {
        ToolRegistry {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get tool by exact name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
