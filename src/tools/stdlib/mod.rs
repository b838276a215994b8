//! Standard library builtins for Brewin

pub mod io_basic;

use crate::tools::ToolRegistry;

/// Register all standard library builtins
pub fn register_all(registry: &mut ToolRegistry) {
    io_basic::register(registry);
}
