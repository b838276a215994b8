use std::collections::HashMap;
use std::rc::Rc;

use crate::parser::{FunctionDef, Program};

/// Immutable function table keyed by `(name, arity)`
///
/// Arity is part of the key, so functions may be overloaded by parameter
/// count; a call resolves statically on its argument count.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: HashMap<(String, usize), Rc<FunctionDef>>,
}

impl FunctionTable {
    /// Builds the table from a program's definitions
    ///
    /// A later definition with the same name and arity replaces an earlier one.
    pub fn from_program(program: &Program) -> Self {
        let mut functions = HashMap::new();
        for func in &program.functions {
            let key = (func.name.clone(), func.params.len());
            if functions.insert(key, Rc::new(func.clone())).is_some() {
                tracing::warn!(
                    function = %func.name,
                    arity = func.params.len(),
                    "duplicate function definition; the later one wins"
                );
            }
        }
        FunctionTable { functions }
    }

    /// Looks up a function by name and arity
    pub fn get(&self, name: &str, arity: usize) -> Option<Rc<FunctionDef>> {
        self.functions.get(&(name.to_string(), arity)).cloned()
    }

    /// Number of distinct `(name, arity)` entries
    pub fn len(&self) -> usize {
        self.functions.len()
    }
}
