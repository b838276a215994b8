use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::runtime::Thunk;

/// Scope stack: nested binding frames, innermost last
///
/// Name resolution walks outward from the innermost frame and stops after the
/// nearest function-boundary frame, so a callee never sees its caller's locals.
#[derive(Debug, Default)]
pub struct Environment {
    /// Stack of nested frames
    frames: Vec<Frame>,
}

/// Single frame in the environment
#[derive(Debug, Default)]
struct Frame {
    /// Variables bound in this frame
    bindings: HashMap<String, Thunk>,
    /// True for the frame pushed by a function call
    is_function_boundary: bool,
    /// Parameter names that may still be redeclared once with `var`
    protected_names: HashSet<String>,
}

impl Environment {
    /// Creates an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a block scope (`if`, `for`, `try` and `catch` bodies)
    pub fn push_block(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Exits the innermost block scope
    pub fn pop_block(&mut self) {
        let frame = self.frames.pop();
        debug_assert!(frame.is_some_and(|f| !f.is_function_boundary));
    }

    /// Enters a function scope binding `params` positionally to `args`
    pub fn push_call(&mut self, params: &[String], args: Vec<Thunk>) {
        self.frames.push(Frame {
            bindings: params.iter().cloned().zip(args).collect(),
            is_function_boundary: true,
            protected_names: params.iter().cloned().collect(),
        });
    }

    /// Exits the innermost function scope
    pub fn pop_call(&mut self) {
        let frame = self.frames.pop();
        debug_assert!(frame.is_some_and(|f| f.is_function_boundary));
    }

    /// Declares `name` in the innermost frame, bound to `nil`
    ///
    /// Redeclaring a name already bound in the same frame is an error, except
    /// that each parameter may be redeclared once.
    pub fn declare(&mut self, name: &str) -> Result<()> {
        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| Error::name(format!("cannot declare `{}` outside a function", name)))?;

        let protected = frame.protected_names.remove(name);
        if frame.bindings.contains_key(name) && !protected {
            return Err(Error::name(format!("variable `{}` is already defined", name)));
        }
        frame.bindings.insert(name.to_string(), Thunk::nil());
        Ok(())
    }

    /// Returns the thunk bound to `name`, if visible
    pub fn resolve(&self, name: &str) -> Option<Thunk> {
        for frame in self.frames.iter().rev() {
            if let Some(thunk) = frame.bindings.get(name) {
                return Some(thunk.clone());
            }
            if frame.is_function_boundary {
                break;
            }
        }
        None
    }

    /// Rebinds an existing, visible variable
    pub fn assign(&mut self, name: &str, thunk: Thunk) -> Result<()> {
        for frame in self.frames.iter_mut().rev() {
            if let Some(slot) = frame.bindings.get_mut(name) {
                *slot = thunk;
                return Ok(());
            }
            if frame.is_function_boundary {
                break;
            }
        }
        Err(Error::name(format!("variable `{}` is not defined", name)))
    }

    /// Returns the current frame depth
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
