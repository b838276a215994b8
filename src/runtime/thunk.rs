//! Shared, self-memoizing expression nodes.
//!
//! A [`Thunk`] is a reference-counted handle to a [`Node`]. Deferring an
//! expression builds a small graph of thunks; a variable reference inside it is
//! not copied but points at the very thunk currently bound to that variable.
//! Forcing a node overwrites it in place with [`Node::Literal`], so every
//! binding and every enclosing expression that shares it sees the cached value.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::parser::{BinaryOp, UnaryOp};
use crate::runtime::Value;

/// A node of the deferred-expression graph
#[derive(Debug, Clone)]
pub enum Node {
    /// Already a value (either a literal or a memoized result)
    Literal(Value),
    /// Variable that was not in scope when the expression was deferred
    Unresolved(String),
    /// Pending function call with deferred arguments
    Call {
        /// Callee name
        name: String,
        /// Deferred arguments
        args: Vec<Thunk>,
    },
    /// Pending binary operation
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Thunk,
        /// Right operand
        right: Thunk,
    },
    /// Pending unary operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Thunk,
    },
}

impl Node {
    fn into_children(self) -> Vec<Thunk> {
        match self {
            Node::Literal(_) | Node::Unresolved(_) => Vec::new(),
            Node::Call { args, .. } => args,
            Node::Binary { left, right, .. } => vec![left, right],
            Node::Unary { operand, .. } => vec![operand],
        }
    }
}

/// Shared handle to a node; cloning the handle aliases the node
#[derive(Clone)]
pub struct Thunk(Rc<RefCell<Node>>);

impl Thunk {
    /// Wraps a node in a fresh thunk
    pub fn new(node: Node) -> Self {
        Thunk(Rc::new(RefCell::new(node)))
    }

    /// Creates an already-forced thunk
    pub fn literal(value: Value) -> Self {
        Thunk::new(Node::Literal(value))
    }

    /// Thunk holding `nil`, the initial value of a declared variable
    pub fn nil() -> Self {
        Thunk::literal(Value::Nil)
    }

    /// Returns the value if this thunk has already been forced
    pub fn cached(&self) -> Option<Value> {
        match &*self.0.borrow() {
            Node::Literal(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Shallow copy of the current node; child thunks stay shared
    pub fn node(&self) -> Node {
        self.0.borrow().clone()
    }

    /// Replaces the node with its computed value
    pub fn memoize(&self, value: Value) {
        *self.0.borrow_mut() = Node::Literal(value);
    }

    /// True if both handles point at the same node
    #[cfg(test)]
    pub fn ptr_eq(&self, other: &Thunk) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn detach(cell: &Rc<RefCell<Node>>, pending: &mut Vec<Node>) {
    if Rc::strong_count(cell) != 1 {
        return;
    }
    if let Ok(mut node) = cell.try_borrow_mut() {
        if !matches!(*node, Node::Literal(_)) {
            pending.push(std::mem::replace(&mut *node, Node::Literal(Value::Nil)));
        }
    }
}

// Long unforced chains (`x = x + 1` in a loop) would otherwise be torn down
// recursively, one stack frame per link.
impl Drop for Thunk {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&self.0, &mut pending);
        while let Some(node) = pending.pop() {
            for child in node.into_children() {
                detach(&child.0, &mut pending);
            }
        }
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &*self.0.borrow() {
            Node::Literal(value) => write!(f, "Thunk({:?})", value),
            Node::Unresolved(name) => write!(f, "Thunk(<unresolved {}>)", name),
            Node::Call { name, args } => write!(f, "Thunk(<call {}/{}>)", name, args.len()),
            Node::Binary { op, .. } => write!(f, "Thunk(<{}>)", op),
            Node::Unary { op, .. } => write!(f, "Thunk(<unary {}>)", op),
        }
    }
}
