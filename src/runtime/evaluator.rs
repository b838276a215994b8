use crate::error::{Error, Result};
use crate::parser::{Assignment, BinaryOp, Expression, Program, Statement};
use crate::runtime::operators::{evaluate_binary, evaluate_unary, logical_operand};
use crate::runtime::outcome::forced;
use crate::runtime::stack::ensure_sufficient_stack;
use crate::runtime::{
    Environment, Forced, FunctionTable, InterpreterConfig, Node, Outcome, Thunk, Value,
};
use crate::tools::{Console, Tool, ToolRegistry};
use std::sync::Arc;

/// Name of the function a program starts in
pub const ENTRY_POINT: &str = "main";

/// Call-by-need tree-walking interpreter
///
/// Statements run eagerly in textual order; expressions bound to variables
/// or passed as arguments are deferred into [`Thunk`]s and only computed
/// when something needs a concrete value:
/// - conditions of `if` and `for`
/// - operands of operators
/// - arguments of builtins
/// - the target of `raise`
/// - the result of a call whose value is consumed
pub struct Interpreter<'c> {
    /// Function definitions, fixed for the whole run
    functions: FunctionTable,
    /// Scope stack
    env: Environment,
    /// Builtins, resolved before user functions
    builtins: ToolRegistry,
    /// Host console used by the builtins
    console: &'c mut dyn Console,
    /// Runtime configuration
    config: InterpreterConfig,
    /// Nesting of active user function calls
    call_depth: usize,
}

impl<'c> Interpreter<'c> {
    /// Creates an interpreter for `program` with the default configuration
    pub fn new(program: &Program, console: &'c mut dyn Console) -> Self {
        Self::with_config(program, console, InterpreterConfig::default())
    }

    /// Creates an interpreter with an explicit configuration
    pub fn with_config(
        program: &Program,
        console: &'c mut dyn Console,
        config: InterpreterConfig,
    ) -> Self {
        let functions = FunctionTable::from_program(program);
        tracing::debug!(functions = functions.len(), "interpreter ready");
        Interpreter {
            functions,
            env: Environment::new(),
            builtins: ToolRegistry::new(),
            console,
            config,
            call_depth: 0,
        }
    }

    /// Runs the program: calls `main` with no arguments
    ///
    /// An exception that escapes `main` becomes [`Error::UncaughtException`].
    pub fn run(&mut self) -> Result<()> {
        if self.functions.get(ENTRY_POINT, 0).is_none() {
            return Err(Error::name(format!(
                "no `{}` function taking zero arguments",
                ENTRY_POINT
            )));
        }

        match self.call_function(ENTRY_POINT, Vec::new())? {
            Forced::Value(_) => Ok(()),
            Forced::Raised(name) => {
                tracing::debug!(exception = %name, "exception escaped main");
                Err(Error::UncaughtException { name })
            }
        }
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    /// Executes statements in order, stopping at the first `Return` or `Raised`
    pub fn exec_block(&mut self, statements: &[Statement]) -> Result<Outcome> {
        for statement in statements {
            let outcome = self.exec_statement(statement)?;
            if outcome.is_abrupt() {
                return Ok(outcome);
            }
        }
        Ok(Outcome::Continue)
    }

    /// Runs `body` inside a fresh block frame, popping it on every exit path
    fn with_block(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<Outcome>,
    ) -> Result<Outcome> {
        self.env.push_block();
        let outcome = body(self);
        self.env.pop_block();
        outcome
    }

    fn exec_statement(&mut self, statement: &Statement) -> Result<Outcome> {
        if self.config.trace_output {
            tracing::debug!(
                kind = statement.kind_name(),
                depth = self.env.depth(),
                "exec"
            );
        }

        match statement {
            Statement::VarDef { name } => {
                self.env.declare(name)?;
                Ok(Outcome::Continue)
            }

            Statement::Assign(assignment) => {
                self.exec_assign(assignment)?;
                Ok(Outcome::Continue)
            }

            Statement::Call { name, args } => {
                let args = args.iter().map(|arg| self.defer(arg)).collect();
                // Only a raise crosses the call boundary; the value is dropped.
                forced!(self.call_function(name, args)?, Outcome::Raised);
                Ok(Outcome::Continue)
            }

            Statement::If {
                condition,
                statements,
                else_statements,
            } => {
                let value = forced!(self.force_expression(condition)?, Outcome::Raised);
                if expect_condition(value, "if")? {
                    self.with_block(|it| it.exec_block(statements))
                } else if let Some(else_statements) = else_statements {
                    self.with_block(|it| it.exec_block(else_statements))
                } else {
                    Ok(Outcome::Continue)
                }
            }

            Statement::For {
                init,
                condition,
                update,
                statements,
            } => {
                self.exec_assign(init)?;
                loop {
                    let value = forced!(self.force_expression(condition)?, Outcome::Raised);
                    if !expect_condition(value, "for")? {
                        return Ok(Outcome::Continue);
                    }
                    let outcome = self.with_block(|it| it.exec_block(statements))?;
                    if outcome.is_abrupt() {
                        return Ok(outcome);
                    }
                    self.exec_assign(update)?;
                }
            }

            Statement::Try {
                statements,
                catchers,
            } => {
                let outcome = self.with_block(|it| it.exec_block(statements))?;
                let Outcome::Raised(name) = outcome else {
                    return Ok(outcome);
                };

                match catchers.iter().find(|c| c.exception_type == name) {
                    Some(catcher) => {
                        tracing::debug!(exception = %name, "caught");
                        self.with_block(|it| it.exec_block(&catcher.statements))
                    }
                    None => Ok(Outcome::Raised(name)),
                }
            }

            Statement::Return { expression } => {
                // Computed inside the callee, under any enclosing `try`.
                let value = match expression {
                    Some(expr) => forced!(self.force_expression(expr)?, Outcome::Raised),
                    None => Value::Nil,
                };
                Ok(Outcome::Return(value))
            }

            Statement::Raise { exception_type } => {
                let value = forced!(self.force_expression(exception_type)?, Outcome::Raised);
                match value {
                    Value::String(name) => {
                        tracing::debug!(exception = %name, "raise");
                        Ok(Outcome::Raised(name))
                    }
                    other => Err(Error::type_error(format!(
                        "raise expects a string, got {}",
                        other.type_name()
                    ))),
                }
            }
        }
    }

    /// Lazy assignment: binds a deferred thunk, computes nothing
    fn exec_assign(&mut self, assignment: &Assignment) -> Result<()> {
        let thunk = self.defer(&assignment.expression);
        self.env.assign(&assignment.name, thunk)
    }

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================

    /// Builds a thunk for `expr` without computing anything
    ///
    /// Variable references resolve to the thunk currently bound to the name,
    /// shared rather than copied; a name that is not in scope becomes a node
    /// that fails with a name error when forced.
    pub fn defer(&self, expr: &Expression) -> Thunk {
        match expr {
            Expression::Int { value } => Thunk::literal(Value::Int(*value)),
            Expression::String { value } => Thunk::literal(Value::String(value.clone())),
            Expression::Bool { value } => Thunk::literal(Value::Bool(*value)),
            Expression::Nil => Thunk::nil(),
            Expression::Var { name } => self
                .env
                .resolve(name)
                .unwrap_or_else(|| Thunk::new(Node::Unresolved(name.clone()))),
            Expression::Call { name, args } => Thunk::new(Node::Call {
                name: name.clone(),
                args: args.iter().map(|arg| self.defer(arg)).collect(),
            }),
            Expression::Binary { op, op1, op2 } => Thunk::new(Node::Binary {
                op: *op,
                left: self.defer(op1),
                right: self.defer(op2),
            }),
            Expression::Unary { op, op1 } => Thunk::new(Node::Unary {
                op: *op,
                operand: self.defer(op1),
            }),
        }
    }

    /// Evaluates `expr` to a value now
    ///
    /// Forcing a variable memoizes into the variable's own thunk.
    pub fn force_expression(&mut self, expr: &Expression) -> Result<Forced> {
        let thunk = self.defer(expr);
        self.force(&thunk)
    }

    /// Forces a thunk, caching the value in place on success
    pub fn force(&mut self, thunk: &Thunk) -> Result<Forced> {
        if let Some(value) = thunk.cached() {
            return Ok(Forced::Value(value));
        }

        let node = thunk.node();
        let forced = ensure_sufficient_stack(|| self.force_node(node))?;
        if let Forced::Value(value) = &forced {
            thunk.memoize(value.clone());
        }
        Ok(forced)
    }

    fn force_node(&mut self, node: Node) -> Result<Forced> {
        match node {
            Node::Literal(value) => Ok(Forced::Value(value)),

            Node::Unresolved(name) => {
                Err(Error::name(format!("variable `{}` is not defined", name)))
            }

            Node::Call { name, args } => self.call_function(&name, args),

            Node::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                left,
                right,
            } => {
                let left = forced!(self.force(&left)?, Forced::Raised);
                let left = logical_operand(op, &left)?;
                match (op, left) {
                    (BinaryOp::And, false) => Ok(Forced::Value(Value::Bool(false))),
                    (BinaryOp::Or, true) => Ok(Forced::Value(Value::Bool(true))),
                    _ => {
                        let right = forced!(self.force(&right)?, Forced::Raised);
                        evaluate_binary(op, Value::Bool(left), right)
                    }
                }
            }

            Node::Binary { op, left, right } => {
                let left = forced!(self.force(&left)?, Forced::Raised);
                let right = forced!(self.force(&right)?, Forced::Raised);
                evaluate_binary(op, left, right)
            }

            Node::Unary { op, operand } => {
                let operand = forced!(self.force(&operand)?, Forced::Raised);
                evaluate_unary(op, operand).map(Forced::Value)
            }
        }
    }

    // =========================================================================
    // CALLS
    // =========================================================================

    /// Calls a builtin or user function with already-deferred arguments
    ///
    /// The body runs now and its `return` value is already computed; falling
    /// off the end of the body yields `nil`.
    pub fn call_function(&mut self, name: &str, args: Vec<Thunk>) -> Result<Forced> {
        if let Some(tool) = self.builtins.get(name) {
            return self.call_builtin(tool, &args);
        }

        let func = self.functions.get(name, args.len()).ok_or_else(|| {
            Error::name(format!(
                "no function `{}` taking {} argument(s)",
                name,
                args.len()
            ))
        })?;

        if self.call_depth >= self.config.max_call_depth {
            return Err(Error::CallDepthExceeded {
                limit: self.config.max_call_depth,
            });
        }

        tracing::trace!(function = name, arity = args.len(), "call");
        self.call_depth += 1;
        self.env.push_call(&func.params, args);
        let outcome = ensure_sufficient_stack(|| self.exec_block(&func.statements));
        self.env.pop_call();
        self.call_depth -= 1;

        match outcome? {
            Outcome::Continue => {
                tracing::trace!(function = name, "call fell through");
                Ok(Forced::Value(Value::Nil))
            }
            Outcome::Return(value) => {
                tracing::trace!(function = name, "call returned");
                Ok(Forced::Value(value))
            }
            Outcome::Raised(exception) => {
                tracing::trace!(function = name, exception = %exception, "call raised");
                Ok(Forced::Raised(exception))
            }
        }
    }

    fn call_builtin(&mut self, tool: Arc<dyn Tool>, args: &[Thunk]) -> Result<Forced> {
        if let Some(max) = tool.max_args() {
            if args.len() > max {
                return Err(Error::name(format!(
                    "{} takes at most {} argument(s), got {}",
                    tool.name(),
                    max,
                    args.len()
                )));
            }
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(forced!(self.force(arg)?, Forced::Raised));
        }
        tool.execute(&values, &mut *self.console).map(Forced::Value)
    }
}

/// Condition of `if`/`for`: must be a bool
fn expect_condition(value: Value, construct: &str) -> Result<bool> {
    value.as_bool().ok_or_else(|| {
        Error::type_error(format!(
            "{} condition must be a bool, got {}",
            construct,
            value.type_name()
        ))
    })
}
