use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete Brewin program: a flat list of function definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Function definitions, in source order
    pub functions: Vec<FunctionDef>,
}

/// Function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name
    pub name: String,
    /// Ordered parameter names
    #[serde(default)]
    pub params: Vec<String>,
    /// Function body
    #[serde(default)]
    pub statements: Vec<Statement>,
}

/// `name = expression`, used both as a statement and as `for` init/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Target variable (must already be declared)
    pub name: String,
    /// Right-hand side, bound lazily
    pub expression: Expression,
}

/// One `catch "name" { ... }` clause of a `try` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catcher {
    /// Exception name this clause handles
    pub exception_type: String,
    /// Handler body
    #[serde(default)]
    pub statements: Vec<Statement>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// Variable declaration: `var x;`
    #[serde(rename = "vardef")]
    VarDef {
        /// Declared name
        name: String,
    },

    /// Lazy assignment: `x = expr;`
    Assign(Assignment),

    /// Function call whose value is discarded: `f(a, b);`
    Call {
        /// Callee name
        name: String,
        /// Argument expressions
        #[serde(default)]
        args: Vec<Expression>,
    },

    /// If statement
    If {
        /// Condition expression (must be a boolean)
        condition: Expression,
        /// Statements to execute if condition is true
        #[serde(default)]
        statements: Vec<Statement>,
        /// Optional statements to execute if condition is false
        #[serde(default)]
        else_statements: Option<Vec<Statement>>,
    },

    /// C-style for loop: `for (init; condition; update) { ... }`
    For {
        /// Runs once before the first condition check
        init: Assignment,
        /// Loop condition expression
        condition: Expression,
        /// Runs after every body that completes normally
        update: Assignment,
        /// Loop body
        #[serde(default)]
        statements: Vec<Statement>,
    },

    /// Try-catch block
    Try {
        /// Protected statements
        #[serde(default)]
        statements: Vec<Statement>,
        /// Catch clauses, scanned in order
        #[serde(default)]
        catchers: Vec<Catcher>,
    },

    /// Return statement
    Return {
        /// Optional value to return
        #[serde(default)]
        expression: Option<Expression>,
    },

    /// Raise statement: the expression must produce the exception name
    Raise {
        /// Exception name expression
        exception_type: Expression,
    },
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// Integer literal
    Int {
        /// Literal value
        value: i64,
    },
    /// String literal
    String {
        /// Literal value
        value: String,
    },
    /// Boolean literal
    Bool {
        /// Literal value
        value: bool,
    },
    /// `nil`
    Nil,

    /// Variable reference
    Var {
        /// Variable name
        name: String,
    },

    /// Function call
    Call {
        /// Callee name
        name: String,
        /// Argument expressions
        #[serde(default)]
        args: Vec<Expression>,
    },

    /// Binary operation
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        op1: Box<Expression>,
        /// Right operand
        op2: Box<Expression>,
    },

    /// Unary operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        op1: Box<Expression>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    /// Addition or string concatenation (+)
    #[serde(rename = "+")]
    Add,
    /// Subtraction operator (-)
    #[serde(rename = "-")]
    Sub,
    /// Multiplication operator (*)
    #[serde(rename = "*")]
    Mul,
    /// Floor division operator (/)
    #[serde(rename = "/")]
    Div,

    // Comparison
    /// Equality operator (==)
    #[serde(rename = "==")]
    Eq,
    /// Inequality operator (!=)
    #[serde(rename = "!=")]
    NotEq,
    /// Less than operator (<)
    #[serde(rename = "<")]
    Lt,
    /// Greater than operator (>)
    #[serde(rename = ">")]
    Gt,
    /// Less than or equal operator (<=)
    #[serde(rename = "<=")]
    LtEq,
    /// Greater than or equal operator (>=)
    #[serde(rename = ">=")]
    GtEq,

    // Logical
    /// Short-circuit AND (&&)
    #[serde(rename = "&&")]
    And,
    /// Short-circuit OR (||)
    #[serde(rename = "||")]
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Integer negation (-x)
    #[serde(rename = "neg")]
    Neg,
    /// Logical NOT operator (!x)
    #[serde(rename = "!")]
    Not,
}

impl FunctionDef {
    /// Creates a function definition
    pub fn new(name: impl Into<String>, params: &[&str], statements: Vec<Statement>) -> Self {
        FunctionDef {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
            statements,
        }
    }
}

impl Assignment {
    /// Creates an assignment
    pub fn new(name: impl Into<String>, expression: Expression) -> Self {
        Assignment {
            name: name.into(),
            expression,
        }
    }
}

impl Statement {
    /// `var name;`
    pub fn vardef(name: impl Into<String>) -> Self {
        Statement::VarDef { name: name.into() }
    }

    /// `name = expression;`
    pub fn assign(name: impl Into<String>, expression: Expression) -> Self {
        Statement::Assign(Assignment::new(name, expression))
    }

    /// `name(args...);`
    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Statement::Call {
            name: name.into(),
            args,
        }
    }

    /// `return expression;` / `return;`
    pub fn ret(expression: Option<Expression>) -> Self {
        Statement::Return { expression }
    }

    /// `raise expression;`
    pub fn raise(exception_type: Expression) -> Self {
        Statement::Raise { exception_type }
    }

    /// Short name of the statement kind, as used in traces
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::VarDef { .. } => "vardef",
            Statement::Assign(_) => "assign",
            Statement::Call { .. } => "call",
            Statement::If { .. } => "if",
            Statement::For { .. } => "for",
            Statement::Try { .. } => "try",
            Statement::Return { .. } => "return",
            Statement::Raise { .. } => "raise",
        }
    }
}

impl Expression {
    /// Integer literal
    pub fn int(value: i64) -> Self {
        Expression::Int { value }
    }

    /// String literal
    pub fn string(value: impl Into<String>) -> Self {
        Expression::String {
            value: value.into(),
        }
    }

    /// Boolean literal
    pub fn bool(value: bool) -> Self {
        Expression::Bool { value }
    }

    /// Variable reference
    pub fn var(name: impl Into<String>) -> Self {
        Expression::Var { name: name.into() }
    }

    /// Function call
    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.into(),
            args,
        }
    }

    /// Binary operation
    pub fn binary(op: BinaryOp, op1: Expression, op2: Expression) -> Self {
        Expression::Binary {
            op,
            op1: Box::new(op1),
            op2: Box::new(op2),
        }
    }

    /// Unary operation
    pub fn unary(op: UnaryOp, op1: Expression) -> Self {
        Expression::Unary {
            op,
            op1: Box::new(op1),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "!="),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::LtEq => write!(f, "<="),
            BinaryOp::GtEq => write!(f, ">="),
            BinaryOp::And => write!(f, "&&"),
            BinaryOp::Or => write!(f, "||"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}
