//! Expression nodes of a parsed statement
//!
//! The `Display` implementation renders a node to its script-language form.
//! That rendering is used both as the JSON key of an aggregation and as the
//! script payload sent to the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Column or document field reference: `region`, `user.name`
    Field(String),

    /// Constant value
    Literal(Literal),

    /// Function call: `avg(price)`, `date_histogram(ts, 1d)`
    Call {
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
    },

    /// Binary operation: `price * quantity`
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Unary operation: `!active`, `-delta`
    Unary { op: UnaryOp, expr: Box<Expr> },

    /// Parenthesized expression
    Paren(Box<Expr>),

    /// `*`
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Duration or calendar interval such as `1d` or `30m`
    Duration(String),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Neg,
}

impl Expr {
    /// Create a field reference
    pub fn field(name: impl Into<String>) -> Self {
        Expr::Field(name.into())
    }

    /// Create a function call
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    /// Create an integer literal
    pub fn integer(value: i64) -> Self {
        Expr::Literal(Literal::Integer(value))
    }

    /// Create a float literal
    pub fn float(value: f64) -> Self {
        Expr::Literal(Literal::Float(value))
    }

    /// Create a boolean literal
    pub fn boolean(value: bool) -> Self {
        Expr::Literal(Literal::Boolean(value))
    }

    /// Create a duration literal
    pub fn duration(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::Duration(value.into()))
    }

    /// Create a binary expression
    pub fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Negate with `!`
    pub fn negate(self) -> Self {
        Expr::Unary {
            op: UnaryOp::Not,
            expr: Box::new(self),
        }
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Expr::Paren(Box::new(self))
    }

    /// Combine with `&&`
    pub fn and(self, other: Expr) -> Self {
        Expr::binary(self, BinaryOp::And, other)
    }

    /// Name and arguments if this node is a function call
    pub fn as_call(&self) -> Option<(&str, &[Expr])> {
        match self {
            Expr::Call { name, args } => Some((name.as_str(), args.as_slice())),
            _ => None,
        }
    }

    /// Render to the script-language string
    pub fn to_script(&self) -> String {
        self.to_string()
    }
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Field(name) => write_field(f, name),
            Expr::Literal(lit) => fmt::Display::fmt(lit, f),
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(arg, f)?;
                }
                f.write_str(")")
            }
            Expr::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op.symbol(), rhs),
            Expr::Unary { op, expr } => write!(f, "{}{}", op.symbol(), expr),
            Expr::Paren(expr) => write!(f, "({})", expr),
            Expr::Wildcard => f.write_str("*"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{:?}", n),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Duration(d) => f.write_str(d),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_identifier(name) {
        f.write_str(name)
    } else {
        write!(f, "\"{}\"", name.replace('"', "\\\""))
    }
}

/// Identifiers may contain `.` for nested paths and `@` for metadata fields
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '@' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '@')
}
