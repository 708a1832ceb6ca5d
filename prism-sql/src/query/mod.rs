//! Parsed query model consumed by the translator

pub mod expr;
pub mod types;

pub use expr::{BinaryOp, Expr, Literal, UnaryOp};
pub use types::{Query, SortField};
