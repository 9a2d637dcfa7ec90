//! Argument source expressions and source locations.
//!
//! The engine inspects the *syntax* of some arguments, not just their
//! types: a shape literal's length, a dtype name, a literal `True` for
//! `keepdims`. [`Expr`] models the literal shapes the host reports for
//! call arguments; anything it did not model arrives as [`Expr::Opaque`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// The syntactic shape of an actual argument expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// An integer literal, e.g. `3`.
    IntLit(i64),
    /// A boolean literal, `True` or `False`.
    BoolLit(bool),
    /// A string literal, e.g. `'int'`.
    StrLit(String),
    /// A bare name, e.g. `int`.
    Name(String),
    /// The last component of a dotted attribute access, e.g. `int32`
    /// from `np.int32`.
    Attr(String),
    /// A unary-minus-prefixed expression, e.g. `-1`.
    Neg(Box<Expr>),
    /// A tuple literal.
    TupleLit(Vec<Expr>),
    /// A list literal.
    ListLit(Vec<Expr>),
    /// Any expression shape the host did not classify.
    Opaque,
}

impl Expr {
    pub fn neg(inner: Expr) -> Expr {
        Expr::Neg(Box::new(inner))
    }

    pub fn name(s: &str) -> Expr {
        Expr::Name(s.to_string())
    }

    pub fn str_lit(s: &str) -> Expr {
        Expr::StrLit(s.to_string())
    }

    pub fn attr(s: &str) -> Expr {
        Expr::Attr(s.to_string())
    }
}

/// Source location of a call expression, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(line: u32, column: u32) -> Span {
        Span { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
