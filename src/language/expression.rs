use serde::{Deserialize, Serialize};

use super::{OperatorId, operator};

/// Index of a free variable; its display name derives from the index.
pub type SymbolId = usize;

/// An expression tree over literals, symbol references and binary
/// operations.
///
/// `Binary` owns both operands exclusively: expressions are trees, never
/// DAGs, and are immutable once constructed.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Expression {
    /// A literal constant.
    Literal(f64),
    /// A reference to the `id`-th free variable.
    Symbol(SymbolId),
    /// A binary operation applied to two owned subexpressions.
    Binary {
        op: OperatorId,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub const NICE_SYMBOLS: [&str; 3] = ["x", "y", "z"];

    pub fn symbol_name(id: SymbolId) -> String {
        if id < Self::NICE_SYMBOLS.len() {
            String::from(Self::NICE_SYMBOLS[id])
        } else {
            format!("x{}", id)
        }
    }

    /// Builds a binary node from two already-owned operands.
    pub fn binary(left: Expression, op: OperatorId, right: Expression) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Whether this node is exactly the literal `value`.
    pub fn is_literal_value(&self, value: f64) -> bool {
        matches!(self, Self::Literal(v) if *v == value)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{value:?}"),
            Expression::Symbol(id) => write!(f, "{}", Expression::symbol_name(*id)),
            Expression::Binary { op, left, right } => {
                write!(f, "({left}){}({right})", operator(*op))
            }
        }
    }
}
