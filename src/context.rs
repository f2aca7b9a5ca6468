//! Assignment of concrete values to symbols, and expression evaluation.
//!
//! Evaluation never fails to its caller: every arithmetic fault is
//! absorbed at this boundary and reported as [`Value::Undefined`].

use itertools::Itertools;
use rand::Rng;

use crate::language::expression::{Expression, SymbolId};
use crate::language::operator;

/// The result of evaluating an expression under a context.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Value {
    /// A finite numeric result.
    Defined(f64),
    /// The evaluation hit an arithmetic fault.
    Undefined,
}

impl Value {
    pub fn is_defined(&self) -> bool {
        matches!(self, Value::Defined(_))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Defined(value) => write!(f, "{value:?}"),
            Value::Undefined => write!(f, "undefined"),
        }
    }
}

/// An assignment of concrete numeric values to symbol indices.
#[derive(Clone, PartialEq, Debug)]
pub struct Context {
    symbols: Vec<f64>,
}

impl Context {
    pub fn new(symbols: Vec<f64>) -> Self {
        Self { symbols }
    }

    /// Draws `count` symbol values independently and uniformly from the
    /// inclusive integer range `value_range`.
    pub fn random(count: usize, value_range: (i64, i64), rng: &mut impl Rng) -> Self {
        let (low, high) = value_range;
        Self {
            symbols: (0..count).map(|_| rng.gen_range(low..=high) as f64).collect(),
        }
    }

    pub fn get_symbol(&self, id: SymbolId) -> Option<f64> {
        self.symbols.get(id).copied()
    }

    /// Evaluates `expression` under this context. Any arithmetic fault in
    /// the recursion (out-of-range symbol index, division by zero, a
    /// non-finite intermediate) yields [`Value::Undefined`].
    pub fn evaluate(&self, expression: &Expression) -> Value {
        match self.try_evaluate(expression) {
            Some(value) if value.is_finite() => Value::Defined(value),
            _ => Value::Undefined,
        }
    }

    fn try_evaluate(&self, expression: &Expression) -> Option<f64> {
        match expression {
            Expression::Literal(value) => Some(*value),
            Expression::Symbol(id) => self.get_symbol(*id),
            Expression::Binary { op, left, right } => {
                let left = self.try_evaluate(left)?;
                let right = self.try_evaluate(right)?;
                operator(*op).apply(left, right)
            }
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Context({})",
            self.symbols
                .iter()
                .enumerate()
                .map(|(id, value)| format!("{}={}", Expression::symbol_name(id), value))
                .join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Context, Value};
    use crate::language::expression::Expression;
    use crate::language::{ADD, DIV, MUL, SUB};

    fn context() -> Context {
        Context::new(vec![10.0, 20.0, 30.0])
    }

    #[test]
    fn evaluate_leaves() {
        assert_eq!(Value::Defined(2.0), context().evaluate(&Expression::Literal(2.0)));
        assert_eq!(Value::Defined(20.0), context().evaluate(&Expression::Symbol(1)));
    }

    #[test]
    fn evaluate_addition() {
        let expr = Expression::binary(Expression::Symbol(0), ADD, Expression::Symbol(1));
        assert_eq!(Value::Defined(30.0), context().evaluate(&expr));
    }

    #[test]
    fn evaluate_nested() {
        let sum = Expression::binary(Expression::Symbol(0), ADD, Expression::Symbol(1));
        let expr = Expression::binary(sum, MUL, Expression::Symbol(2));
        assert_eq!(Value::Defined(900.0), context().evaluate(&expr));
    }

    #[test]
    fn division_by_zero_is_undefined() {
        let expr = Expression::binary(Expression::Literal(1.0), DIV, Expression::Literal(0.0));
        assert_eq!(Value::Undefined, context().evaluate(&expr));
    }

    #[test]
    fn division_by_vanishing_subexpression_is_undefined() {
        let zero = Expression::binary(Expression::Symbol(0), SUB, Expression::Symbol(0));
        let expr = Expression::binary(Expression::Symbol(1), DIV, zero);
        assert_eq!(Value::Undefined, context().evaluate(&expr));
    }

    #[test]
    fn out_of_range_symbol_is_undefined() {
        assert_eq!(Value::Undefined, context().evaluate(&Expression::Symbol(3)));
    }

    #[test]
    fn display() {
        assert_eq!("Context(x=10,y=20,z=30)", context().to_string());
        assert_eq!("undefined", Value::Undefined.to_string());
        assert_eq!("30.0", Value::Defined(30.0).to_string());
    }
}
