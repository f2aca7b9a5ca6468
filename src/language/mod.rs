use std::fmt;

pub mod expression;

/// Index of an operator in the [`OPERATORS`] registry.
pub type OperatorId = usize;

type ApplyFn = fn(f64, f64) -> Option<f64>;

/// A binary arithmetic operator: a display symbol, a precedence, and a
/// fallible evaluation function.
///
/// Precedence is informational only; expressions are trees, so neither
/// generation nor evaluation order depends on it.
pub struct Operator {
    symbol: &'static str,
    precedence: u8,
    apply: ApplyFn,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn precedence(&self) -> u8 {
        self.precedence
    }

    /// Applies the operator to two values. `None` signals an arithmetic
    /// fault (division by zero).
    pub fn apply(&self, left: f64, right: f64) -> Option<f64> {
        (self.apply)(left, right)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

pub const ADD: OperatorId = 0;
pub const SUB: OperatorId = 1;
pub const MUL: OperatorId = 2;
pub const DIV: OperatorId = 3;

/// The fixed operator vocabulary, indexed by [`OperatorId`].
pub static OPERATORS: [Operator; 4] = [
    Operator { symbol: "+", precedence: 0, apply: add },
    Operator { symbol: "-", precedence: 0, apply: sub },
    Operator { symbol: "*", precedence: 1, apply: mul },
    Operator { symbol: "/", precedence: 1, apply: div },
];

fn add(left: f64, right: f64) -> Option<f64> {
    Some(left + right)
}

fn sub(left: f64, right: f64) -> Option<f64> {
    Some(left - right)
}

fn mul(left: f64, right: f64) -> Option<f64> {
    Some(left * right)
}

fn div(left: f64, right: f64) -> Option<f64> {
    if right == 0.0 { None } else { Some(left / right) }
}

/// Returns the operator registered under `id`.
pub fn operator(id: OperatorId) -> &'static Operator {
    &OPERATORS[id]
}

pub fn get_id(symbol: &str) -> OperatorId {
    try_get_id(symbol)
        .unwrap_or_else(|| panic!("Operator not present in the registry: {symbol}"))
}

pub fn try_get_id(symbol: &str) -> Option<OperatorId> {
    OPERATORS.iter().position(|operator| symbol == operator.symbol)
}
