//! Lazy, infinite generation of expressions of growing complexity.

use std::collections::VecDeque;

use crate::language::expression::Expression;
use crate::language::{ADD, DIV, MUL, OPERATORS, OperatorId, SUB};
use crate::pairing::DiagonalPairs;

type NestedPairs = DiagonalPairs<fn() -> ExpressionGenerator, ExpressionGenerator>;

/// Which half of a production step runs next.
#[derive(Clone, Copy, Debug)]
enum Phase {
    /// Queue the step's literals and symbols.
    Atoms,
    /// Draw one operand pair and queue its surviving combinations.
    Combinations,
}

/// An infinite producer of expressions of non-decreasing structural
/// complexity.
///
/// The first steps contribute the literals `0, 1, -1, 2, -2, 3, -3` and
/// the symbols `x, y, z`. Every step additionally draws one operand pair
/// from a nested [`DiagonalPairs`] over two fresh instances of this same
/// generator and combines it with each operator, so later expressions
/// embed earlier ones as operands at unbounded depth. Combinations that a
/// degeneracy rule marks as trivial (`x+0`, `x*1`, `x-x`, `x/1`, any zero
/// product or quotient) are dropped before emission.
///
/// Instances are restartable only by construction; `step`, the pending
/// output queue and the nested pairing state grow without bound, which is
/// intended for an open-ended search.
pub struct ExpressionGenerator {
    step: usize,
    phase: Phase,
    pending: VecDeque<Expression>,
    pairs: Option<Box<NestedPairs>>,
}

impl ExpressionGenerator {
    /// Free symbols available to generated expressions.
    pub const SYMBOL_COUNT: usize = 3;
    /// Literal magnitudes strictly below this bound are emitted.
    const LITERAL_BOUND: usize = 4;

    pub fn new() -> Self {
        Self {
            step: 0,
            phase: Phase::Atoms,
            pending: VecDeque::new(),
            pairs: None,
        }
    }

    /// Queues the literals and symbols of the current step, then advances
    /// the step counter.
    fn queue_atoms(&mut self) {
        let step = self.step;
        if step < Self::LITERAL_BOUND {
            self.pending.push_back(Expression::Literal(step as f64));
            if step > 0 {
                self.pending.push_back(Expression::Literal(-(step as f64)));
            }
        }
        if step < Self::SYMBOL_COUNT {
            self.pending.push_back(Expression::Symbol(step));
        }
        self.step += 1;
        self.phase = Phase::Combinations;
    }

    /// Draws one operand pair from the nested pairing and queues every
    /// combination that survives the filters (possibly none).
    fn queue_combinations(&mut self) {
        let pairs = self
            .pairs
            .get_or_insert_with(|| Box::new(DiagonalPairs::new(Self::new as fn() -> Self)));
        if let Some((left, right)) = pairs.next() {
            self.combine(left, right);
        }
        self.phase = Phase::Atoms;
    }

    fn combine(&mut self, left: Expression, right: Expression) {
        // Two literal operands would constant-fold; no operator applies.
        if left.is_literal() && right.is_literal() {
            return;
        }
        for op in 0..OPERATORS.len() {
            if Self::is_degenerate(op, &left, &right) {
                continue;
            }
            // Division by one is suppressed for this operator only.
            if op == DIV && right.is_literal_value(1.0) {
                continue;
            }
            self.pending
                .push_back(Expression::binary(left.clone(), op, right.clone()));
        }
    }

    /// Whether combining the operands with `op` is trivial in either
    /// orientation: a zero operand under any operator, a unit operand
    /// under multiplication, equal operands under subtraction.
    ///
    /// The zero rule also drops `0/x`, which is defined (and zero) for
    /// `x != 0`; that combination is deliberately treated like the rest.
    fn is_degenerate(op: OperatorId, left: &Expression, right: &Expression) -> bool {
        [(left, right), (right, left)].into_iter().any(|(l, r)| {
            (l.is_literal_value(0.0) && (op == ADD || op == SUB))
                || (l.is_literal_value(1.0) && op == MUL)
                || (l.is_literal_value(0.0) && (op == MUL || op == DIV))
                || (l == r && op == SUB)
        })
    }
}

impl Default for ExpressionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ExpressionGenerator {
    type Item = Expression;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(expression) = self.pending.pop_front() {
                return Some(expression);
            }
            // A production step may queue nothing (a literal-only pair, or
            // every operator filtered); keep stepping until one does.
            match self.phase {
                Phase::Atoms => self.queue_atoms(),
                Phase::Combinations => self.queue_combinations(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExpressionGenerator;
    use crate::language::expression::Expression;
    use crate::language::{DIV, MUL, SUB};

    #[test]
    fn leading_productions() {
        let produced: Vec<String> = ExpressionGenerator::new()
            .take(16)
            .map(|expression| expression.to_string())
            .collect();
        assert_eq!(
            produced,
            vec![
                "0.0", "x", "1.0", "-1.0", "y", "2.0", "-2.0", "z", "3.0", "-3.0", "(x)+(x)",
                "(x)*(x)", "(x)/(x)", "(1.0)+(x)", "(1.0)-(x)", "(1.0)/(x)",
            ]
        );
    }

    #[test]
    fn restart_reproduces_the_stream() {
        let first: Vec<_> = ExpressionGenerator::new().take(60).collect();
        let second: Vec<_> = ExpressionGenerator::new().take(60).collect();
        assert_eq!(first, second);
    }

    fn assert_no_degenerate_nodes(expression: &Expression) {
        if let Expression::Binary { op, left, right } = expression {
            assert!(
                !(left.is_literal() && right.is_literal()),
                "constant-foldable node: {expression}"
            );
            if *op == SUB {
                assert_ne!(left, right, "self-subtraction: {expression}");
            }
            if *op == DIV {
                assert!(!right.is_literal_value(1.0), "division by one: {expression}");
            }
            for operand in [left, right] {
                assert!(
                    !operand.is_literal_value(0.0),
                    "zero operand survived filtering: {expression}"
                );
                if *op == MUL {
                    assert!(
                        !operand.is_literal_value(1.0),
                        "unit factor survived filtering: {expression}"
                    );
                }
            }
            assert_no_degenerate_nodes(left);
            assert_no_degenerate_nodes(right);
        }
    }

    #[test]
    fn no_degenerate_combinations() {
        for expression in ExpressionGenerator::new().take(500) {
            assert_no_degenerate_nodes(&expression);
        }
    }

    #[test]
    fn symbols_stay_in_range() {
        fn max_symbol(expression: &Expression) -> usize {
            match expression {
                Expression::Literal(_) => 0,
                Expression::Symbol(id) => *id,
                Expression::Binary { left, right, .. } => max_symbol(left).max(max_symbol(right)),
            }
        }

        for expression in ExpressionGenerator::new().take(500) {
            assert!(max_symbol(&expression) < ExpressionGenerator::SYMBOL_COUNT);
        }
    }
}
