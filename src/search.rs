//! Sampled equivalence checking over the generated expression stream.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::context::Context;
use crate::equation::Equation;
use crate::generator::ExpressionGenerator;
use crate::language::expression::Expression;
use crate::pairing::DiagonalPairs;
use crate::report::Formattable;

type CandidatePairs = DiagonalPairs<fn() -> ExpressionGenerator, ExpressionGenerator>;

/// Tuning knobs of the identity search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Random contexts evaluated per candidate pair.
    pub samples: usize,
    /// Symbol values bound by each random context.
    pub symbol_count: usize,
    /// Inclusive integer range symbol values are drawn from.
    pub value_range: (i64, i64),
    /// Candidate pairs to examine before stopping; `None` never stops.
    pub max_pairs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            samples: 5,
            symbol_count: ExpressionGenerator::SYMBOL_COUNT,
            value_range: (0, 1000),
            max_pairs: None,
        }
    }
}

impl SearchConfig {
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_value_range(mut self, value_range: (i64, i64)) -> Self {
        self.value_range = value_range;
        self
    }

    pub fn with_max_pairs(mut self, max_pairs: Option<u64>) -> Self {
        self.max_pairs = max_pairs;
        self
    }
}

/// Whether both sides of `equation` agree on `config.samples` freshly
/// drawn random contexts.
///
/// Any disagreement (including defined on one side, undefined on the
/// other) rejects the equation immediately. Agreement alone is not
/// enough: at least one sample must compare two defined values, so a pair
/// that is undefined everywhere it was probed is rejected as
/// uninformative rather than accepted.
pub fn appears_equivalent(
    equation: &Equation,
    config: &SearchConfig,
    rng: &mut impl Rng,
) -> bool {
    let mut informative = false;
    for _ in 0..config.samples {
        let context = Context::random(config.symbol_count, config.value_range, rng);
        let left = context.evaluate(&equation.left);
        let right = context.evaluate(&equation.right);
        if left != right {
            return false;
        }
        if left.is_defined() {
            informative = true;
        }
    }
    informative
}

/// An accepted identity, together with the number of candidate pairs that
/// had been examined when it was found.
#[derive(Clone, PartialEq, Debug, Tabled, Serialize, Deserialize)]
pub struct Discovery {
    #[tabled(rename = "Left")]
    pub left: Expression,
    #[tabled(rename = "Right")]
    pub right: Expression,
    #[tabled(rename = "Pairs Examined")]
    pub pair: u64,
}

impl Discovery {
    pub fn equation(&self) -> Equation {
        Equation::new(self.left.clone(), self.right.clone())
    }
}

impl Formattable for Discovery {
    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.left.to_string(),
            self.right.to_string(),
            self.pair.to_string(),
        ]
    }

    fn csv_headers() -> Vec<&'static str> {
        vec!["Left", "Right", "Pairs Examined"]
    }
}

/// An iterator over accepted identities.
///
/// Drives a fresh top-level [`DiagonalPairs`] over [`ExpressionGenerator`]
/// (independent of any pairing nested inside generator instances),
/// discards structurally identical pairs, and yields every pair that
/// [`appears_equivalent`] accepts. Infinite unless `config.max_pairs` is
/// set; rejected pairs are the expected common case, not an error.
pub struct IdentitySearch<R: Rng> {
    pairs: CandidatePairs,
    config: SearchConfig,
    rng: R,
    examined: u64,
}

impl<R: Rng> IdentitySearch<R> {
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Self {
            pairs: DiagonalPairs::new(ExpressionGenerator::new as fn() -> ExpressionGenerator),
            config,
            rng,
            examined: 0,
        }
    }

    /// Candidate pairs pulled from the stream so far.
    pub fn pairs_examined(&self) -> u64 {
        self.examined
    }
}

impl<R: Rng> Iterator for IdentitySearch<R> {
    type Item = Discovery;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(max_pairs) = self.config.max_pairs {
                if self.examined >= max_pairs {
                    return None;
                }
            }
            let (left, right) = self.pairs.next()?;
            self.examined += 1;
            let equation = Equation::new(left, right);
            if equation.is_trivial() {
                continue;
            }
            if appears_equivalent(&equation, &self.config, &mut self.rng) {
                return Some(Discovery {
                    left: equation.left,
                    right: equation.right,
                    pair: self.examined,
                });
            }
        }
    }
}
