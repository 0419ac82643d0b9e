//! Currency conversion along a path.

use ratepath_common::{ConversionStep, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FxError, FxResult};
use crate::graph::RateGraph;

/// Walk `path` and produce the running amount after every hop.
///
/// Each hop uses the first matching edge of `graph`. Amounts are never rounded
/// between hops. A hop without a backing edge means the path did not come
/// from this graph and is reported as [`FxError::PathEdgeMissing`]. A running
/// amount past the decimal range fails with [`FxError::AmountOverflow`].
pub fn calculate(path: &[Currency], amount: Decimal, graph: &RateGraph) -> FxResult<Vec<ConversionStep>> {
    let mut running = amount;
    let mut steps = Vec::with_capacity(path.len().saturating_sub(1));

    for hop in path.windows(2) {
        let (from, to) = (&hop[0], &hop[1]);
        let rate = graph.rate(from, to).ok_or_else(|| FxError::PathEdgeMissing {
            from: from.clone(),
            to: to.clone(),
        })?;

        running = running
            .checked_mul(rate)
            .ok_or_else(|| FxError::AmountOverflow {
                from: from.clone(),
                to: to.clone(),
            })?;
        steps.push(ConversionStep::new(from.clone(), to.clone(), running));
    }

    Ok(steps)
}

/// A completed conversion with its input and every intermediate step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
    /// Input amount.
    pub amount: Decimal,
    /// Steps in path order.
    pub steps: Vec<ConversionStep>,
}

impl Conversion {
    pub fn new(from: Currency, to: Currency, amount: Decimal, steps: Vec<ConversionStep>) -> Self {
        Self {
            from,
            to,
            amount,
            steps,
        }
    }

    /// Final converted amount.
    pub fn result(&self) -> Decimal {
        self.steps.last().map(|s| s.amount).unwrap_or(self.amount)
    }

    /// Get the effective rate used.
    pub fn effective_rate(&self) -> Decimal {
        if self.amount.is_zero() {
            return Decimal::ZERO;
        }
        self.result() / self.amount
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.steps.iter().filter(|s| s.from != s.to).count()
    }
}
