//! Directed rate graph built from exchange edges.

use std::collections::HashMap;

use ratepath_common::{Currency, ExchangeEdge};
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::FxError;

/// Adjacency list: currency -> outgoing `(destination, rate)` pairs in input order.
///
/// Built per conversion request. Edges with a non-positive rate are left out
/// individually and kept in [`RateGraph::rejected`]; building never fails.
#[derive(Debug, Clone, Default)]
pub struct RateGraph {
    adj: HashMap<Currency, Vec<(Currency, Decimal)>>,
    rejected: Vec<ExchangeEdge>,
}

impl RateGraph {
    /// Build the graph from a flat edge list.
    pub fn build(edges: &[ExchangeEdge]) -> Self {
        let mut graph = Self::default();

        for edge in edges {
            if !edge.has_valid_rate() {
                let err = FxError::InvalidEdgeData(edge.clone());
                warn!(code = err.error_code(), edge = %edge, "Rejected exchange edge");
                graph.rejected.push(edge.clone());
                continue;
            }

            graph
                .adj
                .entry(edge.from.clone())
                .or_default()
                .push((edge.to.clone(), edge.rate));
        }

        graph
    }

    /// Outgoing edges of `currency`, empty if it has none.
    pub fn neighbors(&self, currency: &Currency) -> &[(Currency, Decimal)] {
        self.adj.get(currency).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rate of the first edge from `from` to `to`.
    pub fn rate(&self, from: &Currency, to: &Currency) -> Option<Decimal> {
        self.neighbors(from)
            .iter()
            .find(|(dest, _)| dest == to)
            .map(|(_, rate)| *rate)
    }

    /// Edges dropped because their rate was not strictly positive.
    pub fn rejected(&self) -> &[ExchangeEdge] {
        &self.rejected
    }

    /// Number of accepted edges.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }
}
