//! Fewest-hop path search over the rate graph.

use std::collections::{HashSet, VecDeque};

use ratepath_common::Currency;

use crate::error::{FxError, FxResult};
use crate::graph::RateGraph;

/// Find the path with the fewest hops from `source` to `target`.
///
/// Breadth-first; rates play no part in the choice. Siblings are expanded in
/// graph insertion order, so identical input always yields the same path.
/// A currency is marked visited when enqueued, which also bounds the search
/// on cyclic graphs. `source == target` yields `[source]`.
pub fn find_path(graph: &RateGraph, source: &Currency, target: &Currency) -> FxResult<Vec<Currency>> {
    if source == target {
        return Ok(vec![source.clone()]);
    }

    // Each node records the index of the node it was reached from.
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut visited: HashSet<&Currency> = HashSet::new();
    let mut nodes: Vec<(&Currency, Option<usize>)> = Vec::new();

    nodes.push((source, None));
    visited.insert(source);
    queue.push_back(0);

    while let Some(idx) = queue.pop_front() {
        let (current, _) = nodes[idx];

        for (neighbor, _) in graph.neighbors(current) {
            if !visited.insert(neighbor) {
                continue;
            }
            nodes.push((neighbor, Some(idx)));
            let neighbor_idx = nodes.len() - 1;

            if neighbor == target {
                return Ok(unwind(&nodes, neighbor_idx));
            }
            queue.push_back(neighbor_idx);
        }
    }

    Err(FxError::NoPathFound {
        from: source.clone(),
        to: target.clone(),
    })
}

fn unwind(nodes: &[(&Currency, Option<usize>)], mut idx: usize) -> Vec<Currency> {
    let mut path = vec![nodes[idx].0.clone()];
    while let Some(prev) = nodes[idx].1 {
        path.push(nodes[prev].0.clone());
        idx = prev;
    }
    path.reverse();
    path
}
