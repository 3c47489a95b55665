//! Node filtering by region, node type and computed status.

use std::fmt;

use serde::Serialize;

use super::records::{Metric, NodeRecord, PerformanceSample};
use super::simulator::CurrentSnapshot;
use super::status::{classify, NodeStatus};
use super::thresholds::Thresholds;

/// A filter selection: everything, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl<T: Clone + PartialEq> Selector<T> {
    /// Step through `All`, then each option in order, then back to `All`.
    ///
    /// A selection that is no longer among the options resets to `All`.
    pub fn cycle(&self, options: &[T]) -> Self {
        let next_index = match self {
            Selector::All => 0,
            Selector::Only(current) => match options.iter().position(|o| o == current) {
                Some(i) => i + 1,
                None => return Selector::All,
            },
        };
        options.get(next_index).cloned().map_or(Selector::All, Selector::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(value) => value.fmt(f),
        }
    }
}

/// Current filter selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub region: Selector<String>,
    pub node_type: Selector<String>,
    /// Applied after status is computed.
    pub status: Selector<NodeStatus>,
}

impl Filters {
    pub fn is_unfiltered(&self) -> bool {
        self.region.is_all() && self.node_type.is_all() && self.status.is_all()
    }
}

/// A node paired with its status and current sample for this cycle.
#[derive(Debug, Clone, Copy)]
pub struct EnrichedNode<'a> {
    pub node: &'a NodeRecord,
    pub status: NodeStatus,
    pub sample: Option<&'a PerformanceSample>,
}

impl EnrichedNode<'_> {
    /// Metric value, or 0 when the node has no sample.
    pub fn metric(&self, metric: Metric) -> f64 {
        self.sample.map_or(0.0, |s| s.metric(metric))
    }
}

/// Filter output: matching nodes plus the full, unfiltered snapshot.
#[derive(Debug, Clone)]
pub struct FilteredNodes<'a> {
    pub nodes: Vec<EnrichedNode<'a>>,
    pub snapshot: &'a CurrentSnapshot,
}

/// Apply region and node-type filters, classify each remaining node, then
/// apply the status filter.
pub fn apply_filters<'a>(
    nodes: &'a [NodeRecord],
    snapshot: &'a CurrentSnapshot,
    filters: &Filters,
    thresholds: &Thresholds,
) -> FilteredNodes<'a> {
    let nodes = nodes
        .iter()
        .filter(|n| filters.region.matches(&n.region))
        .filter(|n| filters.node_type.matches(&n.node_type))
        .map(|node| {
            let sample = snapshot.get(&node.node_id);
            EnrichedNode {
                node,
                status: classify(sample, thresholds),
                sample,
            }
        })
        .filter(|n| filters.status.matches(&n.status))
        .collect();

    FilteredNodes { nodes, snapshot }
}
