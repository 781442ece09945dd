// src/simulation/history.rs

use crate::model::role::Position;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Size of the customer demand step the amplification is measured against.
pub const DEMAND_STEP: f64 = 4.0;

/// A place in the chain that emits orders: the end customer or one of the
/// four roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ChainNode {
    Customer,
    Retailer,
    Wholesaler,
    Distributor,
    Factory,
}

impl ChainNode {
    /// Customer first, then downstream to upstream.
    pub const ALL: [ChainNode; 5] = [
        ChainNode::Customer,
        ChainNode::Retailer,
        ChainNode::Wholesaler,
        ChainNode::Distributor,
        ChainNode::Factory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChainNode::Customer => "Customer",
            ChainNode::Retailer => "Retailer",
            ChainNode::Wholesaler => "Wholesaler",
            ChainNode::Distributor => "Distributor",
            ChainNode::Factory => "Factory",
        }
    }
}

impl From<Position> for ChainNode {
    fn from(position: Position) -> Self {
        match position {
            Position::Retailer => ChainNode::Retailer,
            Position::Wholesaler => ChainNode::Wholesaler,
            Position::Distributor => ChainNode::Distributor,
            Position::Factory => ChainNode::Factory,
        }
    }
}

impl fmt::Display for ChainNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Summary of one node's order series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderStats {
    pub node: ChainNode,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    /// `(max - min)` relative to the 4-case customer demand step.
    pub amplification: f64,
}

/// One week across the whole chain, for tabular export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderHistoryRow {
    pub week: u32,
    pub customer: u32,
    pub retailer: u32,
    pub wholesaler: u32,
    pub distributor: u32,
    pub factory: u32,
}

/// Chain-wide weekly orders. Every series always has the same length.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    series: BTreeMap<ChainNode, Vec<u32>>,
}

impl OrderHistory {
    pub fn new() -> Self {
        let series = ChainNode::ALL.iter().map(|&node| (node, Vec::new())).collect();
        Self { series }
    }

    /// Appends one week: the customer order followed by the four decisions,
    /// downstream to upstream.
    pub fn push_week(&mut self, customer: u32, decisions: [u32; 4]) {
        let week = std::iter::once(customer).chain(decisions);
        for (node, quantity) in ChainNode::ALL.iter().zip(week) {
            self.series.entry(*node).or_default().push(quantity);
        }
    }

    pub fn orders(&self, node: ChainNode) -> &[u32] {
        self.series.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of weeks recorded.
    pub fn len(&self) -> usize {
        self.orders(ChainNode::Customer).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `max - min` of a node's orders; 0 before the first week.
    pub fn variation(&self, node: ChainNode) -> u32 {
        self.stats(node).map(|stats| stats.max - stats.min).unwrap_or(0)
    }

    pub fn stats(&self, node: ChainNode) -> Option<OrderStats> {
        let orders = self.orders(node);
        let min = *orders.iter().min()?;
        let max = *orders.iter().max()?;
        let sum: u64 = orders.iter().map(|&q| u64::from(q)).sum();

        Some(OrderStats {
            node,
            min,
            max,
            mean: sum as f64 / orders.len() as f64,
            amplification: f64::from(max - min) / DEMAND_STEP,
        })
    }

    /// Stats for every node, customer first. Empty before the first week.
    pub fn amplification_summary(&self) -> Vec<OrderStats> {
        ChainNode::ALL.iter().filter_map(|&node| self.stats(node)).collect()
    }

    pub fn rows(&self) -> Vec<OrderHistoryRow> {
        (0..self.len())
            .map(|i| {
                let at = |node| self.orders(node).get(i).copied().unwrap_or(0);
                OrderHistoryRow {
                    week: (i + 1) as u32,
                    customer: at(ChainNode::Customer),
                    retailer: at(ChainNode::Retailer),
                    wholesaler: at(ChainNode::Wholesaler),
                    distributor: at(ChainNode::Distributor),
                    factory: at(ChainNode::Factory),
                }
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChainNode, &[u32])> {
        self.series.iter().map(|(node, orders)| (*node, orders.as_slice()))
    }
}

impl Default for OrderHistory {
    fn default() -> Self {
        Self::new()
    }
}
