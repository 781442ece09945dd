// src/strategy/implementations.rs

use crate::strategy::traits::{OrderContext, OrderPolicy};

/// Inventory level under which the catch-up policy adds a safety buffer.
pub const SAFETY_THRESHOLD: u32 = 4;
/// Flat buffer added when inventory is under the threshold.
pub const SAFETY_BUFFER: u32 = 4;

/// Floors a raw order at zero.
pub fn clamp_order(raw: i64) -> u32 {
    raw.clamp(0, i64::from(u32::MAX)) as u32
}

// =========================================================================
// 1. Pass-Through Policy
// =========================================================================

/// Orders exactly what was last demanded of it, ignoring inventory and
/// backlog. This is the default a role uses when driven on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughPolicy;

impl PassThroughPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl OrderPolicy for PassThroughPolicy {
    fn calculate_order(&self, context: &OrderContext) -> u32 {
        context.downstream_order
    }
}

// =========================================================================
// 2. Catch-Up Policy
// =========================================================================

/// The amplification-prone heuristic the chain simulation uses.
///
/// Order = downstream order
///       + backlog / 2            (when backlogged)
///       + SAFETY_BUFFER          (when inventory < SAFETY_THRESHOLD)
///
/// Reacting to both backlog and low stock while ignoring what is already in
/// the pipeline is what produces the bullwhip.
#[derive(Debug, Clone, Copy)]
pub struct CatchUpPolicy {
    safety_threshold: u32,
    safety_buffer: u32,
}

impl CatchUpPolicy {
    pub fn new() -> Self {
        Self {
            safety_threshold: SAFETY_THRESHOLD,
            safety_buffer: SAFETY_BUFFER,
        }
    }
}

impl Default for CatchUpPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderPolicy for CatchUpPolicy {
    fn calculate_order(&self, context: &OrderContext) -> u32 {
        let mut order = i64::from(context.downstream_order);

        // Backlogged: order extra to catch up
        if context.backlog > 0 {
            order += i64::from(context.backlog / 2);
        }

        // Running low: order safety stock
        if context.inventory < self.safety_threshold {
            order += i64::from(self.safety_buffer);
        }

        clamp_order(order)
    }
}
