// src/strategy/traits.rs

use std::fmt::Debug;

/// What a role can see locally when it decides an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderContext {
    /// Current on-hand stock.
    pub inventory: u32,
    /// Current unfilled orders.
    pub backlog: u32,
    /// The most recent order from the immediate downstream neighbour
    /// (the customer order, for the Retailer).
    pub downstream_order: u32,
}

/// Decides how much a role orders upstream (or, for the Factory, how much
/// it starts producing) this week.
///
/// Implementations are stateless so the same policy can be evaluated for
/// any role at any point without side effects.
pub trait OrderPolicy: Debug + Send + Sync {
    fn calculate_order(&self, context: &OrderContext) -> u32;
}
