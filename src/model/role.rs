// src/model/role.rs

use crate::error::{checked_quantity, BeerGameError, Result};
use crate::model::customer::CustomerDemand;
use crate::model::queues::{DelayPipeline, EQUILIBRIUM_QUANTITY};
use crate::model::record_sheet::{RecordSheet, WeeklyRecord};
use crate::strategy::implementations::PassThroughPolicy;
use crate::strategy::traits::{OrderContext, OrderPolicy};
use log::trace;
use serde::Serialize;
use std::fmt;

/// Every role starts the game holding 12 cases.
pub const INITIAL_INVENTORY: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Position {
    Retailer,
    Wholesaler,
    Distributor,
    Factory,
}

impl Position {
    /// Downstream to upstream.
    pub const ALL: [Position; 4] = [
        Position::Retailer,
        Position::Wholesaler,
        Position::Distributor,
        Position::Factory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Position::Retailer => "Retailer",
            Position::Wholesaler => "Wholesaler",
            Position::Distributor => "Distributor",
            Position::Factory => "Factory",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a role's weekly decision goes.
#[derive(Debug, Clone)]
enum UpstreamLink {
    /// Order slips mailed to the supplier.
    OrderSlips(DelayPipeline),
    /// Production started in the brewery. Factory only.
    Production(DelayPipeline),
}

/// Where a role's incoming orders come from.
#[derive(Debug, Clone)]
enum DemandSource {
    /// Orders handed in by the caller each week.
    Downstream,
    /// The scripted end-customer demand. Retailer only.
    Customer(CustomerDemand),
}

/// One echelon of the chain and its weekly 5-step protocol.
///
/// State changes only through the protocol; everything else is a read
/// accessor. After every fill step at most one of inventory and backlog is
/// positive.
#[derive(Debug, Clone)]
pub struct Role {
    team_name: String,
    position: Position,
    current_week: u32,

    inventory: u32,
    backlog: u32,
    last_order_placed: u32,

    // Tracking for reporting
    current_incoming_order: u32,
    last_shipment_received: u32,
    last_shipment_sent: u32,

    shipping_delay: DelayPipeline,
    upstream: UpstreamLink,
    demand: DemandSource,
    record_sheet: RecordSheet,
}

impl Role {
    pub fn new(position: Position, team_name: impl Into<String>) -> Self {
        let upstream = match position {
            Position::Factory => UpstreamLink::Production(DelayPipeline::equilibrium()),
            _ => UpstreamLink::OrderSlips(DelayPipeline::equilibrium()),
        };
        let demand = match position {
            Position::Retailer => DemandSource::Customer(CustomerDemand::classic()),
            _ => DemandSource::Downstream,
        };

        Self {
            team_name: team_name.into(),
            position,
            current_week: 0,
            inventory: INITIAL_INVENTORY,
            backlog: 0,
            last_order_placed: EQUILIBRIUM_QUANTITY,
            current_incoming_order: 0,
            last_shipment_received: 0,
            last_shipment_sent: 0,
            shipping_delay: DelayPipeline::equilibrium(),
            upstream,
            demand,
            record_sheet: RecordSheet::new(),
        }
    }

    pub fn retailer(team_name: impl Into<String>) -> Self {
        Self::new(Position::Retailer, team_name)
    }

    /// A Retailer serving a custom customer script.
    pub fn retailer_with_demand(team_name: impl Into<String>, customer: CustomerDemand) -> Self {
        let mut role = Self::new(Position::Retailer, team_name);
        role.demand = DemandSource::Customer(customer);
        role
    }

    pub fn wholesaler(team_name: impl Into<String>) -> Self {
        Self::new(Position::Wholesaler, team_name)
    }

    pub fn distributor(team_name: impl Into<String>) -> Self {
        Self::new(Position::Distributor, team_name)
    }

    pub fn factory(team_name: impl Into<String>) -> Self {
        Self::new(Position::Factory, team_name)
    }

    // =====================================================================
    // The weekly protocol
    // =====================================================================

    /// Step 1: Receive whatever exits the inbound pipeline.
    ///
    /// The Factory draws from production; its shipping pipeline is still
    /// advanced but nothing upstream ever feeds it. Inventory saturates at
    /// `u32::MAX`.
    pub fn step_1_receive_inventory(&mut self) -> u32 {
        let received = match &mut self.upstream {
            UpstreamLink::Production(production) => {
                let produced = production.advance();
                self.shipping_delay.advance();
                produced
            }
            UpstreamLink::OrderSlips(_) => self.shipping_delay.advance(),
        };

        self.inventory = self.inventory.saturating_add(received);
        self.last_shipment_received = received;
        received
    }

    /// Step 2: Fill the incoming order plus any backlog.
    ///
    /// The Retailer ignores `incoming_order` and serves the customer order
    /// that arrives at the close of its week, i.e. the script entry for the
    /// week after its counter.
    ///
    /// Returns `(filled, remaining_backlog)`. The obligation saturates at
    /// `u32::MAX`; [`try_execute_week`](Self::try_execute_week) rejects
    /// weeks that would reach it.
    pub fn step_2_fill_orders(&mut self, incoming_order: u32) -> (u32, u32) {
        let incoming_order = self.order_to_serve(self.current_week + 1, incoming_order);
        self.current_incoming_order = incoming_order;

        // Backlog and new orders are one obligation
        let total_due = incoming_order.saturating_add(self.backlog);

        let filled = if self.inventory >= total_due {
            self.inventory -= total_due;
            self.backlog = 0;
            total_due
        } else {
            let filled = self.inventory;
            self.backlog = total_due - filled;
            self.inventory = 0;
            filled
        };

        self.last_shipment_sent = filled;
        (filled, self.backlog)
    }

    /// Step 3: Write this week's position into the record sheet.
    pub fn step_3_record(&mut self, order_placed: u32) -> WeeklyRecord {
        self.record_sheet
            .record(self.current_week, self.inventory, self.backlog, order_placed)
    }

    /// Step 4: Move order slips one week closer to the supplier.
    ///
    /// Returns the slip that left the pipeline, or `None` for the Factory,
    /// which has no supplier.
    pub fn step_4_advance_order_slips(&mut self) -> Option<u32> {
        match &mut self.upstream {
            UpstreamLink::OrderSlips(slips) => Some(slips.advance()),
            UpstreamLink::Production(_) => None,
        }
    }

    /// Step 5: The role's own decision: pass through the order it most
    /// recently received. For the Factory this is a production target.
    pub fn step_5_place_order(&self) -> u32 {
        PassThroughPolicy::new().calculate_order(&self.order_context(self.current_incoming_order))
    }

    /// Runs one week with an externally chosen decision.
    ///
    /// Returns the quantity filled, i.e. what this role ships downstream.
    pub fn execute_week(&mut self, incoming_order: u32, order_decision: u32) -> u32 {
        self.run_week(incoming_order, |_| order_decision)
    }

    /// Runs one week standalone, deciding with [`step_5_place_order`](Self::step_5_place_order).
    pub fn execute_week_with_default_policy(&mut self, incoming_order: u32) -> u32 {
        self.run_week(incoming_order, Role::step_5_place_order)
    }

    /// [`execute_week`](Self::execute_week) for callers working in signed
    /// units. Nothing is mutated when validation fails.
    ///
    /// Besides rejecting negative or oversized input, this refuses a week
    /// whose arrival or fill obligation would no longer fit in a `u32`.
    pub fn try_execute_week(&mut self, incoming_order: i64, order_decision: i64) -> Result<u32> {
        let incoming_order = checked_quantity("incoming order", incoming_order)?;
        let order_decision = checked_quantity("order decision", order_decision)?;

        let arrival = self.pending_arrival();
        if self.inventory.checked_add(arrival).is_none() {
            return Err(BeerGameError::QuantityOverflow {
                field: "inventory",
                value: i64::from(self.inventory) + i64::from(arrival),
            });
        }

        let due = self.order_to_serve(self.current_week + 2, incoming_order);
        if due.checked_add(self.backlog).is_none() {
            return Err(BeerGameError::QuantityOverflow {
                field: "orders to fill",
                value: i64::from(due) + i64::from(self.backlog),
            });
        }

        Ok(self.execute_week(incoming_order, order_decision))
    }

    /// The order step 2 serves. `customer_week` is only read by the Retailer.
    fn order_to_serve(&self, customer_week: u32, incoming_order: u32) -> u32 {
        match &self.demand {
            DemandSource::Customer(customer) => customer.order_for_week(customer_week),
            DemandSource::Downstream => incoming_order,
        }
    }

    fn run_week<F>(&mut self, incoming_order: u32, decide: F) -> u32
    where
        F: FnOnce(&Role) -> u32,
    {
        self.current_week += 1;

        let received = self.step_1_receive_inventory();
        let (filled, backlog) = self.step_2_fill_orders(incoming_order);
        let decision = decide(&*self);
        self.step_3_record(decision);
        self.step_4_advance_order_slips();

        match &mut self.upstream {
            UpstreamLink::OrderSlips(pipeline) | UpstreamLink::Production(pipeline) => {
                pipeline.inject(decision)
            }
        }
        self.last_order_placed = decision;

        trace!(
            "{} week {}: received {}, demand {}, shipped {}, backlog {}, inventory {}, ordered {}",
            self.position,
            self.current_week,
            received,
            self.current_incoming_order,
            filled,
            backlog,
            self.inventory,
            decision
        );

        filled
    }

    /// A shipment from the upstream neighbour enters this role's inbound
    /// pipeline. It arrives in step 1 once the pipeline delay has elapsed.
    pub fn load_inbound_shipment(&mut self, quantity: u32) {
        self.shipping_delay.inject(quantity);
    }

    // =====================================================================
    // Read accessors
    // =====================================================================

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    pub fn inventory(&self) -> u32 {
        self.inventory
    }

    pub fn backlog(&self) -> u32 {
        self.backlog
    }

    pub fn last_order_placed(&self) -> u32 {
        self.last_order_placed
    }

    pub fn current_incoming_order(&self) -> u32 {
        self.current_incoming_order
    }

    pub fn last_shipment_received(&self) -> u32 {
        self.last_shipment_received
    }

    pub fn last_shipment_sent(&self) -> u32 {
        self.last_shipment_sent
    }

    /// Holding plus backlog cost of the current position.
    pub fn current_cost(&self) -> f64 {
        RecordSheet::weekly_cost(self.inventory, self.backlog)
    }

    pub fn total_cost(&self) -> f64 {
        self.record_sheet.total_cost()
    }

    pub fn effective_inventory(&self) -> i64 {
        i64::from(self.inventory) - i64::from(self.backlog)
    }

    pub fn orders_to_fill(&self) -> u32 {
        self.current_incoming_order.saturating_add(self.backlog)
    }

    pub fn record_sheet(&self) -> &RecordSheet {
        &self.record_sheet
    }

    pub fn order_context(&self, downstream_order: u32) -> OrderContext {
        OrderContext {
            inventory: self.inventory,
            backlog: self.backlog,
            downstream_order,
        }
    }

    pub fn shipping_slots(&self) -> Vec<u32> {
        self.shipping_delay.snapshot()
    }

    pub fn order_slots(&self) -> Option<Vec<u32>> {
        match &self.upstream {
            UpstreamLink::OrderSlips(slips) => Some(slips.snapshot()),
            UpstreamLink::Production(_) => None,
        }
    }

    pub fn production_slots(&self) -> Option<Vec<u32>> {
        match &self.upstream {
            UpstreamLink::Production(production) => Some(production.snapshot()),
            UpstreamLink::OrderSlips(_) => None,
        }
    }

    pub fn production_in_pipeline(&self) -> Option<u64> {
        match &self.upstream {
            UpstreamLink::Production(production) => Some(production.total()),
            UpstreamLink::OrderSlips(_) => None,
        }
    }

    /// The order slip the supplier will see this week.
    pub fn pending_order(&self) -> Option<u32> {
        match &self.upstream {
            UpstreamLink::OrderSlips(slips) => Some(slips.peek()),
            UpstreamLink::Production(_) => None,
        }
    }

    /// What step 1 will add to inventory this week.
    pub fn pending_arrival(&self) -> u32 {
        match &self.upstream {
            UpstreamLink::Production(production) => production.peek(),
            UpstreamLink::OrderSlips(_) => self.shipping_delay.peek(),
        }
    }

    pub fn customer_demand(&self) -> Option<&CustomerDemand> {
        match &self.demand {
            DemandSource::Customer(customer) => Some(customer),
            DemandSource::Downstream => None,
        }
    }

    /// Scripted customer order for a week; `None` for every role but the Retailer.
    pub fn customer_order(&self, week: u32) -> Option<u32> {
        self.customer_demand()
            .map(|customer| customer.order_for_week(week))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_role_is_in_equilibrium() {
        for position in Position::ALL {
            let role = Role::new(position, "Test Brewery");
            assert_eq!(role.inventory(), 12);
            assert_eq!(role.backlog(), 0);
            assert_eq!(role.current_week(), 0);
            assert_eq!(role.last_order_placed(), 4);
            assert_eq!(role.shipping_slots(), vec![4, 4]);
            assert_eq!(role.current_cost(), 6.0);
            assert_eq!(role.total_cost(), 0.0);
            assert_eq!(role.team_name(), "Test Brewery");
            assert!(role.record_sheet().is_empty());
        }
    }

    #[test]
    fn only_factory_has_production() {
        let factory = Role::factory("T");
        assert_eq!(factory.production_slots(), Some(vec![4, 4]));
        assert_eq!(factory.production_in_pipeline(), Some(8));
        assert!(factory.order_slots().is_none());
        assert!(factory.pending_order().is_none());

        let wholesaler = Role::wholesaler("T");
        assert_eq!(wholesaler.order_slots(), Some(vec![4, 4]));
        assert!(wholesaler.production_slots().is_none());
        assert_eq!(wholesaler.pending_order(), Some(4));
    }

    #[test]
    fn only_retailer_sees_customer_demand() {
        assert_eq!(Role::retailer("T").customer_order(5), Some(8));
        assert_eq!(Role::distributor("T").customer_order(5), None);
    }

    #[test]
    fn step_1_adds_arrival_to_inventory() {
        let mut role = Role::wholesaler("T");
        assert_eq!(role.step_1_receive_inventory(), 4);
        assert_eq!(role.inventory(), 16);
        assert_eq!(role.shipping_slots(), vec![4, 0]);
    }

    #[test]
    fn factory_step_1_draws_from_production() {
        let mut factory = Role::factory("T");
        assert_eq!(factory.step_1_receive_inventory(), 4);
        assert_eq!(factory.production_slots(), Some(vec![4, 0]));
        // Shipping advanced for symmetry, output discarded
        assert_eq!(factory.shipping_slots(), vec![4, 0]);
        assert_eq!(factory.inventory(), 16);
    }

    #[test]
    fn step_2_fills_completely_when_stock_allows() {
        let mut role = Role::distributor("T");
        assert_eq!(role.step_2_fill_orders(5), (5, 0));
        assert_eq!(role.inventory(), 7);
        assert_eq!(role.orders_to_fill(), 5);
    }

    #[test]
    fn step_2_backlogs_the_shortfall() {
        let mut role = Role::distributor("T");
        assert_eq!(role.step_2_fill_orders(20), (12, 8));
        assert_eq!(role.inventory(), 0);
        assert_eq!(role.backlog(), 8);
        assert_eq!(role.effective_inventory(), -8);

        // A zero order still works the backlog down
        role.step_1_receive_inventory();
        assert_eq!(role.step_2_fill_orders(0), (4, 4));
        assert_eq!(role.inventory(), 0);
    }

    #[test]
    fn step_2_backlog_and_new_orders_are_one_obligation() {
        let mut role = Role::wholesaler("T");
        role.step_2_fill_orders(15);
        assert_eq!(role.backlog(), 3);

        role.step_1_receive_inventory();
        role.step_1_receive_inventory();
        // 8 on hand, 3 backlog + 2 new
        assert_eq!(role.step_2_fill_orders(2), (5, 0));
        assert_eq!(role.inventory(), 3);
    }

    #[test]
    fn retailer_step_2_ignores_caller_order() {
        let mut retailer = Role::retailer("T");
        retailer.current_week = 4;
        // Serves the week-5 customer order
        assert_eq!(retailer.step_2_fill_orders(100), (8, 0));
        assert_eq!(retailer.current_incoming_order(), 8);
        assert_eq!(retailer.step_5_place_order(), 8);
    }

    #[test]
    fn factory_step_4_is_a_no_op() {
        let mut factory = Role::factory("T");
        assert_eq!(factory.step_4_advance_order_slips(), None);
        assert_eq!(factory.production_slots(), Some(vec![4, 4]));

        let mut retailer = Role::retailer("T");
        assert_eq!(retailer.step_4_advance_order_slips(), Some(4));
        assert_eq!(retailer.order_slots(), Some(vec![4, 0]));
    }

    #[test]
    fn execute_week_injects_decision_and_remembers_it() {
        let mut role = Role::wholesaler("T");
        let shipped = role.execute_week(4, 9);

        assert_eq!(shipped, 4);
        assert_eq!(role.current_week(), 1);
        assert_eq!(role.order_slots(), Some(vec![4, 9]));
        assert_eq!(role.last_order_placed(), 9);

        let record = role.record_sheet().latest().copied().unwrap();
        assert_eq!(record.week, 1);
        assert_eq!(record.inventory, 12);
        assert_eq!(record.order_placed, 9);
    }

    #[test]
    fn factory_decision_goes_into_production() {
        let mut factory = Role::factory("T");
        factory.execute_week(4, 10);
        assert_eq!(factory.production_slots(), Some(vec![4, 10]));
        assert_eq!(factory.last_order_placed(), 10);

        factory.execute_week(4, 4);
        factory.execute_week(4, 4);
        // 12 + 4 - 4, then 12 + 4 - 4, then 12 + 10 - 4
        assert_eq!(factory.inventory(), 18);
    }

    #[test]
    fn default_policy_passes_the_incoming_order_through() {
        let mut role = Role::distributor("T");
        role.execute_week_with_default_policy(7);
        assert_eq!(role.last_order_placed(), 7);
        assert_eq!(role.record_sheet().latest().map(|r| r.order_placed), Some(7));
        assert_eq!(role.order_slots(), Some(vec![4, 7]));
    }

    #[test]
    fn load_inbound_shipment_overwrites_tail() {
        let mut role = Role::retailer("T");
        role.execute_week(0, 4);
        role.load_inbound_shipment(6);
        assert_eq!(role.shipping_slots(), vec![4, 6]);
        assert_eq!(role.pending_arrival(), 4);
    }

    #[test]
    fn try_execute_week_rejects_negative_without_mutating() {
        let mut role = Role::wholesaler("T");
        assert!(role.try_execute_week(-1, 4).is_err());
        assert!(role.try_execute_week(4, -2).is_err());
        assert_eq!(role.current_week(), 0);
        assert!(role.record_sheet().is_empty());

        assert_eq!(role.try_execute_week(4, 4).unwrap(), 4);
        assert_eq!(role.current_week(), 1);
    }

    #[test]
    fn try_execute_week_rejects_an_obligation_beyond_u32() {
        let mut role = Role::wholesaler("T");
        let huge = i64::from(u32::MAX);

        // 12 on hand and 4 arriving against u32::MAX
        assert_eq!(role.try_execute_week(huge, 0).unwrap(), 16);
        assert_eq!(role.backlog(), u32::MAX - 16);

        let before = (role.current_week(), role.inventory(), role.backlog(), role.shipping_slots());
        let err = role.try_execute_week(huge, 0).unwrap_err();
        assert!(matches!(
            err,
            BeerGameError::QuantityOverflow {
                field: "orders to fill",
                ..
            }
        ));
        assert_eq!(
            (role.current_week(), role.inventory(), role.backlog(), role.shipping_slots()),
            before
        );
        assert_eq!(role.record_sheet().len(), 1);

        // Small orders still go through
        assert!(role.try_execute_week(1, 0).is_ok());
        assert_eq!(role.current_week(), 2);
    }

    #[test]
    fn try_execute_week_rejects_an_arrival_beyond_u32() {
        let mut role = Role::distributor("T");
        role.execute_week(0, 0);
        role.load_inbound_shipment(u32::MAX);
        role.execute_week(0, 0);
        assert_eq!(role.pending_arrival(), u32::MAX);

        let err = role.try_execute_week(0, 0).unwrap_err();
        assert!(matches!(err, BeerGameError::QuantityOverflow { field: "inventory", .. }));
        assert_eq!(role.current_week(), 2);
    }

    #[test]
    fn execute_week_saturates_instead_of_wrapping() {
        let mut role = Role::wholesaler("T");
        role.execute_week(u32::MAX, 0);
        role.execute_week(u32::MAX, 0);

        // The obligation stops at u32::MAX, less the 4 cases shipped
        assert_eq!(role.backlog(), u32::MAX - 4);
        assert_eq!(role.inventory(), 0);
        assert_eq!(role.orders_to_fill(), u32::MAX);
        assert_eq!(role.current_week(), 2);
    }

    #[test]
    fn factory_default_policy_sets_production_target() {
        let mut factory = Role::factory("T");
        let shipped = factory.execute_week_with_default_policy(9);

        assert_eq!(shipped, 9);
        assert_eq!(factory.production_slots(), Some(vec![4, 9]));
        assert_eq!(factory.last_order_placed(), 9);
        assert_eq!(factory.inventory(), 7);
        assert_eq!(factory.production_in_pipeline(), Some(13));
        assert!(factory.order_slots().is_none());
    }
}
