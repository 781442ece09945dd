// src/simulation/engine.rs

use crate::error::Result;
use crate::model::role::{Position, Role};
use crate::simulation::config::SimulationConfig;
use crate::simulation::history::OrderHistory;
use crate::strategy::implementations::CatchUpPolicy;
use crate::strategy::traits::OrderPolicy;
use log::{debug, info};
use serde::Serialize;

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub week: u32,
    pub role: Position,
    pub inventory: u32,
    pub backlog: u32,
    pub order_placed: u32,
    pub incoming_order: u32,
    pub shipment_sent: u32,
    pub shipment_received: u32,
    pub cost: f64,
}

/// The four roles wired into a closed loop.
///
/// Orders flow upstream through each role's order pipeline, goods flow
/// downstream through each role's shipping pipeline. The Factory's
/// production pipeline closes the loop at the top.
pub struct ChainSimulation {
    config: SimulationConfig,

    // The Actors
    retailer: Role,
    wholesaler: Role,
    distributor: Role,
    factory: Role,

    // The ordering heuristic applied to every role when the chain is driven
    // as a whole
    policy: CatchUpPolicy,

    current_week: u32,
    order_history: OrderHistory,
    history: Vec<HistoryRecord>,
}

impl ChainSimulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let customer = config.demand.build()?;
        let team = config.team_name.clone();

        Ok(Self {
            retailer: Role::retailer_with_demand(team.clone(), customer),
            wholesaler: Role::wholesaler(team.clone()),
            distributor: Role::distributor(team.clone()),
            factory: Role::factory(team),
            policy: CatchUpPolicy::new(),
            current_week: 0,
            order_history: OrderHistory::new(),
            history: Vec::new(),
            config,
        })
    }

    /// Runs until `max_weeks` from the config have been simulated.
    pub fn run(&mut self) {
        info!(
            "Running '{}' for {} weeks",
            self.config.team_name, self.config.max_weeks
        );
        while self.current_week < self.config.max_weeks {
            self.simulate_week();
        }
        info!(
            "Finished week {}: total supply chain cost ${:.2}",
            self.current_week,
            self.total_supply_chain_cost()
        );
    }

    pub fn run_weeks(&mut self, weeks: u32) {
        for _ in 0..weeks {
            self.simulate_week();
        }
    }

    pub fn simulate_week(&mut self) {
        self.current_week += 1;
        let week = self.current_week;

        // =================================================================
        // PHASE 1: READ
        // Peek at the slips about to reach each supplier and the goods
        // about to arrive. Nothing is mutated here.
        // =================================================================
        let customer_order = self.retailer.customer_order(week).unwrap_or(0);
        let retailer_order_arriving = self.retailer.pending_order().unwrap_or(0);
        let wholesaler_order_arriving = self.wholesaler.pending_order().unwrap_or(0);
        let distributor_order_arriving = self.distributor.pending_order().unwrap_or(0);

        debug!(
            "Week {}: customer {}, orders arriving W/D/F {}/{}/{}, goods arriving R/W/D/F {}/{}/{}/{}",
            week,
            customer_order,
            retailer_order_arriving,
            wholesaler_order_arriving,
            distributor_order_arriving,
            self.retailer.pending_arrival(),
            self.wholesaler.pending_arrival(),
            self.distributor.pending_arrival(),
            self.factory.pending_arrival()
        );

        // =================================================================
        // PHASE 2: DECIDE
        // Each role only sees its own state and its downstream order.
        // =================================================================
        let retailer_decision = self.decide(&self.retailer, customer_order);
        let wholesaler_decision = self.decide(&self.wholesaler, retailer_order_arriving);
        let distributor_decision = self.decide(&self.distributor, wholesaler_order_arriving);
        let factory_decision = self.decide(&self.factory, distributor_order_arriving);

        // =================================================================
        // PHASE 3: EXECUTE
        // Downstream to upstream. The retailer's shipment goes to the
        // customer and leaves the system.
        // =================================================================
        self.retailer.execute_week(customer_order, retailer_decision);
        let wholesaler_shipped = self
            .wholesaler
            .execute_week(retailer_order_arriving, wholesaler_decision);
        let distributor_shipped = self
            .distributor
            .execute_week(wholesaler_order_arriving, distributor_decision);
        let factory_shipped = self
            .factory
            .execute_week(distributor_order_arriving, factory_decision);

        // =================================================================
        // PHASE 4: SHIP
        // Goods enter the downstream neighbour's shipping pipeline.
        // =================================================================
        self.retailer.load_inbound_shipment(wholesaler_shipped);
        self.wholesaler.load_inbound_shipment(distributor_shipped);
        self.distributor.load_inbound_shipment(factory_shipped);

        // =================================================================
        // PHASE 5: RECORD
        // =================================================================
        self.order_history.push_week(
            customer_order,
            [
                retailer_decision,
                wholesaler_decision,
                distributor_decision,
                factory_decision,
            ],
        );
        self.record_history();

        debug!(
            "Week {}: orders R/W/D/F {}/{}/{}/{}, shipped W/D/F {}/{}/{}",
            week,
            retailer_decision,
            wholesaler_decision,
            distributor_decision,
            factory_decision,
            wholesaler_shipped,
            distributor_shipped,
            factory_shipped
        );
    }

    fn decide(&self, role: &Role, downstream_order: u32) -> u32 {
        self.policy
            .calculate_order(&role.order_context(downstream_order))
    }

    fn record_history(&mut self) {
        for role in [&self.retailer, &self.wholesaler, &self.distributor, &self.factory] {
            self.history.push(HistoryRecord {
                week: self.current_week,
                role: role.position(),
                inventory: role.inventory(),
                backlog: role.backlog(),
                order_placed: role.last_order_placed(),
                incoming_order: role.current_incoming_order(),
                shipment_sent: role.last_shipment_sent(),
                shipment_received: role.last_shipment_received(),
                cost: role.current_cost(),
            });
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    pub fn retailer(&self) -> &Role {
        &self.retailer
    }

    pub fn wholesaler(&self) -> &Role {
        &self.wholesaler
    }

    pub fn distributor(&self) -> &Role {
        &self.distributor
    }

    pub fn factory(&self) -> &Role {
        &self.factory
    }

    pub fn role(&self, position: Position) -> &Role {
        match position {
            Position::Retailer => &self.retailer,
            Position::Wholesaler => &self.wholesaler,
            Position::Distributor => &self.distributor,
            Position::Factory => &self.factory,
        }
    }

    /// Downstream to upstream.
    pub fn roles(&self) -> [&Role; 4] {
        [&self.retailer, &self.wholesaler, &self.distributor, &self.factory]
    }

    pub fn order_history(&self) -> &OrderHistory {
        &self.order_history
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Calculate the total cost for the entire supply chain across all weeks
    pub fn total_supply_chain_cost(&self) -> f64 {
        self.roles().iter().map(|role| role.total_cost()).sum()
    }

    /// Calculate the cost breakdown by stage
    pub fn cost_breakdown(&self) -> Vec<(Position, f64)> {
        self.roles()
            .iter()
            .map(|role| (role.position(), role.total_cost()))
            .collect()
    }
}
