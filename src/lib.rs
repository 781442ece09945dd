//! Beer Distribution Game simulation.
//!
//! Four roles (Retailer, Wholesaler, Distributor, Factory) linked by
//! two-week order and shipping delays. Small changes in end-customer demand
//! amplify into large upstream order and inventory swings: the bullwhip
//! effect.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{BeerGameError, Result};
pub use model::customer::CustomerDemand;
pub use model::queues::DelayPipeline;
pub use model::record_sheet::{RecordSheet, WeeklyRecord};
pub use model::role::{Position, Role};
pub use simulation::config::{DemandPattern, SimulationConfig};
pub use simulation::engine::{ChainSimulation, HistoryRecord};
pub use simulation::history::{ChainNode, OrderHistory, OrderStats};
pub use strategy::implementations::{CatchUpPolicy, PassThroughPolicy};
pub use strategy::traits::{OrderContext, OrderPolicy};
