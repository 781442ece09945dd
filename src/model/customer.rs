// src/model/customer.rs

use crate::io::demand;

/// Length of the classic customer script.
pub const CLASSIC_SCHEDULE_WEEKS: usize = 50;

/// The end-customer order script. Only the Retailer ever sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDemand {
    orders: Vec<u32>,
}

impl CustomerDemand {
    pub fn new(orders: Vec<u32>) -> Self {
        Self { orders }
    }

    /// 4 cases a week for weeks 1-4, then 8 cases a week through week 50.
    pub fn classic() -> Self {
        Self::new(demand::generate_classic_beer_game_demand(CLASSIC_SCHEDULE_WEEKS))
    }

    /// Customer order for a 1-based week; 0 past either end of the script.
    pub fn order_for_week(&self, week: u32) -> u32 {
        if week == 0 {
            return 0;
        }
        let index = (week - 1) as usize;
        self.orders.get(index).copied().unwrap_or(0)
    }

    pub fn weeks(&self) -> usize {
        self.orders.len()
    }

    pub fn orders(&self) -> &[u32] {
        &self.orders
    }
}

impl Default for CustomerDemand {
    fn default() -> Self {
        Self::classic()
    }
}
