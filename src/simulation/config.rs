// src/simulation/config.rs

use crate::error::Result;
use crate::io::demand;
use crate::model::customer::{CustomerDemand, CLASSIC_SCHEDULE_WEEKS};

/// How the end-customer demand script is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum DemandPattern {
    /// 4 cases a week for four weeks, then 8.
    Classic { length: usize },
    Constant { value: u32, length: usize },
    /// Seeded normal noise, rounded and floored at zero.
    Normal {
        mean: f64,
        std_dev: f64,
        length: usize,
        seed: u64,
    },
}

impl DemandPattern {
    pub fn build(&self) -> Result<CustomerDemand> {
        let orders = match *self {
            DemandPattern::Classic { length } => demand::generate_classic_beer_game_demand(length),
            DemandPattern::Constant { value, length } => demand::generate_constant_demand(length, value),
            DemandPattern::Normal {
                mean,
                std_dev,
                length,
                seed,
            } => demand::generate_normal_demand(length, mean, std_dev, seed)?,
        };
        Ok(CustomerDemand::new(orders))
    }
}

impl Default for DemandPattern {
    fn default() -> Self {
        DemandPattern::Classic {
            length: CLASSIC_SCHEDULE_WEEKS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub team_name: String,
    pub max_weeks: u32,
    pub demand: DemandPattern,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            team_name: "Blue Moon Brewery".to_string(),
            max_weeks: 36,
            demand: DemandPattern::default(),
        }
    }
}
