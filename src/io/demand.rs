// src/io/demand.rs

use crate::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Weeks of low demand before the classic step.
pub const CLASSIC_WARM_UP_WEEKS: usize = 4;
pub const CLASSIC_INITIAL_DEMAND: u32 = 4;
pub const CLASSIC_STEPPED_DEMAND: u32 = 8;

/// Generates a demand schedule where every week has the exact same order amount.
/// Useful for checking that the chain holds equilibrium.
pub fn generate_constant_demand(weeks: usize, value: u32) -> Vec<u32> {
    vec![value; weeks]
}

/// Generates a demand schedule from a Normal (Bell Curve) distribution.
///
/// The generator is seeded so the same arguments always produce the same
/// schedule.
///
/// # Arguments
/// * `weeks` - Length of the schedule.
/// * `mean` - The average order size (e.g., 8.0).
/// * `std_dev` - The standard deviation (volatility) (e.g., 2.0).
/// * `seed` - RNG seed.
pub fn generate_normal_demand(weeks: usize, mean: f64, std_dev: f64, seed: u64) -> Result<Vec<u32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std_dev)?;

    let schedule = (0..weeks)
        .map(|_| {
            // Round, then clamp negatives: demand cannot be negative
            let val: f64 = normal.sample(&mut rng);
            let val = val.round();
            if val < 0.0 {
                0
            } else {
                val as u32
            }
        })
        .collect();

    Ok(schedule)
}

/// Generates the classic "Step" pattern: 4 weeks of 4 cases, then 8 cases
/// for the rest of the schedule.
pub fn generate_classic_beer_game_demand(weeks: usize) -> Vec<u32> {
    (0..weeks)
        .map(|w| {
            if w < CLASSIC_WARM_UP_WEEKS {
                CLASSIC_INITIAL_DEMAND
            } else {
                CLASSIC_STEPPED_DEMAND
            }
        })
        .collect()
}
