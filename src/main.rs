use beer_game::io::reporting;
use beer_game::{ChainSimulation, SimulationConfig};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    println!("=== Beer Distribution Game Simulation in Rust ===");

    // 1. SETUP CONFIGURATION
    // Classic game: demand steps from 4 to 8 cases at week 5, 36 weeks.
    let config = SimulationConfig::default();

    // 2. INITIALIZE SIMULATION
    let mut sim = match ChainSimulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Could not set up simulation: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // 3. RUN SIMULATION
    println!("Running simulation for {} weeks...", sim.config().max_weeks);
    sim.run();

    // 4. EXPORT RESULTS
    let exports = [
        ("simulation_results.csv", reporting::write_simulation_log("simulation_results.csv", sim.history())),
        ("order_history.csv", reporting::write_order_history("order_history.csv", sim.order_history())),
    ];
    for (file, result) in exports {
        match result {
            Ok(()) => println!("Data written to ./{}", file),
            Err(e) => eprintln!("Error writing {}: {}", file, e),
        }
    }

    // 5. PRINT ORDER AMPLIFICATION
    println!("\n=== Order Amplification ===");
    for stats in sim.order_history().amplification_summary() {
        println!(
            "{:<12} min {:>4}  max {:>4}  avg {:>6.1}  amplification {:>5.1}x",
            stats.node.name(),
            stats.min,
            stats.max,
            stats.mean,
            stats.amplification
        );
    }

    // 6. PRINT COST ANALYSIS
    println!("\n=== Cost Analysis ===");
    for (position, cost) in sim.cost_breakdown() {
        println!("{}: ${:.2}", position, cost);
    }
    println!("Total Supply Chain Cost: ${:.2}", sim.total_supply_chain_cost());

    println!("\nSimulation Complete.");
    ExitCode::SUCCESS
}
