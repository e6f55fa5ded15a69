//! Wind-gust experiment
//!
//! Runs the classic disturbance scenario (tilted attitude, step gust at
//! t = 1 s) under an open-loop hover command, then replays the recorded
//! trace through the disturbance observer.
//!
//! Run with:
//!   cargo run --example wind_gust

use nalgebra::Matrix3;

use etac_core::control::FixedSpeedController;
use etac_core::estimation::DisturbanceObserver;
use etac_core::simulation::Simulator;
use etac_experiments::wind_gust;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = wind_gust();
    let controller = FixedSpeedController::hover_balanced(&config.physics.to_params());
    let mass = config.physics.mass;

    let mut sim = Simulator::new(config, controller)?;
    sim.run()?;
    let trace = sim.trace();

    println!("Wind-Gust Experiment");
    println!("  Samples:             {}", trace.len());
    println!("  Firing events:       {}", trace.event_count());
    if let Some(mean) = trace.mean_inter_event_interval() {
        println!("  Mean event interval: {mean:.3} s");
    }
    if let Some(min) = trace.min_inter_event_interval() {
        println!("  Min event interval:  {min:.3} s");
    }
    println!("  Update fraction:     {:.1} %", 100.0 * trace.update_fraction());

    let last = trace.samples.last().expect("trace is non-empty");
    println!(
        "  Final position:      ({:.2}, {:.2}, {:.2}) m",
        last.state.position.x, last.state.position.y, last.state.position.z
    );

    let mut observer = DisturbanceObserver::with_gain(mass, Matrix3::identity() * 5.0);
    let estimates = observer.estimate_trace(sim.trace(), sim.dynamics());
    if let Some(estimate) = estimates.last() {
        println!(
            "  Estimated gust:      ({:.3}, {:.3}, {:.3}) m/s²  (true: 0.500, 0.300, 0.000)",
            estimate.x, estimate.y, estimate.z
        );
    }

    Ok(())
}
