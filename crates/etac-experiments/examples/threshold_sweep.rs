//! Threshold sweep experiment
//!
//! Sweeps the triggering threshold σ over the wind-gust scenario with an
//! open-loop hover command (so every run shares the same trajectory) and
//! reports how the event count and inter-event intervals scale.
//!
//! Run with:
//!   cargo run --example threshold_sweep

use etac_core::control::FixedSpeedController;
use etac_experiments::{run_sweep, threshold_family, wind_gust};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let factors = [0.25, 0.5, 1.0, 2.0, 4.0];
    let family = threshold_family(&wind_gust(), 0.1, &factors);

    let points = run_sweep(&family, |config| {
        FixedSpeedController::hover_balanced(&config.physics.to_params())
    })?;

    println!("Threshold Sweep (wind-gust scenario, open-loop hover command)");
    println!("  {:>8}  {:>7}  {:>11}  {:>11}  {:>8}", "sigma", "events", "mean dt [s]", "min dt [s]", "updates");
    for point in &points {
        println!(
            "  {:>8.3}  {:>7}  {:>11}  {:>11}  {:>7.1}%",
            point.sigma,
            point.events,
            point
                .mean_interval
                .map_or_else(|| "-".to_string(), |v| format!("{v:.3}")),
            point
                .min_interval
                .map_or_else(|| "-".to_string(), |v| format!("{v:.3}")),
            100.0 * point.update_fraction,
        );
    }

    Ok(())
}
