//! Disturbance recovery validation
//!
//! Replays the wind-gust scenario through the observer and checks that the
//! estimate is quiet before the gust and recovers the gust afterwards.

use approx::assert_relative_eq;
use nalgebra::Matrix3;

use etac_core::control::FixedSpeedController;
use etac_core::estimation::DisturbanceObserver;
use etac_core::simulation::Simulator;
use etac_experiments::wind_gust;

#[test]
fn observer_recovers_the_gust_from_the_trace() {
    let config = wind_gust();
    let mass = config.physics.mass;
    let dt = config.dt;
    let controller = FixedSpeedController::hover_balanced(&config.physics.to_params());

    let mut sim = Simulator::new(config, controller).unwrap();
    sim.run().unwrap();
    let trace = sim.trace();

    let mut observer = DisturbanceObserver::with_gain(mass, Matrix3::identity() * 5.0);
    let estimates = observer.estimate_trace(trace, sim.dynamics());

    assert_eq!(estimates.len(), trace.len() - 1);

    // Just before the gust onset the estimate only carries the small
    // unmodeled drag term
    let pre_gust = estimates[(1.0 / dt).round() as usize - 1];
    assert!(pre_gust.norm() < 0.05, "pre-gust estimate too large: {pre_gust}");

    // A second after onset the estimate has converged onto the gust, up to
    // the drag of the accumulated lateral velocity
    let final_estimate = estimates.last().unwrap();
    assert_relative_eq!(final_estimate.x, 0.5, epsilon = 0.1);
    assert_relative_eq!(final_estimate.y, 0.3, epsilon = 0.1);
    assert_relative_eq!(final_estimate.z, 0.0, epsilon = 0.1);
}
