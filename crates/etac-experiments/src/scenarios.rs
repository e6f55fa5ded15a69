//! Experiment scenarios
//!
//! Ready-made configurations for the standard event-triggered control
//! studies: a hover-hold equilibrium, the wind-gust disturbance run, and
//! threshold families for σ sweeps.

use nalgebra::Vector3;

use etac_core::control::Reference;
use etac_core::dynamics::Disturbance;
use etac_core::math::EulerAngles;
use etac_core::simulation::SimConfig;
use etac_core::trigger::TriggerCondition;

/// Hover hold at 2 m altitude
///
/// Level attitude, reference equal to the initial state, no disturbance.
/// A tracking controller fires once at t = 0 and never again; useful as a
/// sanity scenario and as a baseline for comparisons.
pub fn hover_hold() -> SimConfig {
    let altitude = Vector3::new(0.0, 0.0, 2.0);

    let mut config = SimConfig::default();
    config.horizon = 5.0;
    config.initial_state.position = altitude;
    config.reference = Reference::Hover(altitude);
    config
}

/// Wind-gust disturbance run
///
/// The classic experiment: tilted attitude (roll 0.1, pitch 0.05, yaw 0.2),
/// a 2 s horizon at dt = 0.01, and a lateral step gust of (0.5, 0.3, 0)
/// m/s² switching on at t = 1 s.
pub fn wind_gust() -> SimConfig {
    let mut config = SimConfig::default();
    config.dt = 0.01;
    config.horizon = 2.0;
    config.physics.attitude = EulerAngles::new(0.1, 0.05, 0.2);
    config.disturbance = Disturbance::Gust {
        onset: 1.0,
        acceleration: Vector3::new(0.5, 0.3, 0.0),
    };
    config.reference = Reference::Hover(Vector3::zeros());
    config
}

/// Scale a base configuration into a family of threshold variants
///
/// Returns one configuration per factor, with the triggering threshold set
/// to `sigma * factor` and everything else shared.
pub fn threshold_family(base: &SimConfig, sigma: f64, factors: &[f64]) -> Vec<SimConfig> {
    factors
        .iter()
        .map(|factor| {
            let mut config = base.clone();
            config.trigger = TriggerCondition::fixed(sigma * factor);
            config
        })
        .collect()
}
