//! Lumped-disturbance observer
//!
//! Estimates the external disturbance acceleration from the mismatch
//! between measured acceleration (finite velocity differences) and the
//! nominal thrust-minus-gravity acceleration:
//!
//! d̂ ← d̂ + dt · K · (a_meas − a_nom − d̂)
//!
//! The innovation term drives d̂ toward the true disturbance with a rate set
//! by the gain matrix K.

use nalgebra::{Matrix3, Vector3};

use crate::dynamics::SixRotorDynamics;
use crate::gravity_vector;
use crate::simulation::SimTrace;

/// Disturbance observer with tunable gain
#[derive(Debug, Clone)]
pub struct DisturbanceObserver {
    mass: f64,
    gain: Matrix3<f64>,
    estimate: Vector3<f64>,
}

impl DisturbanceObserver {
    /// Observer with identity gain
    pub fn new(mass: f64) -> Self {
        Self::with_gain(mass, Matrix3::identity())
    }

    pub fn with_gain(mass: f64, gain: Matrix3<f64>) -> Self {
        Self {
            mass,
            gain,
            estimate: Vector3::zeros(),
        }
    }

    /// Current disturbance estimate [m/s²]
    pub fn estimate(&self) -> Vector3<f64> {
        self.estimate
    }

    /// Reset the estimate to zero
    pub fn reset(&mut self) {
        self.estimate = Vector3::zeros();
    }

    /// One observer update over an interval of length `dt`
    ///
    /// `velocity_before`/`velocity_after` bracket the interval;
    /// `thrust_axis` and `total_thrust` describe the command held over it.
    pub fn update(
        &mut self,
        velocity_before: &Vector3<f64>,
        velocity_after: &Vector3<f64>,
        thrust_axis: &Vector3<f64>,
        total_thrust: f64,
        dt: f64,
    ) -> Vector3<f64> {
        let measured = (velocity_after - velocity_before) / dt;
        let nominal = total_thrust / self.mass * thrust_axis + gravity_vector();

        let innovation = measured - nominal - self.estimate;
        self.estimate += dt * (self.gain * innovation);
        self.estimate
    }

    /// Run the observer over a recorded trace
    ///
    /// Returns one estimate per sample interval (`trace.len() - 1` entries),
    /// using the command held during each interval. The nominal model
    /// ignores drag, so aerodynamic resistance shows up in the estimate
    /// along with any true disturbance.
    pub fn estimate_trace(
        &mut self,
        trace: &SimTrace,
        dynamics: &SixRotorDynamics,
    ) -> Vec<Vector3<f64>> {
        let axis = dynamics.thrust_axis();
        trace
            .samples
            .windows(2)
            .map(|pair| {
                let (before, after) = (&pair[0], &pair[1]);
                let dt = after.time - before.time;
                let thrust = dynamics.total_thrust(&before.command);
                self.update(
                    &before.state.velocity,
                    &after.state.velocity,
                    &axis,
                    thrust,
                    dt,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::dynamics::{RotorCommand, SixRotorParams};
    use crate::ROTOR_COUNT;

    #[test]
    fn converges_to_constant_disturbance() {
        let params = SixRotorParams::default();
        let mut observer = DisturbanceObserver::new(params.mass);

        // Hover thrust: nominal acceleration is exactly zero
        let speed =
            (params.hover_thrust() / (params.thrust_coeff * ROTOR_COUNT as f64)).sqrt();
        let dynamics = SixRotorDynamics::new(params.clone());
        let thrust = dynamics.total_thrust(&RotorCommand::uniform(speed));

        let disturbance = Vector3::new(0.5, 0.3, 0.0);
        let dt = 0.01;
        let axis = Vector3::new(0.0, 0.0, 1.0);

        // Velocity grows as v(t) = d·t under the constant disturbance
        let mut velocity = Vector3::zeros();
        for _ in 0..1000 {
            let next = velocity + disturbance * dt;
            observer.update(&velocity, &next, &axis, thrust, dt);
            velocity = next;
        }

        assert_relative_eq!(observer.estimate(), disturbance, epsilon = 1e-3);
    }

    #[test]
    fn zero_mismatch_keeps_estimate_at_zero() {
        let params = SixRotorParams::default();
        let mut observer = DisturbanceObserver::new(params.mass);

        let speed =
            (params.hover_thrust() / (params.thrust_coeff * ROTOR_COUNT as f64)).sqrt();
        let dynamics = SixRotorDynamics::new(params);
        let thrust = dynamics.total_thrust(&RotorCommand::uniform(speed));

        let v = Vector3::zeros();
        for _ in 0..100 {
            observer.update(&v, &v, &Vector3::new(0.0, 0.0, 1.0), thrust, 0.01);
        }

        assert_relative_eq!(observer.estimate().norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn reset_clears_the_estimate() {
        let mut observer = DisturbanceObserver::new(6.0);
        observer.update(
            &Vector3::zeros(),
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, 0.0, 1.0),
            0.0,
            0.1,
        );
        assert!(observer.estimate().norm() > 0.0);

        observer.reset();
        assert_relative_eq!(observer.estimate().norm(), 0.0);
    }
}
