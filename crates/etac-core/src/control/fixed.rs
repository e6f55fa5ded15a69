//! Constant-speed open-loop controller
//!
//! Returns the same rotor command at every firing event. Useful as an
//! open-loop baseline: the plant trajectory is then independent of the
//! triggering threshold, which isolates the trigger bookkeeping itself.

use crate::control::{ControlDivergence, Controller, ReferencePoint};
use crate::dynamics::{RotorCommand, SixRotorParams, UavState};
use crate::ROTOR_COUNT;

/// Controller that always commands the same rotor speeds
#[derive(Debug, Clone)]
pub struct FixedSpeedController {
    command: RotorCommand,
}

impl FixedSpeedController {
    pub fn new(command: RotorCommand) -> Self {
        Self { command }
    }

    /// All rotors at the same speed
    pub fn uniform(speed: f64) -> Self {
        Self::new(RotorCommand::uniform(speed))
    }

    /// Speeds whose vertical thrust component balances gravity
    ///
    /// Requires an upward-pointing thrust axis; with a tilted attitude the
    /// residual lateral thrust makes the vehicle drift sideways.
    pub fn hover_balanced(params: &SixRotorParams) -> Self {
        let axis_z = params.attitude.thrust_axis().z;
        assert!(axis_z > 0.0, "thrust axis must point upward");

        let thrust = params.hover_thrust() / axis_z;
        let speed = (thrust / (params.thrust_coeff * ROTOR_COUNT as f64)).sqrt();
        Self::uniform(speed)
    }

    /// The command this controller always returns
    pub fn command(&self) -> &RotorCommand {
        &self.command
    }
}

impl Controller for FixedSpeedController {
    fn compute_control(
        &mut self,
        _state: &UavState,
        _reference: &ReferencePoint,
    ) -> Result<RotorCommand, ControlDivergence> {
        Ok(self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use crate::dynamics::SixRotorDynamics;
    use crate::math::EulerAngles;

    #[test]
    fn returns_the_same_command_every_call() {
        let mut controller = FixedSpeedController::uniform(12.0);
        let a = controller
            .compute_control(&UavState::default(), &ReferencePoint::default())
            .unwrap();
        let b = controller
            .compute_control(
                &UavState::at_rest(Vector3::new(5.0, -2.0, 1.0)),
                &ReferencePoint::hover(Vector3::new(0.0, 0.0, 9.0)),
            )
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hover_balanced_cancels_vertical_acceleration() {
        let mut params = SixRotorParams::default();
        params.attitude = EulerAngles::new(0.1, 0.05, 0.2);
        let dynamics = SixRotorDynamics::new(params.clone());

        let controller = FixedSpeedController::hover_balanced(&params);
        let acc = dynamics.acceleration(
            &UavState::default(),
            controller.command(),
            &Vector3::zeros(),
        );

        assert_relative_eq!(acc.z, 0.0, epsilon = 1e-10);
    }
}
