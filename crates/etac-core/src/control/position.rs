//! PD position tracking controller
//!
//! Computes a desired acceleration from position and velocity errors with
//! gravity feedforward, projects it onto the vehicle's fixed thrust axis,
//! and allocates rotor speeds through the FDI compensator.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::control::{ControlDivergence, Controller, FdiCompensator, ReferencePoint};
use crate::dynamics::{RotorCommand, SixRotorParams, UavState};

/// Position controller gains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionGains {
    /// Proportional gain
    pub kp: Vector3<f64>,
    /// Derivative gain
    pub kd: Vector3<f64>,
}

impl Default for PositionGains {
    fn default() -> Self {
        Self {
            kp: Vector3::new(6.0, 6.0, 8.0),
            kd: Vector3::new(4.0, 4.0, 5.0),
        }
    }
}

/// PD tracking controller with gravity feedforward
#[derive(Debug, Clone)]
pub struct PdPositionController {
    /// Controller gains
    pub gains: PositionGains,
    params: SixRotorParams,
    thrust_axis: Vector3<f64>,
    fdi: FdiCompensator,
}

impl PdPositionController {
    pub fn new(gains: PositionGains, params: SixRotorParams) -> Self {
        let thrust_axis = params.attitude.thrust_axis();
        Self {
            gains,
            params,
            thrust_axis,
            fdi: FdiCompensator::default(),
        }
    }

    /// Access the fault compensator (e.g. to inject rotor faults)
    pub fn fdi_mut(&mut self) -> &mut FdiCompensator {
        &mut self.fdi
    }

    /// Desired acceleration from tracking errors
    ///
    /// a_des = kp ∘ (p_ref − p) + kd ∘ (v_ref − v)
    fn desired_acceleration(&self, state: &UavState, reference: &ReferencePoint) -> Vector3<f64> {
        let pos_error = reference.position - state.position;
        let vel_error = reference.velocity - state.velocity;

        self.gains.kp.component_mul(&pos_error) + self.gains.kd.component_mul(&vel_error)
    }
}

impl Controller for PdPositionController {
    fn compute_control(
        &mut self,
        state: &UavState,
        reference: &ReferencePoint,
    ) -> Result<RotorCommand, ControlDivergence> {
        if !state.is_finite() {
            return Err(ControlDivergence::new("non-finite state input"));
        }

        // Specific force demand: tracking acceleration plus gravity hold
        let force = self.desired_acceleration(state, reference)
            + Vector3::new(0.0, 0.0, self.params.gravity);

        // Only the component along the fixed thrust axis is realizable
        let thrust = self.params.mass * force.dot(&self.thrust_axis);

        let command = self.fdi.allocate(thrust, self.params.thrust_coeff);
        if !command.is_finite() {
            return Err(ControlDivergence::new("non-finite rotor command"));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::dynamics::SixRotorDynamics;

    fn level_controller() -> PdPositionController {
        PdPositionController::new(PositionGains::default(), SixRotorParams::default())
    }

    #[test]
    fn holds_hover_at_setpoint() {
        let mut controller = level_controller();
        let state = UavState::at_rest(Vector3::new(0.0, 0.0, 2.0));
        let reference = ReferencePoint::hover(state.position);

        let command = controller.compute_control(&state, &reference).unwrap();

        // At the setpoint the commanded thrust exactly cancels gravity
        let dynamics = SixRotorDynamics::new(SixRotorParams::default());
        let acc = dynamics.acceleration(&state, &command, &Vector3::zeros());
        assert_relative_eq!(acc.norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn climbs_toward_reference_above() {
        let mut controller = level_controller();
        let state = UavState::at_rest(Vector3::zeros());
        let reference = ReferencePoint::hover(Vector3::new(0.0, 0.0, 1.0));

        let command = controller.compute_control(&state, &reference).unwrap();

        let dynamics = SixRotorDynamics::new(SixRotorParams::default());
        let acc = dynamics.acceleration(&state, &command, &Vector3::zeros());
        assert!(acc.z > 0.0, "should accelerate upward toward the reference");
    }

    #[test]
    fn damps_downward_motion() {
        let mut controller = level_controller();
        let falling = UavState::new(Vector3::zeros(), Vector3::new(0.0, 0.0, -1.0));
        let at_rest = UavState::at_rest(Vector3::zeros());
        let reference = ReferencePoint::hover(Vector3::zeros());

        let cmd_falling = controller.compute_control(&falling, &reference).unwrap();
        let cmd_rest = controller.compute_control(&at_rest, &reference).unwrap();

        let dynamics = SixRotorDynamics::new(SixRotorParams::default());
        assert!(
            dynamics.total_thrust(&cmd_falling) > dynamics.total_thrust(&cmd_rest),
            "falling vehicle should be commanded more thrust"
        );
    }

    #[test]
    fn rejects_non_finite_state() {
        let mut controller = level_controller();
        let mut state = UavState::default();
        state.position.z = f64::NAN;

        let result = controller.compute_control(&state, &ReferencePoint::default());
        assert!(result.is_err());
    }

    #[test]
    fn reallocates_after_rotor_fault() {
        let mut controller = level_controller();
        let state = UavState::at_rest(Vector3::zeros());
        let reference = ReferencePoint::hover(state.position);

        let healthy = controller.compute_control(&state, &reference).unwrap();
        controller.fdi_mut().mark_faulty(1);
        let degraded = controller.compute_control(&state, &reference).unwrap();

        let dynamics = SixRotorDynamics::new(SixRotorParams::default());
        assert_relative_eq!(degraded.speeds[1], 0.0);
        assert_relative_eq!(
            dynamics.total_thrust(&degraded),
            dynamics.total_thrust(&healthy),
            epsilon = 1e-10
        );
    }
}
