//! Six-rotor UAV translational dynamics
//!
//! Implements the point-mass model
//!
//! ṗ = v
//! v̇ = (P̄/m) · R e₃ − g e₃ − (Γ/m) v + d(t)
//!
//! where:
//! - p, v: position and velocity (world frame, z-up)
//! - P̄ = p̆ Σ Pₖ²: total thrust from the six rotor speeds
//! - R e₃: thrust axis, fixed by the vehicle's Euler-angle attitude
//! - Γ: diagonal aerodynamic resistance matrix
//! - d(t): lumped external disturbance acceleration

use nalgebra::{SVector, Vector3, Vector6};
use serde::{Deserialize, Serialize};

use crate::math::{rk4, EulerAngles};
use crate::{GRAVITY, ROTOR_COUNT};

/// Integrated UAV state: position and velocity in the world frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UavState {
    /// Position [m]
    pub position: Vector3<f64>,
    /// Velocity [m/s]
    pub velocity: Vector3<f64>,
}

impl UavState {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    /// State at the origin, at rest
    pub fn at_rest(position: Vector3<f64>) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
        }
    }

    /// Pack into a 6-vector [p; v] for the integrator
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        )
    }

    /// Unpack from a 6-vector [p; v]
    pub fn from_vector(x: &Vector6<f64>) -> Self {
        Self {
            position: Vector3::new(x[0], x[1], x[2]),
            velocity: Vector3::new(x[3], x[4], x[5]),
        }
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite()) && self.velocity.iter().all(|c| c.is_finite())
    }
}

/// Rotor speed command: the held control input
///
/// Six rotor speeds, constant between trigger events (zero-order hold).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotorCommand {
    /// Rotor speeds [rad/s]
    pub speeds: SVector<f64, ROTOR_COUNT>,
}

impl RotorCommand {
    pub fn new(speeds: SVector<f64, ROTOR_COUNT>) -> Self {
        Self { speeds }
    }

    /// All rotors at the same speed
    pub fn uniform(speed: f64) -> Self {
        Self {
            speeds: SVector::repeat(speed),
        }
    }

    /// True when every speed is finite
    pub fn is_finite(&self) -> bool {
        self.speeds.iter().all(|s| s.is_finite())
    }
}

/// Physical parameters of the six-rotor vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SixRotorParams {
    /// Mass [kg]
    pub mass: f64,
    /// Gravitational acceleration [m/s²]
    pub gravity: f64,
    /// Diagonal of the aerodynamic resistance matrix Γ [N·s/m]
    pub drag: Vector3<f64>,
    /// Thrust coefficient p̆ in P̄ = p̆ Σ Pₖ² [N·s²/rad²]
    pub thrust_coeff: f64,
    /// Fixed vehicle attitude
    pub attitude: EulerAngles,
}

impl Default for SixRotorParams {
    fn default() -> Self {
        Self {
            mass: 6.0,
            gravity: GRAVITY,
            drag: Vector3::new(0.1, 0.1, 0.1),
            thrust_coeff: 0.05,
            attitude: EulerAngles::level(),
        }
    }
}

impl SixRotorParams {
    /// Total thrust that balances gravity along the vertical
    pub fn hover_thrust(&self) -> f64 {
        self.mass * self.gravity
    }
}

/// State derivative of the translational model
#[derive(Debug, Clone, Copy)]
pub struct UavDerivative {
    /// Position derivative = velocity [m/s]
    pub velocity: Vector3<f64>,
    /// Velocity derivative = acceleration [m/s²]
    pub acceleration: Vector3<f64>,
}

/// Six-rotor dynamics model
///
/// Deterministic and side-effect-free; the attitude (and hence the thrust
/// axis) is fixed at construction.
#[derive(Debug, Clone)]
pub struct SixRotorDynamics {
    pub params: SixRotorParams,
    thrust_axis: Vector3<f64>,
}

impl SixRotorDynamics {
    pub fn new(params: SixRotorParams) -> Self {
        let thrust_axis = params.attitude.thrust_axis();
        Self { params, thrust_axis }
    }

    /// World-frame thrust direction R e₃
    pub fn thrust_axis(&self) -> Vector3<f64> {
        self.thrust_axis
    }

    /// Total thrust P̄ = p̆ Σ Pₖ² [N]
    pub fn total_thrust(&self, command: &RotorCommand) -> f64 {
        self.params.thrust_coeff * command.speeds.iter().map(|s| s * s).sum::<f64>()
    }

    /// Translational acceleration
    ///
    /// v̇ = (P̄/m) R e₃ − g e₃ − (Γ/m) v + d
    pub fn acceleration(
        &self,
        state: &UavState,
        command: &RotorCommand,
        disturbance: &Vector3<f64>,
    ) -> Vector3<f64> {
        let thrust = self.total_thrust(command) / self.params.mass * self.thrust_axis;
        let gravity = Vector3::new(0.0, 0.0, -self.params.gravity);
        let drag = self.params.drag.component_mul(&state.velocity) / self.params.mass;

        thrust + gravity - drag + disturbance
    }

    /// Full state derivative
    pub fn derivative(
        &self,
        state: &UavState,
        command: &RotorCommand,
        disturbance: &Vector3<f64>,
    ) -> UavDerivative {
        UavDerivative {
            velocity: state.velocity,
            acceleration: self.acceleration(state, command, disturbance),
        }
    }

    /// Advance the state by one fixed RK4 step
    ///
    /// The command and disturbance are held constant over the step; `dt` is
    /// the fine integration step, not the inter-event interval.
    pub fn step(
        &self,
        state: &UavState,
        command: &RotorCommand,
        disturbance: &Vector3<f64>,
        dt: f64,
    ) -> UavState {
        let x = state.to_vector();
        let next = rk4(&x, 0.0, dt, |_t, x| {
            let s = UavState::from_vector(x);
            let d = self.derivative(&s, command, disturbance);
            Vector6::new(
                d.velocity.x,
                d.velocity.y,
                d.velocity.z,
                d.acceleration.x,
                d.acceleration.y,
                d.acceleration.z,
            )
        });
        UavState::from_vector(&next)
    }
}
