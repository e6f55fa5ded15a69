//! # ETAC Core
//!
//! Event-Triggered Aerial Control - Core library
//!
//! Simulates a six-rotor UAV whose control command is recomputed only when a
//! state-dependent triggering condition fires, rather than on a fixed clock.
//! The plant evolves continuously on a fixed fine integration step while the
//! rotor command is held constant (zero-order hold) between trigger instants.
//!
//! ## Modules
//!
//! - [`math`]: Mathematical utilities (Euler-angle rotations, integrators)
//! - [`dynamics`]: Six-rotor UAV translational dynamics and disturbances
//! - [`control`]: Controllers, fault compensation, reference trajectories
//! - [`trigger`]: Event-triggering laws (error norms and thresholds)
//! - [`estimation`]: Disturbance observer
//! - [`simulation`]: Event-triggered simulation loop, configuration, traces

pub mod math;
pub mod dynamics;
pub mod control;
pub mod trigger;
pub mod estimation;
pub mod simulation;

// Common type aliases
use nalgebra::{Matrix3, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// Gravity constant [m/s²]
pub const GRAVITY: f64 = 9.81;

/// Number of rotors on the vehicle
pub const ROTOR_COUNT: usize = 6;

/// Gravity vector in the world frame (z-up convention)
pub fn gravity_vector() -> Vec3 {
    Vec3::new(0.0, 0.0, -GRAVITY)
}
