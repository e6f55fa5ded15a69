//! Simulation configuration
//!
//! Plain data structures describing one run. The library never parses files
//! or CLI flags; callers construct (or deserialize) a [`SimConfig`] and hand
//! it to the simulator, which validates it once at construction.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::Reference;
use crate::dynamics::{Disturbance, SixRotorParams, UavState};
use crate::math::EulerAngles;
use crate::trigger::TriggerCondition;
use crate::GRAVITY;

/// Configuration errors, detected at simulator construction
///
/// All of these are fatal: a failed configuration is never retried.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("fine integration step must be positive, got {0}")]
    NonPositiveTimeStep(f64),
    #[error("simulation horizon must be positive, got {0}")]
    NonPositiveHorizon(f64),
    #[error("horizon {horizon} is shorter than one fine step {dt}")]
    HorizonShorterThanStep { dt: f64, horizon: f64 },
    #[error("trigger threshold must be positive, got {0}")]
    NonPositiveThreshold(f64),
    #[error("vehicle mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("thrust coefficient must be positive, got {0}")]
    NonPositiveThrustCoeff(f64),
}

/// Complete configuration of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fine integration step [s]
    pub dt: f64,
    /// Total simulated time [s]
    pub horizon: f64,
    /// Triggering law
    pub trigger: TriggerCondition,
    /// Vehicle physical parameters
    pub physics: UavPhysicsConfig,
    /// Initial state
    pub initial_state: InitialStateConfig,
    /// External disturbance
    pub disturbance: Disturbance,
    /// Reference trajectory
    pub reference: Reference,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            horizon: 2.0,
            trigger: TriggerCondition::default(),
            physics: UavPhysicsConfig::default(),
            initial_state: InitialStateConfig::default(),
            disturbance: Disturbance::default(),
            reference: Reference::default(),
        }
    }
}

impl SimConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt > 0.0) {
            return Err(ConfigError::NonPositiveTimeStep(self.dt));
        }
        if !(self.horizon > 0.0) {
            return Err(ConfigError::NonPositiveHorizon(self.horizon));
        }
        if self.horizon < self.dt {
            return Err(ConfigError::HorizonShorterThanStep {
                dt: self.dt,
                horizon: self.horizon,
            });
        }
        let sigma = self.trigger.base_threshold();
        if !(sigma > 0.0) {
            return Err(ConfigError::NonPositiveThreshold(sigma));
        }
        if !(self.physics.mass > 0.0) {
            return Err(ConfigError::NonPositiveMass(self.physics.mass));
        }
        if !(self.physics.thrust_coeff > 0.0) {
            return Err(ConfigError::NonPositiveThrustCoeff(self.physics.thrust_coeff));
        }
        Ok(())
    }

    /// Number of fine steps in one run
    ///
    /// Timestamps are k·dt for k = 1..=step_count, so the clock never
    /// accumulates floating-point drift.
    pub fn step_count(&self) -> usize {
        (self.horizon / self.dt).round() as usize
    }
}

/// Vehicle physical parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UavPhysicsConfig {
    /// Mass [kg]
    pub mass: f64,
    /// Gravitational acceleration [m/s²]
    pub gravity: f64,
    /// Diagonal aerodynamic resistance coefficients [N·s/m]
    pub drag: Vector3<f64>,
    /// Thrust coefficient p̆ [N·s²/rad²]
    pub thrust_coeff: f64,
    /// Fixed attitude as ZYX Euler angles
    pub attitude: EulerAngles,
}

impl Default for UavPhysicsConfig {
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

impl UavPhysicsConfig {
    pub fn to_params(&self) -> SixRotorParams {
        SixRotorParams {
            mass: self.mass,
            gravity: self.gravity,
            drag: self.drag,
            thrust_coeff: self.thrust_coeff,
            attitude: self.attitude,
        }
    }
}

/// Initial state configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitialStateConfig {
    /// Initial position [m]
    pub position: Vector3<f64>,
    /// Initial velocity [m/s]
    pub velocity: Vector3<f64>,
}

impl InitialStateConfig {
    pub fn to_state(&self) -> UavState {
        UavState::new(self.position, self.velocity)
    }
}
