//! Rotor fault detection, isolation, and thrust reallocation
//!
//! Compares commanded and measured rotor speeds to maintain a per-rotor
//! health mask, and reallocates a desired total thrust across the rotors
//! still marked healthy.

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

use crate::dynamics::RotorCommand;
use crate::ROTOR_COUNT;

/// Fault detection and isolation compensator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdiCompensator {
    /// Speed-error threshold above which a rotor is declared faulty [rad/s]
    pub threshold: f64,
    /// Per-rotor health: 1.0 healthy, 0.0 faulty
    health: SVector<f64, ROTOR_COUNT>,
}

impl Default for FdiCompensator {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FdiCompensator {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            health: SVector::repeat(1.0),
        }
    }

    /// Current health mask
    pub fn health(&self) -> &SVector<f64, ROTOR_COUNT> {
        &self.health
    }

    /// Number of rotors currently marked healthy
    pub fn healthy_count(&self) -> usize {
        self.health.iter().filter(|&&h| h > 0.5).count()
    }

    /// Declare a single rotor faulty
    pub fn mark_faulty(&mut self, rotor: usize) {
        self.health[rotor] = 0.0;
    }

    /// Restore all rotors to healthy
    pub fn reset(&mut self) {
        self.health = SVector::repeat(1.0);
    }

    /// Update the health mask by comparing measured against commanded speeds
    pub fn detect(
        &mut self,
        measured: &RotorCommand,
        commanded: &RotorCommand,
    ) -> &SVector<f64, ROTOR_COUNT> {
        for i in 0..ROTOR_COUNT {
            let error = (measured.speeds[i] - commanded.speeds[i]).abs();
            self.health[i] = if error < self.threshold { 1.0 } else { 0.0 };
        }
        &self.health
    }

    /// Allocate a desired total thrust across the healthy rotors
    ///
    /// Healthy rotors share the thrust equally: Pₖ = √(P̄ / (p̆ · n_healthy)).
    /// Faulty rotors are commanded to zero; with no healthy rotors the whole
    /// command is zero. Negative thrust demands clamp to zero.
    pub fn allocate(&self, thrust: f64, thrust_coeff: f64) -> RotorCommand {
        let healthy = self.healthy_count();
        if healthy == 0 {
            return RotorCommand::default();
        }

        let thrust = thrust.max(0.0);
        let speed = (thrust / (thrust_coeff * healthy as f64)).sqrt();

        let mut speeds = SVector::<f64, ROTOR_COUNT>::zeros();
        for i in 0..ROTOR_COUNT {
            if self.health[i] > 0.5 {
                speeds[i] = speed;
            }
        }
        RotorCommand::new(speeds)
    }
}
