//! Event-triggering laws
//!
//! The trigger decides, once per fine integration step, whether the control
//! command must be recomputed. It compares the deviation of the current
//! state from the anchor state captured at the last firing event against a
//! threshold σ. Both the error norm and the threshold are configuration,
//! not hardcoded: swapping the triggering law must not touch the loop.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::control::ReferencePoint;
use crate::dynamics::UavState;

/// Norm used to measure state deviations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum ErrorNorm {
    /// Euclidean norm over the full [position; velocity] state
    #[default]
    State,
    /// Euclidean norm over position only
    Position,
    /// Componentwise-weighted Euclidean norm
    Weighted {
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    },
}

impl ErrorNorm {
    /// Apply the norm to a (position, velocity) deviation pair
    fn apply(&self, dp: &Vector3<f64>, dv: &Vector3<f64>) -> f64 {
        match self {
            ErrorNorm::State => (dp.norm_squared() + dv.norm_squared()).sqrt(),
            ErrorNorm::Position => dp.norm(),
            ErrorNorm::Weighted { position, velocity } => {
                let wp = position.component_mul(dp);
                let wv = velocity.component_mul(dv);
                (wp.norm_squared() + wv.norm_squared()).sqrt()
            }
        }
    }
}

/// Triggering threshold σ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Threshold {
    /// Constant threshold
    Fixed(f64),
    /// State-dependent threshold σ(x) = base + scale · ‖x − x_ref‖
    ///
    /// Relative triggering: the larger the tracking error, the more
    /// deviation from the anchor is tolerated before refreshing control.
    StateDependent { base: f64, scale: f64 },
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Fixed(0.1)
    }
}

/// The triggering law: error norm plus threshold
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerCondition {
    pub norm: ErrorNorm,
    pub threshold: Threshold,
}

impl TriggerCondition {
    /// Fixed threshold with the full-state norm
    pub fn fixed(sigma: f64) -> Self {
        Self {
            norm: ErrorNorm::State,
            threshold: Threshold::Fixed(sigma),
        }
    }

    /// Triggering error: deviation of the current state from the anchor
    ///
    /// This is the value recorded with each firing event.
    pub fn error(&self, anchor: &UavState, current: &UavState) -> f64 {
        self.norm.apply(
            &(current.position - anchor.position),
            &(current.velocity - anchor.velocity),
        )
    }

    /// Threshold value at the current state
    pub fn threshold_at(&self, current: &UavState, reference: &ReferencePoint) -> f64 {
        match &self.threshold {
            Threshold::Fixed(sigma) => *sigma,
            Threshold::StateDependent { base, scale } => {
                let tracking = self.norm.apply(
                    &(current.position - reference.position),
                    &(current.velocity - reference.velocity),
                );
                base + scale * tracking
            }
        }
    }

    /// Fire when the triggering error reaches the threshold
    ///
    /// Pure and deterministic; evaluated once per fine step.
    pub fn should_fire(
        &self,
        anchor: &UavState,
        current: &UavState,
        reference: &ReferencePoint,
    ) -> bool {
        self.error(anchor, current) >= self.threshold_at(current, reference)
    }

    /// Smallest positive threshold this law can report, used by validation
    pub fn base_threshold(&self) -> f64 {
        match &self.threshold {
            Threshold::Fixed(sigma) => *sigma,
            Threshold::StateDependent { base, .. } => *base,
        }
    }
}
