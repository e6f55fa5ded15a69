//! External disturbance models
//!
//! Lumped disturbances enter the translational dynamics as an additional
//! acceleration term. The step gust reproduces the classic wind-injection
//! experiment: no disturbance until an onset time, a constant push afterwards.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Time-indexed lumped disturbance acting on the vehicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Disturbance {
    /// No disturbance
    #[default]
    None,
    /// Constant disturbance acceleration [m/s²]
    Constant(Vector3<f64>),
    /// Step wind gust: zero before `onset`, constant afterwards
    Gust {
        /// Gust onset time [s]
        onset: f64,
        /// Gust acceleration [m/s²]
        acceleration: Vector3<f64>,
    },
}

impl Disturbance {
    /// Disturbance acceleration at time `t`
    pub fn acceleration(&self, t: f64) -> Vector3<f64> {
        match self {
            Disturbance::None => Vector3::zeros(),
            Disturbance::Constant(a) => *a,
            Disturbance::Gust { onset, acceleration } => {
                if t >= *onset {
                    *acceleration
                } else {
                    Vector3::zeros()
                }
            }
        }
    }
}
