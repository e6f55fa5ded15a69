//! Control laws for ETAC
//!
//! Controllers are invoked only at trigger instants; between instants the
//! simulation holds the last command (zero-order hold). The [`Controller`]
//! trait is the seam that lets analytic laws and stateful/learned policies
//! be swapped without touching the simulation loop.

pub mod reference;
pub mod position;
pub mod fixed;
pub mod fdi;

pub use reference::*;
pub use position::*;
pub use fixed::*;
pub use fdi::*;

use thiserror::Error;

use crate::dynamics::{RotorCommand, UavState};

/// Raised when a control law cannot produce a usable command
///
/// Surfaced instead of silently returning non-finite output, so the
/// simulation loop can abort the run with a tagged fault rather than
/// propagate NaNs through the plant.
#[derive(Debug, Clone, Error)]
#[error("control law diverged: {reason}")]
pub struct ControlDivergence {
    /// What went wrong (out-of-domain state, non-finite output, ...)
    pub reason: String,
}

impl ControlDivergence {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A control policy mapping (state, reference) to a rotor command
///
/// Implementations may hold internal state (gains, learned parameters,
/// accumulated statistics) but must be deterministic for identical inputs
/// within a single call.
pub trait Controller {
    /// Compute a fresh rotor command for the current state
    ///
    /// Called once per firing event, never per fine step.
    fn compute_control(
        &mut self,
        state: &UavState,
        reference: &ReferencePoint,
    ) -> Result<RotorCommand, ControlDivergence>;
}
