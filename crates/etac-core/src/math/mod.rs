//! Mathematical utilities for ETAC
//!
//! Implements Euler-angle rotation utilities and the fixed-step
//! numerical integrators used by the dynamics.

pub mod rotation;
pub mod integrator;

pub use rotation::*;
pub use integrator::*;
