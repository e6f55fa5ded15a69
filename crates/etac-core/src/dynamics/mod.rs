//! Dynamics models for ETAC
//!
//! - Six-rotor UAV translational dynamics (fixed attitude)
//! - External disturbance models (wind gusts)

pub mod six_rotor;
pub mod disturbance;

pub use six_rotor::*;
pub use disturbance::*;
