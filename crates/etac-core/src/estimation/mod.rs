//! State estimation for ETAC
//!
//! Implements the lumped-disturbance observer. Estimation runs as an
//! offline pass over a recorded trace so the simulation hot loop stays free
//! of estimation work.

pub mod observer;

pub use observer::*;
