//! # ETAC Experiments
//!
//! Named simulation scenarios and parameter-sweep drivers built on
//! [`etac_core`]. Each run owns its own simulator and trace, so sweeps are
//! embarrassingly parallel at the run granularity; the drivers here execute
//! them sequentially and collect per-run event statistics.

pub mod scenarios;
pub mod sweep;

pub use scenarios::*;
pub use sweep::*;
