//! Approximate Riemann solvers.
//!
//! Currently a single solver: the F-wave method with Roe linearization
//! and a well-balanced bathymetry source term.

pub mod fwave;

pub use fwave::{NetUpdates, RiemannError, compute_net_updates};
