//! # fv-rs
//!
//! A finite-volume library for the 2D shallow water equations.
//!
//! This crate provides the building blocks for structured-grid
//! finite-volume tsunami simulation:
//! - Dense 2D grid storage with a ghost-cell layer
//! - An F-wave approximate Riemann solver with bathymetry source terms
//!   and dry-cell handling
//! - Dimensional splitting over a rectangular block
//! - Ghost-layer boundary conditions (reflecting wall, outflow, passive)
//! - Scenario abstractions for initial conditions and domain setup
//!
//! The typical driver loop initialises a [`block::Block`] from a
//! [`scenario::Scenario`], wraps it in a
//! [`block::DimensionalSplittingBlock`] and alternates
//! [`block::Block::set_ghost_layer`],
//! [`block::FluxScheme::compute_numerical_fluxes`] and
//! [`block::FluxScheme::update_unknowns`] with the block's own stability
//! bound, or simply calls [`block::FluxScheme::simulate`].

pub mod block;
pub mod grid;
pub mod scenario;
pub mod solver;
pub mod types;

// Re-export main types for convenience
pub use block::{
    Block, CFL_NUMBER, DRY_TOLERANCE, DimensionalSplittingBlock, FluxScheme, StabilityError,
};
pub use grid::Grid;
pub use scenario::{
    ArtificialTsunamiScenario, DisplacementConfig, LinearSlopeScenario, Scenario,
};
pub use solver::{NetUpdates, RiemannError, compute_net_updates};
pub use types::{BoundaryEdge, BoundaryType, EdgeData, GRAVITY, Real};
