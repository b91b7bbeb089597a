//! Core type vocabulary: precision policy and boundary descriptors.

mod boundary;
mod real;

pub use boundary::{BoundaryEdge, BoundaryType, EdgeData};
pub use real::{GRAVITY, PI, Real};
