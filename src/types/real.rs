//! Floating-point precision policy.
//!
//! All solver arithmetic is performed in [`Real`], which is `f64` by
//! default. Enabling the `single-precision` feature switches the whole
//! crate to `f32`, halving the memory footprint of the grid fields at the
//! cost of accuracy.

/// Floating-point type used for all physical quantities.
#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

/// Floating-point type used for all physical quantities.
#[cfg(feature = "single-precision")]
pub type Real = f32;

/// Gravitational acceleration in m/s².
///
/// World coordinates are meters; time is seconds.
pub const GRAVITY: Real = 9.81;

/// π at the active precision.
pub const PI: Real = core::f64::consts::PI as Real;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_value() {
        assert!((GRAVITY - 9.81).abs() < 1e-12);
    }
}
