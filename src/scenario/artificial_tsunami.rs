//! Synthetic tsunami scenario: a deep flat ocean with an analytic seabed
//! displacement patch, no input files required.

use crate::types::{BoundaryEdge, BoundaryType, PI, Real};

use super::Scenario;

/// Shape of the analytic displacement patch.
///
/// The patch is the product of a full sine period in x and a downward
/// parabola in y, supported on the square of side `period` centered at
/// `(offset_x, offset_y)`:
///
/// d(x, y) = amplitude · sin((x/p + 1)·π) · (1 - (y/p)²),  p = period/2
#[derive(Clone, Copy, Debug)]
pub struct DisplacementConfig {
    /// Patch center, x
    pub offset_x: Real,
    /// Patch center, y
    pub offset_y: Real,
    /// Side length of the square support
    pub period: Real,
    /// Peak vertical displacement in meters
    pub amplitude: Real,
}

impl Default for DisplacementConfig {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            period: 200_000.0,
            amplitude: 5.0,
        }
    }
}

impl DisplacementConfig {
    /// Evaluate the displacement at `(x, y)`; zero outside the support.
    pub fn evaluate(&self, x: Real, y: Real) -> Real {
        let x = x - self.offset_x;
        let y = y - self.offset_y;
        let p_half = 0.5 * self.period;

        if p_half == 0.0 || x < -p_half || x > p_half || y < -p_half || y > p_half {
            return 0.0;
        }

        let dx = ((x / p_half + 1.0) * PI).sin();
        let dy = 1.0 - (y / p_half) * (y / p_half);
        self.amplitude * dx * dy
    }
}

/// A 1000 m deep ocean at rest, perturbed by a [`DisplacementConfig`]
/// patch at the domain center. Domain extents are ±1 000 000 m.
#[derive(Clone, Copy, Debug)]
pub struct ArtificialTsunamiScenario {
    boundary_type: BoundaryType,
    displacement: DisplacementConfig,
}

impl ArtificialTsunamiScenario {
    /// Create with the default displacement patch.
    pub fn new(boundary_type: BoundaryType) -> Self {
        Self {
            boundary_type,
            displacement: DisplacementConfig::default(),
        }
    }

    /// Create with a custom displacement patch.
    pub fn with_displacement(boundary_type: BoundaryType, displacement: DisplacementConfig) -> Self {
        Self {
            boundary_type,
            displacement,
        }
    }
}

impl Scenario for ArtificialTsunamiScenario {
    fn bathymetry_before_displacement(&self, _x: Real, _y: Real) -> Real {
        -1000.0
    }

    fn displacement(&self, x: Real, y: Real) -> Real {
        self.displacement.evaluate(x, y)
    }

    fn boundary_type(&self, _edge: BoundaryEdge) -> BoundaryType {
        self.boundary_type
    }

    fn boundary_pos(&self, edge: BoundaryEdge) -> Real {
        match edge {
            BoundaryEdge::Left | BoundaryEdge::Bottom => -1_000_000.0,
            BoundaryEdge::Right | BoundaryEdge::Top => 1_000_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Real = 1e-12;

    #[test]
    fn test_displacement_zero_outside_support() {
        let c = DisplacementConfig {
            offset_x: 0.0,
            offset_y: 0.0,
            period: 10.0,
            amplitude: 2.0,
        };
        assert_eq!(c.evaluate(6.0, 0.0), 0.0);
        assert_eq!(c.evaluate(0.0, -5.1), 0.0);
        assert_eq!(c.evaluate(100.0, 100.0), 0.0);
    }

    #[test]
    fn test_displacement_center_is_zero() {
        // sin((0 + 1)·π) = 0: the patch crosses zero along x = offset_x.
        let c = DisplacementConfig {
            offset_x: 0.0,
            offset_y: 0.0,
            period: 10.0,
            amplitude: 2.0,
        };
        assert!(c.evaluate(0.0, 0.0).abs() < TOL);
    }

    #[test]
    fn test_displacement_antisymmetric_in_x() {
        let c = DisplacementConfig {
            offset_x: 0.0,
            offset_y: 0.0,
            period: 10.0,
            amplitude: 2.0,
        };
        let left = c.evaluate(-2.5, 0.0);
        let right = c.evaluate(2.5, 0.0);
        assert!((left + right).abs() < TOL);
        assert!(left.abs() > 0.1, "patch should be non-trivial");
    }

    #[test]
    fn test_displacement_peak_amplitude() {
        // x = -p/2 gives sin(π/2) = 1, y = 0 gives the parabola's apex.
        let c = DisplacementConfig {
            offset_x: 0.0,
            offset_y: 0.0,
            period: 10.0,
            amplitude: 2.0,
        };
        assert!((c.evaluate(-2.5, 0.0) - 2.0).abs() < TOL);
    }

    #[test]
    fn test_degenerate_period_is_flat() {
        let c = DisplacementConfig {
            offset_x: 0.0,
            offset_y: 0.0,
            period: 0.0,
            amplitude: 2.0,
        };
        assert_eq!(c.evaluate(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_scenario_surface() {
        let s = ArtificialTsunamiScenario::new(BoundaryType::Outflow);
        assert_eq!(s.bathymetry_before_displacement(0.0, 0.0), -1000.0);
        assert_eq!(s.water_height(123.0, -456.0), 1000.0);
        assert_eq!(s.boundary_type(BoundaryEdge::Left), BoundaryType::Outflow);
        assert_eq!(s.boundary_pos(BoundaryEdge::Left), -1_000_000.0);
        assert_eq!(s.boundary_pos(BoundaryEdge::Top), 1_000_000.0);
        // Bathymetry inside the patch differs from the flat bed.
        let center_offset = s.bathymetry(-50_000.0, 0.0) - (-1000.0);
        assert!(center_offset.abs() > 0.0);
    }
}
