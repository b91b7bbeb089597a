//! Scenario contract: the external collaborator that describes an initial
//! condition.
//!
//! A scenario answers pure point queries in world coordinates: water
//! height, momentum, bathymetry (before and after a displacement event),
//! boundary types and domain extents. [`crate::block::Block`] samples
//! these at cell centers during initialisation and never calls back into
//! the scenario afterwards.

mod artificial_tsunami;
mod synthetic;

pub use artificial_tsunami::{ArtificialTsunamiScenario, DisplacementConfig};
pub use synthetic::LinearSlopeScenario;

use crate::types::{BoundaryEdge, BoundaryType, Real};

/// Initial-condition provider for a simulation.
///
/// Every method has a default so minimal scenarios only override what they
/// care about: a flat -10 m bed filled to sea level, at rest, with
/// reflecting walls on a 100 m × 100 m domain.
pub trait Scenario {
    /// Initial water height at `(x, y)`.
    ///
    /// Defaults to filling the undisturbed bathymetry to sea level:
    /// `-min(B(x, y), 0)`.
    fn water_height(&self, x: Real, y: Real) -> Real {
        -self.bathymetry_before_displacement(x, y).min(0.0)
    }

    /// Initial x-momentum (h·u) at `(x, y)`. Defaults to rest.
    fn momentum_u(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    /// Initial y-momentum (h·v) at `(x, y)`. Defaults to rest.
    fn momentum_v(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    /// Bed elevation before the displacement event. Defaults to -10 m.
    fn bathymetry_before_displacement(&self, _x: Real, _y: Real) -> Real {
        -10.0
    }

    /// Vertical bed displacement (e.g. seismic uplift). Defaults to none.
    fn displacement(&self, _x: Real, _y: Real) -> Real {
        0.0
    }

    /// Effective bathymetry: undisturbed bed plus displacement.
    fn bathymetry(&self, x: Real, y: Real) -> Real {
        self.bathymetry_before_displacement(x, y) + self.displacement(x, y)
    }

    /// Boundary condition on an edge. Defaults to reflecting walls.
    fn boundary_type(&self, _edge: BoundaryEdge) -> BoundaryType {
        BoundaryType::Wall
    }

    /// World-coordinate position of a domain edge.
    fn boundary_pos(&self, edge: BoundaryEdge) -> Real {
        match edge {
            BoundaryEdge::Left | BoundaryEdge::Bottom => 0.0,
            BoundaryEdge::Right | BoundaryEdge::Top => 100.0,
        }
    }

    /// Simulated time span this scenario is designed for.
    fn end_simulation_time(&self) -> Real {
        100.0
    }

    /// Whether the scenario loaded successfully.
    ///
    /// File-backed scenarios override this; a `false` return tells the
    /// driver to discard the scenario without initialising a block.
    fn load_success(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DefaultScenario;
    impl Scenario for DefaultScenario {}

    #[test]
    fn test_default_fills_to_sea_level() {
        let s = DefaultScenario;
        assert_eq!(s.bathymetry_before_displacement(3.0, 4.0), -10.0);
        assert_eq!(s.water_height(3.0, 4.0), 10.0);
        assert_eq!(s.momentum_u(3.0, 4.0), 0.0);
        assert_eq!(s.momentum_v(3.0, 4.0), 0.0);
    }

    #[test]
    fn test_default_bathymetry_composition() {
        struct Uplifted;
        impl Scenario for Uplifted {
            fn displacement(&self, _x: Real, _y: Real) -> Real {
                2.5
            }
        }
        let s = Uplifted;
        assert_eq!(s.bathymetry(0.0, 0.0), -7.5);
        // Water height is taken before the displacement.
        assert_eq!(s.water_height(0.0, 0.0), 10.0);
    }

    #[test]
    fn test_default_above_sea_level_is_dry() {
        struct Island;
        impl Scenario for Island {
            fn bathymetry_before_displacement(&self, _x: Real, _y: Real) -> Real {
                5.0
            }
        }
        assert_eq!(Island.water_height(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_default_boundaries() {
        let s = DefaultScenario;
        for edge in BoundaryEdge::ALL {
            assert_eq!(s.boundary_type(edge), BoundaryType::Wall);
        }
        assert_eq!(s.boundary_pos(BoundaryEdge::Left), 0.0);
        assert_eq!(s.boundary_pos(BoundaryEdge::Top), 100.0);
        assert!(s.load_success());
    }
}
