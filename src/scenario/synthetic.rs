//! Small synthetic scenarios for verification runs.

use crate::types::{BoundaryEdge, Real};

use super::Scenario;

/// A tilted water surface, `h(x, y) = x + y`, over `n × n` unit cells.
///
/// Cell centers land on integer coordinates, so initialised heights are
/// exact and easy to assert against.
#[derive(Clone, Copy, Debug)]
pub struct LinearSlopeScenario {
    n: usize,
}

impl LinearSlopeScenario {
    /// Create a scenario spanning `n × n` unit cells.
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Number of cells per direction the scenario is sized for.
    pub fn cell_count(&self) -> usize {
        self.n
    }
}

impl Scenario for LinearSlopeScenario {
    fn water_height(&self, x: Real, y: Real) -> Real {
        x + y
    }

    fn boundary_pos(&self, edge: BoundaryEdge) -> Real {
        match edge {
            BoundaryEdge::Left | BoundaryEdge::Bottom => 0.5,
            BoundaryEdge::Right | BoundaryEdge::Top => self.n as Real + 0.5,
        }
    }

    fn end_simulation_time(&self) -> Real {
        10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_is_coordinate_sum() {
        let s = LinearSlopeScenario::new(8);
        assert_eq!(s.water_height(3.0, 5.0), 8.0);
        assert_eq!(s.cell_count(), 8);
    }

    #[test]
    fn test_domain_gives_unit_cells() {
        let s = LinearSlopeScenario::new(8);
        let width = s.boundary_pos(BoundaryEdge::Right) - s.boundary_pos(BoundaryEdge::Left);
        assert_eq!(width / 8.0, 1.0);
    }
}
