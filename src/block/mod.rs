//! Grid state, scenario initialisation and ghost-layer machinery.
//!
//! A [`Block`] owns the four per-cell fields (water height, the two
//! momentum components and bathymetry) over an `nx × ny` interior grid
//! plus a one-cell ghost layer on every side. It is scheme-agnostic: the
//! flux computation and the update are deferred to a [`FluxScheme`]
//! implementation such as
//! [`dimensional_splitting::DimensionalSplittingBlock`].
//!
//! Index convention: `field[j][i]` with `j ∈ [0, ny+1]` the row (y) and
//! `i ∈ [0, nx+1]` the column (x); interior cells are `[1, nx] × [1, ny]`.

pub mod dimensional_splitting;

pub use dimensional_splitting::DimensionalSplittingBlock;

use log::{debug, trace, warn};
use thiserror::Error;

use crate::grid::Grid;
use crate::scenario::Scenario;
use crate::types::{BoundaryEdge, BoundaryType, EdgeData, GRAVITY, Real};

/// Cells with height at or below this are ignored by the cell-centered
/// time-step estimate.
pub const DRY_TOLERANCE: Real = 0.1;

/// Default CFL number for [`Block::compute_max_time_step`].
pub const CFL_NUMBER: Real = 0.4;

/// Numerical instability detected while applying a time step.
///
/// The step's results are unusable; the driver should discard the state
/// (typically by resetting the scenario) and surface a warning.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StabilityError {
    /// The y-sweep developed waves faster than the time step chosen from
    /// the x-sweep bound allows.
    #[error("CFL condition violated in y-sweep: dt = {dt} exceeds the stable limit {limit}")]
    CflViolation { dt: Real, limit: Real },
}

/// The numerical scheme seam.
///
/// A scheme owns a [`Block`] and provides the flux computation and the
/// update; the grid/boundary machinery stays in `Block`. The two calls
/// strictly alternate: `compute_numerical_fluxes` stages per-interface
/// net updates and derives the stability bound, `update_unknowns` applies
/// them with a concrete `dt`.
pub trait FluxScheme {
    /// Shared grid state.
    fn block(&self) -> &Block;

    /// Shared grid state, mutable.
    fn block_mut(&mut self) -> &mut Block;

    /// Solve the Riemann problems on every interface and store the net
    /// updates; updates the block's `max_time_step`.
    fn compute_numerical_fluxes(&mut self);

    /// Apply the staged net updates with time step `dt` (an Euler step).
    fn update_unknowns(&mut self, dt: Real) -> Result<(), StabilityError>;

    /// Whether any interface solve of the most recent sweeps hit a
    /// degenerate Riemann state.
    fn has_error(&self) -> bool;

    /// One full step with a fixed time step size.
    fn simulate_time_step(&mut self, dt: Real) -> Result<(), StabilityError> {
        self.compute_numerical_fluxes();
        self.update_unknowns(dt)
    }

    /// Run from `t_start` until `t_end` with self-chosen time steps.
    ///
    /// Single-block convenience loop: ghost layer, fluxes, update, using
    /// the block's own stability bound each step. Returns the simulated
    /// time actually reached (the last step may overshoot `t_end`).
    fn simulate(&mut self, t_start: Real, t_end: Real) -> Result<Real, StabilityError> {
        let mut t = t_start;
        loop {
            self.block_mut().set_ghost_layer();
            self.compute_numerical_fluxes();

            let dt = self.block().max_time_step();
            self.update_unknowns(dt)?;
            t += dt;
            trace!("simulation advanced to t = {}", t);

            if t >= t_end {
                return Ok(t);
            }
        }
    }
}

/// Grid state for a single rectangular block.
///
/// Fields are sized `(ny+2) × (nx+2)`; the outermost ring is the ghost
/// layer used to apply boundary conditions without special-casing edge
/// cells in the flux loops.
pub struct Block {
    pub(crate) nx: usize,
    pub(crate) ny: usize,
    pub(crate) dx: Real,
    pub(crate) dy: Real,

    /// Water height per cell
    pub(crate) h: Grid,
    /// x-momentum (h·u) per cell
    pub(crate) hu: Grid,
    /// y-momentum (h·v) per cell
    pub(crate) hv: Grid,
    /// Bathymetry per cell; `b > 0` marks a dry cell
    pub(crate) b: Grid,

    /// Boundary condition per edge; `None` until configured
    boundary: EdgeData<Option<BoundaryType>>,

    /// Stability bound from the most recent flux computation
    pub(crate) max_time_step: Real,

    offset_x: Real,
    offset_y: Real,
}

impl Block {
    /// Allocate a block of `nx × ny` interior cells with cell size
    /// `dx × dy`.
    ///
    /// Boundary types start unset and must be configured (directly or via
    /// [`Block::initialise_scenario`]) before the first ghost-layer
    /// application.
    ///
    /// # Panics
    ///
    /// Panics if `nx` or `ny` is zero, or if `dx` or `dy` is not
    /// strictly positive.
    pub fn new(nx: usize, ny: usize, dx: Real, dy: Real) -> Self {
        assert!(nx >= 1 && ny >= 1, "grid must have at least one cell per direction");
        assert!(dx > 0.0 && dy > 0.0, "cell size must be positive");

        Self {
            nx,
            ny,
            dx,
            dy,
            h: Grid::new(ny + 2, nx + 2),
            hu: Grid::new(ny + 2, nx + 2),
            hv: Grid::new(ny + 2, nx + 2),
            b: Grid::new(ny + 2, nx + 2),
            boundary: EdgeData::uniform(None),
            max_time_step: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// World x-coordinate of the center of column `i`.
    #[inline]
    fn cell_center_x(&self, i: usize) -> Real {
        self.offset_x + (i as Real - 0.5) * self.dx
    }

    /// World y-coordinate of the center of row `j`.
    #[inline]
    fn cell_center_y(&self, j: usize) -> Real {
        self.offset_y + (j as Real - 0.5) * self.dy
    }

    /// Initialise all fields and boundary types from a scenario.
    ///
    /// Height and momenta are sampled at interior cell centers;
    /// bathymetry is sampled over the full extended grid including the
    /// ghost layer. `(offset_x, offset_y)` is the world position of the
    /// lower-left corner of the interior domain.
    pub fn initialise_scenario<S: Scenario + ?Sized>(
        &mut self,
        offset_x: Real,
        offset_y: Real,
        scenario: &S,
    ) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;

        for j in 1..=self.ny {
            for i in 1..=self.nx {
                let x = self.cell_center_x(i);
                let y = self.cell_center_y(j);
                self.h[j][i] = scenario.water_height(x, y);
                self.hu[j][i] = scenario.momentum_u(x, y);
                self.hv[j][i] = scenario.momentum_v(x, y);
            }
        }

        for j in 0..=self.ny + 1 {
            for i in 0..=self.nx + 1 {
                let x = self.cell_center_x(i);
                let y = self.cell_center_y(j);
                self.b[j][i] = scenario.bathymetry(x, y);
            }
        }

        for edge in BoundaryEdge::ALL {
            self.set_boundary_type(edge, scenario.boundary_type(edge));
        }

        debug!(
            "initialised {}x{} block at offset ({}, {}), cell size {}x{}",
            self.nx, self.ny, offset_x, offset_y, self.dx, self.dy
        );
    }

    /// Overwrite the water height in all interior cells with
    /// `f(x, y)` evaluated at cell centers.
    pub fn set_water_height<F>(&mut self, f: F)
    where
        F: Fn(Real, Real) -> Real,
    {
        for j in 1..=self.ny {
            for i in 1..=self.nx {
                self.h[j][i] = f(self.cell_center_x(i), self.cell_center_y(j));
            }
        }
    }

    /// Overwrite the discharge in all interior cells from velocity
    /// functions `u(x, y)` and `v(x, y)`.
    ///
    /// The stored unknowns are momenta: `hu = u·h` and `hv = v·h` with
    /// the current height.
    pub fn set_discharge<U, V>(&mut self, u: U, v: V)
    where
        U: Fn(Real, Real) -> Real,
        V: Fn(Real, Real) -> Real,
    {
        for j in 1..=self.ny {
            for i in 1..=self.nx {
                let x = self.cell_center_x(i);
                let y = self.cell_center_y(j);
                self.hu[j][i] = u(x, y) * self.h[j][i];
                self.hv[j][i] = v(x, y) * self.h[j][i];
            }
        }
    }

    /// Set the bathymetry to a uniform value in all cells including the
    /// ghost layer.
    pub fn set_bathymetry(&mut self, value: Real) {
        self.b.fill(value);
    }

    /// Set the bathymetry from `f(x, y)` in all cells including the
    /// ghost layer.
    pub fn set_bathymetry_fn<F>(&mut self, f: F)
    where
        F: Fn(Real, Real) -> Real,
    {
        for j in 0..=self.ny + 1 {
            for i in 0..=self.nx + 1 {
                self.b[j][i] = f(self.cell_center_x(i), self.cell_center_y(j));
            }
        }
    }

    /// Set the boundary condition for one edge.
    ///
    /// Switching an edge to `Wall` or `Outflow` re-derives the ghost
    /// bathymetry (for all edges currently of those types, plus the
    /// corners) so that flux computations across the domain edge see a
    /// physically continuous bed.
    pub fn set_boundary_type(&mut self, edge: BoundaryEdge, boundary_type: BoundaryType) {
        self.boundary.set(edge, Some(boundary_type));

        if matches!(boundary_type, BoundaryType::Wall | BoundaryType::Outflow) {
            self.set_boundary_bathymetry();
        }
    }

    /// Set the same boundary condition on all four edges.
    pub fn set_boundary_types(&mut self, boundary_type: BoundaryType) {
        for edge in BoundaryEdge::ALL {
            self.set_boundary_type(edge, boundary_type);
        }
    }

    /// Copy interior bathymetry into the ghost layer on every edge whose
    /// boundary type is `Wall` or `Outflow`; corners always copy the
    /// nearest interior diagonal cell.
    fn set_boundary_bathymetry(&mut self) {
        let (nx, ny) = (self.nx, self.ny);

        if self.edge_mirrors_bathymetry(BoundaryEdge::Left) {
            for j in 0..=ny + 1 {
                self.b[j][0] = self.b[j][1];
            }
        }
        if self.edge_mirrors_bathymetry(BoundaryEdge::Right) {
            for j in 0..=ny + 1 {
                self.b[j][nx + 1] = self.b[j][nx];
            }
        }
        if self.edge_mirrors_bathymetry(BoundaryEdge::Bottom) {
            for i in 0..=nx + 1 {
                self.b[0][i] = self.b[1][i];
            }
        }
        if self.edge_mirrors_bathymetry(BoundaryEdge::Top) {
            for i in 0..=nx + 1 {
                self.b[ny + 1][i] = self.b[ny][i];
            }
        }

        self.b[0][0] = self.b[1][1];
        self.b[0][nx + 1] = self.b[1][nx];
        self.b[ny + 1][0] = self.b[ny][1];
        self.b[ny + 1][nx + 1] = self.b[ny][nx];
    }

    fn edge_mirrors_bathymetry(&self, edge: BoundaryEdge) -> bool {
        matches!(
            self.boundary.get(edge),
            Some(BoundaryType::Wall) | Some(BoundaryType::Outflow)
        )
    }

    /// Apply the configured boundary conditions to the ghost layer of
    /// `h`, `hu` and `hv`.
    ///
    /// `Wall` mirrors the height and tangential momentum and negates the
    /// normal momentum; `Outflow` mirrors the full state; `Passive` edges
    /// are skipped (their ghost values are managed by the embedding
    /// driver). The four corner ghost cells always mirror the nearest
    /// diagonal interior cell, independent of the edge types; this yields
    /// steady-state Riemann problems with both adjacent ghost cells.
    ///
    /// # Panics
    ///
    /// Panics if any edge's boundary type is still unset.
    pub fn set_ghost_layer(&mut self) {
        let (nx, ny) = (self.nx, self.ny);

        for edge in BoundaryEdge::ALL {
            let boundary_type = (*self.boundary.get(edge))
                .unwrap_or_else(|| panic!("boundary type for {} edge is not set", edge));

            if boundary_type == BoundaryType::Passive {
                continue;
            }
            // Wall negates the normal momentum component.
            let flip: Real = match boundary_type {
                BoundaryType::Wall => -1.0,
                _ => 1.0,
            };

            match edge {
                BoundaryEdge::Left => {
                    for j in 1..=ny {
                        self.h[j][0] = self.h[j][1];
                        self.hu[j][0] = flip * self.hu[j][1];
                        self.hv[j][0] = self.hv[j][1];
                    }
                }
                BoundaryEdge::Right => {
                    for j in 1..=ny {
                        self.h[j][nx + 1] = self.h[j][nx];
                        self.hu[j][nx + 1] = flip * self.hu[j][nx];
                        self.hv[j][nx + 1] = self.hv[j][nx];
                    }
                }
                BoundaryEdge::Bottom => {
                    for i in 1..=nx {
                        self.h[0][i] = self.h[1][i];
                        self.hu[0][i] = self.hu[1][i];
                        self.hv[0][i] = flip * self.hv[1][i];
                    }
                }
                BoundaryEdge::Top => {
                    for i in 1..=nx {
                        self.h[ny + 1][i] = self.h[ny][i];
                        self.hu[ny + 1][i] = self.hu[ny][i];
                        self.hv[ny + 1][i] = flip * self.hv[ny][i];
                    }
                }
            }
        }

        // Corner ghost cells, required by the dimensional splitting
        // sweeps and visualization.
        let corners = [
            ((0, 0), (1, 1)),
            ((ny + 1, 0), (ny, 1)),
            ((0, nx + 1), (1, nx)),
            ((ny + 1, nx + 1), (ny, nx)),
        ];
        for ((gj, gi), (j, i)) in corners {
            self.h[gj][gi] = self.h[j][i];
            self.hu[gj][gi] = self.hu[j][i];
            self.hv[gj][gi] = self.hv[j][i];
        }
    }

    /// Reference time-step bound from cell-centered wave speed estimates.
    ///
    /// For every interior cell with height above `dry_tol`, the wave
    /// speed is estimated as `max(|hu|, |hv|)/h + sqrt(g·h)`; the bound
    /// is `cfl · min(dx, dy) / max_speed`. An entirely dry domain has no
    /// wave speed and yields `Real::INFINITY`.
    pub fn compute_max_time_step(&mut self, dry_tol: Real, cfl: Real) {
        let mut maximum_wave_speed: Real = 0.0;

        for j in 1..=self.ny {
            for i in 1..=self.nx {
                let h = self.h[j][i];
                if h > dry_tol {
                    let momentum = self.hu[j][i].abs().max(self.hv[j][i].abs());
                    let wave_speed = momentum / h + (GRAVITY * h).sqrt();
                    maximum_wave_speed = maximum_wave_speed.max(wave_speed);
                }
            }
        }

        if maximum_wave_speed <= 0.0 {
            warn!("no wet cell in domain; time step is unbounded");
            self.max_time_step = Real::INFINITY;
            return;
        }

        self.max_time_step = cfl * self.dx.min(self.dy) / maximum_wave_speed;
    }

    /// Stability bound computed by the most recent
    /// [`Block::compute_max_time_step`] or
    /// [`FluxScheme::compute_numerical_fluxes`] call.
    pub fn max_time_step(&self) -> Real {
        self.max_time_step
    }

    /// Water height field including the ghost layer.
    pub fn water_height(&self) -> &Grid {
        &self.h
    }

    /// x-discharge (hu) field including the ghost layer.
    pub fn discharge_hu(&self) -> &Grid {
        &self.hu
    }

    /// y-discharge (hv) field including the ghost layer.
    pub fn discharge_hv(&self) -> &Grid {
        &self.hv
    }

    /// Bathymetry field including the ghost layer.
    pub fn bathymetry(&self) -> &Grid {
        &self.b
    }

    /// Boundary type configured for an edge, if any.
    pub fn boundary_type(&self, edge: BoundaryEdge) -> Option<BoundaryType> {
        *self.boundary.get(edge)
    }

    /// Interior grid size in x-direction.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Interior grid size in y-direction.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Cell size in x-direction.
    pub fn dx(&self) -> Real {
        self.dx
    }

    /// Cell size in y-direction.
    pub fn dy(&self) -> Real {
        self.dy
    }

    /// World x-coordinate of the interior domain's lower-left corner.
    pub fn offset_x(&self) -> Real {
        self.offset_x
    }

    /// World y-coordinate of the interior domain's lower-left corner.
    pub fn offset_y(&self) -> Real {
        self.offset_y
    }
}
