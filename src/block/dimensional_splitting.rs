//! Dimensional-splitting flux scheme.
//!
//! The 2D problem is split into 1D Riemann problems along rows (x-sweep)
//! and columns (y-sweep), solved with the F-wave solver from
//! [`crate::solver`]. Both sweeps use the same time step; the ghost layer
//! is applied once per step, before the x-sweep, and the y-sweep runs on
//! the x-updated state without re-applying boundary conditions. The
//! x-sweep therefore covers the ghost rows as well, so the column data
//! entering the y-sweep is consistent.
//!
//! The x-sweep yields the stability bound `cfl · dx / max_speed_x` for
//! the step; the y-sweep re-checks the chosen `dt` against its own wave
//! speeds and rejects the step with a [`StabilityError`] if the bound
//! `dy / (2 · max_speed_y)` is exceeded.

use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::grid::Grid;
use crate::solver::compute_net_updates;
use crate::types::Real;

use super::{Block, CFL_NUMBER, FluxScheme, StabilityError};

/// A [`Block`] stepped by dimensional splitting with the F-wave solver.
///
/// Carries staging buffers of `(ny+2) × (nx+1)` net updates per unknown.
/// The buffers are written by the x-sweep at the interface's left-cell
/// index and reused by the y-sweep at the interface's lower-cell index;
/// the `hu` pair holds `hv` updates during the y-sweep.
pub struct DimensionalSplittingBlock {
    block: Block,

    h_net_updates_left: Grid,
    h_net_updates_right: Grid,
    hu_net_updates_left: Grid,
    hu_net_updates_right: Grid,

    /// Latched when any interface solve of the current step failed
    solver_error: bool,
}

/// Solve all vertical interfaces of one grid row.
///
/// `h`, `hu`, `b` are a full row of `nx + 2` cells; the staging rows
/// receive the update for the interface between cells `x-1` and `x` at
/// index `x - 1`. Returns the row's largest wave speed and whether any
/// solve failed.
fn sweep_row_x(
    h: &[Real],
    hu: &[Real],
    b: &[Real],
    h_left: &mut [Real],
    h_right: &mut [Real],
    hu_left: &mut [Real],
    hu_right: &mut [Real],
) -> (Real, bool) {
    let mut max_wave_speed: Real = 0.0;
    let mut error = false;

    for x in 1..h.len() {
        match compute_net_updates(h[x - 1], h[x], hu[x - 1], hu[x], b[x - 1], b[x]) {
            Ok(upd) => {
                h_left[x - 1] = upd.h_left;
                h_right[x - 1] = upd.h_right;
                hu_left[x - 1] = upd.hu_left;
                hu_right[x - 1] = upd.hu_right;
                max_wave_speed = max_wave_speed.max(upd.max_wave_speed);
            }
            Err(err) => {
                debug!("x-sweep interface solve failed: {}", err);
                h_left[x - 1] = 0.0;
                h_right[x - 1] = 0.0;
                hu_left[x - 1] = 0.0;
                hu_right[x - 1] = 0.0;
                error = true;
            }
        }
    }

    (max_wave_speed, error)
}

/// Solve the horizontal interfaces between two adjacent grid rows.
///
/// `low` is row `y - 1`, `high` is row `y`; the staging rows belong to
/// index `y - 1` and are written at the column index directly. Only the
/// interior columns `1..=nx` are swept.
#[allow(clippy::too_many_arguments)]
fn sweep_row_y(
    h_low: &[Real],
    h_high: &[Real],
    hv_low: &[Real],
    hv_high: &[Real],
    b_low: &[Real],
    b_high: &[Real],
    h_left: &mut [Real],
    h_right: &mut [Real],
    hv_left: &mut [Real],
    hv_right: &mut [Real],
) -> (Real, bool) {
    let mut max_wave_speed: Real = 0.0;
    let mut error = false;
    let nx = h_low.len() - 2;

    for x in 1..=nx {
        match compute_net_updates(h_low[x], h_high[x], hv_low[x], hv_high[x], b_low[x], b_high[x]) {
            Ok(upd) => {
                h_left[x] = upd.h_left;
                h_right[x] = upd.h_right;
                hv_left[x] = upd.hu_left;
                hv_right[x] = upd.hu_right;
                max_wave_speed = max_wave_speed.max(upd.max_wave_speed);
            }
            Err(err) => {
                debug!("y-sweep interface solve failed: {}", err);
                h_left[x] = 0.0;
                h_right[x] = 0.0;
                hv_left[x] = 0.0;
                hv_right[x] = 0.0;
                error = true;
            }
        }
    }

    (max_wave_speed, error)
}

impl DimensionalSplittingBlock {
    /// Wrap a block and allocate the staging buffers for its size.
    pub fn new(block: Block) -> Self {
        let rows = block.ny + 2;
        let cols = block.nx + 1;
        Self {
            h_net_updates_left: Grid::new(rows, cols),
            h_net_updates_right: Grid::new(rows, cols),
            hu_net_updates_left: Grid::new(rows, cols),
            hu_net_updates_right: Grid::new(rows, cols),
            block,
            solver_error: false,
        }
    }

    /// Give the wrapped block back, dropping the staging buffers.
    pub fn into_inner(self) -> Block {
        self.block
    }

    /// Sweep all rows including the ghost rows; returns the largest wave
    /// speed seen and whether any solve failed.
    fn sweep_x(&mut self) -> (Real, bool) {
        let Self {
            block,
            h_net_updates_left,
            h_net_updates_right,
            hu_net_updates_left,
            hu_net_updates_right,
            ..
        } = self;

        #[cfg(feature = "parallel")]
        {
            let width = block.nx + 2;
            let cols = block.nx + 1;
            h_net_updates_left
                .as_mut_slice()
                .par_chunks_mut(cols)
                .zip(h_net_updates_right.as_mut_slice().par_chunks_mut(cols))
                .zip(hu_net_updates_left.as_mut_slice().par_chunks_mut(cols))
                .zip(hu_net_updates_right.as_mut_slice().par_chunks_mut(cols))
                .zip(block.h.as_slice().par_chunks(width))
                .zip(block.hu.as_slice().par_chunks(width))
                .zip(block.b.as_slice().par_chunks(width))
                .map(|((((((hl, hr), hul), hur), h), hu), b)| {
                    sweep_row_x(h, hu, b, hl, hr, hul, hur)
                })
                .reduce(|| (0.0, false), |a, b| (a.0.max(b.0), a.1 || b.1))
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut max_wave_speed: Real = 0.0;
            let mut error = false;
            for j in 0..block.ny + 2 {
                let (speed, row_error) = sweep_row_x(
                    block.h.row(j),
                    block.hu.row(j),
                    block.b.row(j),
                    h_net_updates_left.row_mut(j),
                    h_net_updates_right.row_mut(j),
                    hu_net_updates_left.row_mut(j),
                    hu_net_updates_right.row_mut(j),
                );
                max_wave_speed = max_wave_speed.max(speed);
                error = error || row_error;
            }
            (max_wave_speed, error)
        }
    }

    /// Sweep the interfaces between all row pairs, interior columns only;
    /// reuses the staging buffers (the `hu` pair holds `hv` updates).
    fn sweep_y(&mut self) -> (Real, bool) {
        let Self {
            block,
            h_net_updates_left,
            h_net_updates_right,
            hu_net_updates_left,
            hu_net_updates_right,
            ..
        } = self;

        // One interface row per adjacent row pair.
        let interfaces = block.ny + 1;

        #[cfg(feature = "parallel")]
        {
            let width = block.nx + 2;
            let cols = block.nx + 1;
            let h = block.h.as_slice();
            let hv = block.hv.as_slice();
            let b = block.b.as_slice();
            let span = interfaces * width;

            h_net_updates_left.as_mut_slice()[..interfaces * cols]
                .par_chunks_mut(cols)
                .zip(h_net_updates_right.as_mut_slice()[..interfaces * cols].par_chunks_mut(cols))
                .zip(hu_net_updates_left.as_mut_slice()[..interfaces * cols].par_chunks_mut(cols))
                .zip(hu_net_updates_right.as_mut_slice()[..interfaces * cols].par_chunks_mut(cols))
                .zip(h[..span].par_chunks(width))
                .zip(h[width..].par_chunks(width))
                .zip(hv[..span].par_chunks(width))
                .zip(hv[width..].par_chunks(width))
                .zip(b[..span].par_chunks(width))
                .zip(b[width..].par_chunks(width))
                .map(
                    |(
                        ((((((((hl, hr), hvl), hvr), h_low), h_high), hv_low), hv_high), b_low),
                        b_high,
                    )| {
                        sweep_row_y(
                            h_low, h_high, hv_low, hv_high, b_low, b_high, hl, hr, hvl, hvr,
                        )
                    },
                )
                .reduce(|| (0.0, false), |a, b| (a.0.max(b.0), a.1 || b.1))
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut max_wave_speed: Real = 0.0;
            let mut error = false;
            for y in 1..=interfaces {
                let (speed, row_error) = sweep_row_y(
                    block.h.row(y - 1),
                    block.h.row(y),
                    block.hv.row(y - 1),
                    block.hv.row(y),
                    block.b.row(y - 1),
                    block.b.row(y),
                    h_net_updates_left.row_mut(y - 1),
                    h_net_updates_right.row_mut(y - 1),
                    hu_net_updates_left.row_mut(y - 1),
                    hu_net_updates_right.row_mut(y - 1),
                );
                max_wave_speed = max_wave_speed.max(speed);
                error = error || row_error;
            }
            (max_wave_speed, error)
        }
    }

    /// Apply the x-sweep net updates to `h` and `hu`, ghost rows included.
    fn apply_x_updates(&mut self, dt: Real) {
        let scale = dt / self.block.dx;
        let (nx, ny) = (self.block.nx, self.block.ny);

        for y in 0..ny + 2 {
            for x in 1..=nx {
                self.block.h[y][x] -= scale
                    * (self.h_net_updates_right[y][x - 1] + self.h_net_updates_left[y][x]);
                self.block.hu[y][x] -= scale
                    * (self.hu_net_updates_right[y][x - 1] + self.hu_net_updates_left[y][x]);
            }
        }
    }

    /// Apply the y-sweep net updates to `h` and `hv`, interior cells only.
    fn apply_y_updates(&mut self, dt: Real) {
        let scale = dt / self.block.dy;
        let (nx, ny) = (self.block.nx, self.block.ny);

        for y in 1..=ny {
            for x in 1..=nx {
                self.block.h[y][x] -= scale
                    * (self.h_net_updates_right[y - 1][x] + self.h_net_updates_left[y][x]);
                self.block.hv[y][x] -= scale
                    * (self.hu_net_updates_right[y - 1][x] + self.hu_net_updates_left[y][x]);
            }
        }
    }
}

impl FluxScheme for DimensionalSplittingBlock {
    fn block(&self) -> &Block {
        &self.block
    }

    fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    /// X-sweep: solve all vertical interfaces and derive the step's
    /// stability bound. A domain without any wet interface leaves the
    /// bound unbounded.
    fn compute_numerical_fluxes(&mut self) {
        self.solver_error = false;

        let (max_wave_speed, error) = self.sweep_x();
        self.solver_error = error;

        self.block.max_time_step = if max_wave_speed > 0.0 {
            CFL_NUMBER * self.block.dx / max_wave_speed
        } else {
            Real::INFINITY
        };
    }

    /// Apply the x-updates, run the y-sweep on the updated state and
    /// apply its updates with the same `dt`.
    ///
    /// The y-sweep checks `dt` against its own wave speeds; a violated
    /// bound aborts the step before the y-updates are applied and leaves
    /// the state x-updated only.
    fn update_unknowns(&mut self, dt: Real) -> Result<(), StabilityError> {
        self.apply_x_updates(dt);

        let (max_wave_speed, error) = self.sweep_y();
        self.solver_error = self.solver_error || error;

        if max_wave_speed > 0.0 {
            let limit = 0.5 * self.block.dy / max_wave_speed;
            if dt > limit {
                return Err(StabilityError::CflViolation { dt, limit });
            }
        }

        self.apply_y_updates(dt);
        Ok(())
    }

    fn has_error(&self) -> bool {
        self.solver_error
    }
}
