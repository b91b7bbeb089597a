//! Dense 2D storage for per-cell scalar fields.
//!
//! Every field of the solver (water height, momentum components,
//! bathymetry, net-update staging) lives in a [`Grid`]: a fixed-size,
//! row-major buffer indexed as `grid[j][i]` with `j` the row (y) and `i`
//! the column (x). The flux loops are the hot path, so element access
//! carries no bounds checks beyond debug assertions; callers guarantee
//! indices are in range.

use std::ops::{Index, IndexMut};

use crate::types::Real;

/// Fixed-size row-major 2D array of [`Real`].
///
/// Constructed zero-initialised with `(rows, cols)`. There is no resizing;
/// cloning performs a deep copy and moves transfer ownership.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<Real>,
}

impl Grid {
    /// Allocate a zero-filled grid with `rows` rows and `cols` columns.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Number of rows (y extent).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (x extent).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at row `j`, column `i`.
    #[inline(always)]
    pub fn get(&self, j: usize, i: usize) -> Real {
        debug_assert!(j < self.rows && i < self.cols, "grid index out of range");
        self.data[j * self.cols + i]
    }

    /// Set the value at row `j`, column `i`.
    #[inline(always)]
    pub fn set(&mut self, j: usize, i: usize, value: Real) {
        debug_assert!(j < self.rows && i < self.cols, "grid index out of range");
        self.data[j * self.cols + i] = value;
    }

    /// Row `j` as a slice.
    #[inline]
    pub fn row(&self, j: usize) -> &[Real] {
        let start = j * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Row `j` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, j: usize) -> &mut [Real] {
        let start = j * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: Real) {
        self.data.fill(value);
    }

    /// The whole buffer in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    /// The whole buffer in row-major order, mutable.
    ///
    /// Used by the parallel sweeps to partition the grid into disjoint
    /// row chunks.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        &mut self.data
    }
}

impl Index<usize> for Grid {
    type Output = [Real];

    /// `grid[j]` yields row `j`, so elements read as `grid[j][i]`.
    #[inline(always)]
    fn index(&self, j: usize) -> &[Real] {
        self.row(j)
    }
}

impl IndexMut<usize> for Grid {
    #[inline(always)]
    fn index_mut(&mut self, j: usize) -> &mut [Real] {
        self.row_mut(j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        for j in 0..3 {
            for i in 0..4 {
                assert_eq!(g.get(j, i), 0.0);
            }
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut g = Grid::new(2, 5);
        g.set(1, 3, 2.5);
        assert_eq!(g.get(1, 3), 2.5);
        assert_eq!(g.get(1, 2), 0.0);
    }

    #[test]
    fn test_chained_indexing() {
        let mut g = Grid::new(2, 2);
        g[0][1] = 7.0;
        g[1][0] = -1.0;
        assert_eq!(g[0][1], 7.0);
        assert_eq!(g[1][0], -1.0);
        assert_eq!(g[0][0], 0.0);
    }

    #[test]
    fn test_row_major_layout() {
        let mut g = Grid::new(2, 3);
        for j in 0..2 {
            for i in 0..3 {
                g.set(j, i, (j * 3 + i) as Real);
            }
        }
        assert_eq!(g.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(g.row(1), &[3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut g = Grid::new(2, 2);
        g.set(0, 0, 1.0);
        let copy = g.clone();
        g.set(0, 0, 9.0);
        assert_eq!(copy.get(0, 0), 1.0);
    }

    #[test]
    fn test_fill() {
        let mut g = Grid::new(2, 2);
        g.fill(-10.0);
        assert!(g.as_slice().iter().all(|&v| v == -10.0));
    }

    #[test]
    #[should_panic]
    fn test_zero_dimension_panics() {
        let _ = Grid::new(0, 4);
    }
}
