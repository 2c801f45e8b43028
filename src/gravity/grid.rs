//! Fixed-resolution saliency grid
//!
//! Rebins an arbitrary-size saliency matrix into a fixed grid so the
//! region-growth search runs over a bounded number of cells regardless
//! of detector resolution.

use super::types::SalientMatrix;

/// One non-zero grid cell eligible to seed or extend the growth region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityCandidate {
    pub row: usize,
    pub col: usize,
    /// Accumulated mass in the cell.
    pub sum: f64,
}

/// Fixed-size accumulation grid derived from a saliency matrix.
#[derive(Debug, Clone)]
pub struct SalientGrid {
    cells: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl SalientGrid {
    /// Rebin `matrix` into a `rows x cols` grid by nearest-bucket
    /// accumulation.
    ///
    /// Every source cell is added to the single target cell closest to
    /// its relative position. This is not area-weighted resampling: an
    /// oversized source collapses many cells into one bucket, an
    /// undersized source leaves some buckets at zero.
    pub fn rebin(matrix: &SalientMatrix, rows: usize, cols: usize) -> Self {
        let mut cells = vec![0.0; rows * cols];
        let source_rows = matrix.rows() as f64;
        let source_cols = matrix.cols() as f64;

        for (row, col, value) in matrix.cells() {
            let target_row = nearest_bucket(row, source_rows, rows);
            let target_col = nearest_bucket(col, source_cols, cols);
            cells[target_row * cols + target_col] += value;
        }

        Self { cells, rows, cols }
    }

    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Accumulated mass in one cell.
    pub fn cell(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    /// Total accumulated mass across the grid.
    pub fn total_mass(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// All non-zero cells in row-major order.
    pub fn candidates(&self) -> Vec<GravityCandidate> {
        let mut candidates = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let sum = self.cell(row, col);
                if sum > 0.0 {
                    candidates.push(GravityCandidate { row, col, sum });
                }
            }
        }
        candidates
    }
}

/// Map a source index onto the nearest target bucket, clamped to the grid.
fn nearest_bucket(index: usize, source_len: f64, target_len: usize) -> usize {
    let mapped = (index as f64 / source_len * target_len as f64).round() as usize;
    mapped.min(target_len - 1)
}
