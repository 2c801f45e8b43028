//! Saliency Gravity Extraction module
//!
//! Derives a compact, resolution-independent descriptor from a saliency
//! heat-map: a weighted centroid plus a nested family of bounding boxes
//! that each hold a growing share (25/40/50/75/90%) of the total
//! saliency mass.
//!
//! # Features
//!
//! - Fixed-grid rebinning so search cost is bounded regardless of input size
//! - Bias-curve candidate ranking (saliency mass, centrality, verticality)
//! - Incremental region growth with percentile bookkeeping
//! - Schema-versioned descriptor with optional percentile tiers
//!
//! # Example
//!
//! ```rust
//! use salient_focus::gravity::{GravityExtractor, SalientMatrix};
//!
//! let matrix = SalientMatrix::from_rows(vec![
//!     vec![0.0, 1.0, 0.0],
//!     vec![1.0, 4.0, 1.0],
//!     vec![0.0, 1.0, 0.0],
//! ]).unwrap();
//!
//! let meta = GravityExtractor::extract(&matrix);
//! assert_eq!(meta.v, 1);
//! assert!(meta.r25th.is_some());
//! ```

// Submodules
mod bias;
mod extract;
mod grid;
mod types;

// Re-export public API
pub use extract::GravityExtractor;
pub use types::{
    CenterPoint, MatrixError, Meta, RegionRect, Result, SalientMatrix, META_VERSION,
};

// ============================================================
// Constants
// ============================================================

/// Default analysis grid rows.
const DEFAULT_GRID_ROWS: usize = 15;

/// Default analysis grid columns.
const DEFAULT_GRID_COLS: usize = 15;

// ============================================================
// Options
// ============================================================

/// Analysis grid dimensions for the extractor.
///
/// The saliency matrix is rebinned into a grid of this size before the
/// region-growth search; both dimensions are treated as at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
        }
    }
}

impl GridOptions {
    /// Create a new options builder
    pub fn builder() -> GridOptionsBuilder {
        GridOptionsBuilder::default()
    }
}

/// Builder for GridOptions
#[derive(Debug, Default)]
pub struct GridOptionsBuilder {
    options: GridOptions,
}

impl GridOptionsBuilder {
    /// Set grid rows (clamped to at least 1)
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.options.rows = rows.max(1);
        self
    }

    /// Set grid columns (clamped to at least 1)
    #[must_use]
    pub fn cols(mut self, cols: usize) -> Self {
        self.options.cols = cols.max(1);
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> GridOptions {
        self.options
    }
}
