//! salient-focus - Saliency-driven auto-focus for image cropping
//!
//! Derives a recommended crop rectangle for an image from a dense
//! saliency heat-map (a 2-D grid of non-negative attention scores from
//! an external detector). Meant for image-serving pipelines that crop
//! arbitrary sources to a caller-specified size while keeping the most
//! important content in frame.
//!
//! The pipeline has two independent halves joined by a versioned
//! descriptor:
//!
//! ```text
//! SalientMatrix -> [GravityExtractor] -> Meta -> [RegionFitter] -> PixelRegion
//! ```
//!
//! The extractor reduces the matrix to a weighted centroid plus nested
//! bounding boxes covering 25/40/50/75/90% of the saliency mass. The
//! fitter turns one of those boxes into pixel coordinates for the
//! requested crop size, preferring the widest box the crop can fully
//! enclose. Either half can be used on its own: descriptors are cheap
//! to store and re-fit for any number of crop sizes later.
//!
//! # Example
//!
//! ```rust
//! use salient_focus::{auto_focus, FocusOptions, SalientMatrix};
//!
//! let matrix = SalientMatrix::from_rows(vec![
//!     vec![0.0, 0.0, 0.0, 0.0],
//!     vec![0.0, 1.0, 2.0, 0.0],
//!     vec![0.0, 2.0, 4.0, 0.0],
//!     vec![0.0, 0.0, 0.0, 0.0],
//! ]).unwrap();
//!
//! let options = FocusOptions::new(400, 400, 100, 100);
//! let region = auto_focus(&matrix, &options).unwrap();
//! assert_eq!((region.width, region.height), (100, 100));
//! ```
//!
//! Everything is a pure, synchronous function of its inputs; the only
//! shared state is the set of immutable bias curves, so calls may run
//! concurrently from any number of threads.

pub mod focus;
pub mod gravity;

// Re-export public API
pub use focus::{FocusError, FocusOptions, PixelRegion, RegionFitter};
pub use gravity::{
    CenterPoint, GravityExtractor, GridOptions, MatrixError, Meta, RegionRect, SalientMatrix,
    META_VERSION,
};

/// Derive a crop for `matrix` using the default analysis grid.
///
/// Convenience wrapper: extract a descriptor, then fit it.
pub fn auto_focus(
    matrix: &SalientMatrix,
    options: &FocusOptions,
) -> Result<PixelRegion, FocusError> {
    auto_focus_with(matrix, &GridOptions::default(), options)
}

/// Derive a crop with an explicit analysis grid size.
pub fn auto_focus_with(
    matrix: &SalientMatrix,
    grid: &GridOptions,
    options: &FocusOptions,
) -> Result<PixelRegion, FocusError> {
    let meta = GravityExtractor::extract_with(matrix, grid);
    RegionFitter::fit(&meta, options)
}
