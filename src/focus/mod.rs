//! Region Fitting module
//!
//! Maps a saliency descriptor plus image and crop dimensions to a
//! concrete pixel crop.
//!
//! # Features
//!
//! - Aspect-preserving shrink when the requested crop exceeds the image
//! - Strict containment cascade over percentile tiers, widest first
//! - Guaranteed best-effort result, even for descriptors with no regions
//! - Fail-fast validation of schema version and dimensions
//!
//! # Example
//!
//! ```rust
//! use salient_focus::focus::{FocusOptions, RegionFitter};
//! use salient_focus::gravity::Meta;
//!
//! let options = FocusOptions::new(1024, 768, 640, 480);
//! let region = RegionFitter::fit(&Meta::centered(), &options).unwrap();
//! assert_eq!((region.width, region.height), (640, 480));
//! ```

// Submodules
mod fit;
mod types;

// Re-export public API
pub use fit::RegionFitter;
pub use types::{FocusError, PixelRegion, Result};

// ============================================================
// Options
// ============================================================

/// Pixel dimensions for a fit: the source image and the desired crop.
///
/// All four fields are required and must be positive; `validate`
/// rejects any zero field by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOptions {
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// Desired crop width in pixels.
    pub region_width: u32,
    /// Desired crop height in pixels.
    pub region_height: u32,
}

impl FocusOptions {
    /// Create options for a fit.
    pub fn new(image_width: u32, image_height: u32, region_width: u32, region_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            region_width,
            region_height,
        }
    }

    /// Reject any zero dimension, naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 {
            return Err(FocusError::InvalidDimension("image_width"));
        }
        if self.image_height == 0 {
            return Err(FocusError::InvalidDimension("image_height"));
        }
        if self.region_width == 0 {
            return Err(FocusError::InvalidDimension("region_width"));
        }
        if self.region_height == 0 {
            return Err(FocusError::InvalidDimension("region_height"));
        }
        Ok(())
    }
}
