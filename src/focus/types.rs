//! Region fitting core types

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Region fitting error types
#[derive(Debug, Error)]
pub enum FocusError {
    #[error("meta schema v:{expected} required, found v:{found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("`{0}` must be a positive dimension")]
    InvalidDimension(&'static str),
}

pub type Result<T> = std::result::Result<T, FocusError>;

// ============================================================
// Output
// ============================================================

/// A concrete crop in pixel coordinates.
///
/// Edges are inclusive: `width = right - left + 1` and
/// `height = bottom - top + 1`, with `0 <= left <= right < image_width`
/// and `0 <= top <= bottom < image_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = FocusError::VersionMismatch {
            expected: 1,
            found: 7,
        };
        assert!(err.to_string().contains("v:1 required"));
        assert!(err.to_string().contains("found v:7"));

        let err = FocusError::InvalidDimension("image_width");
        assert!(err.to_string().contains("image_width"));
    }

    #[test]
    fn test_pixel_region_construction() {
        let region = PixelRegion {
            left: 192,
            top: 144,
            right: 831,
            bottom: 623,
            width: 640,
            height: 480,
        };
        assert_eq!(region.right - region.left + 1, region.width);
        assert_eq!(region.bottom - region.top + 1, region.height);
    }
}
