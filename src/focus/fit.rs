//! Descriptor-to-pixel region fitting
//!
//! Converts a saliency descriptor plus image and crop dimensions into a
//! concrete pixel crop. Wider percentile tiers carry more context but
//! are harder to enclose, so the fitter walks them widest-first under a
//! strict containment rule and falls back to a best-effort centered fit
//! on the smallest tier.

use tracing::debug;

use super::types::{FocusError, PixelRegion, Result};
use super::FocusOptions;
use crate::gravity::{Meta, RegionRect, META_VERSION};

/// Region fitter.
///
/// Pure geometry over the descriptor; independent of how the descriptor
/// was extracted.
pub struct RegionFitter;

impl RegionFitter {
    /// Fit a crop of `options.region_width x region_height` into the
    /// image, keeping as much of the salient area in frame as possible.
    ///
    /// Fails fast on a descriptor version this fitter does not
    /// implement, or on any zero dimension, before touching geometry.
    pub fn fit(meta: &Meta, options: &FocusOptions) -> Result<PixelRegion> {
        if meta.v != META_VERSION {
            return Err(FocusError::VersionMismatch {
                expected: META_VERSION,
                found: meta.v,
            });
        }
        options.validate()?;

        // Widest tier first: the first one the crop fully encloses wins.
        let strict_tiers = [
            (meta.r90th, "r90th"),
            (meta.r75th, "r75th"),
            (meta.r50th, "r50th"),
            (meta.r40th, "r40th"),
        ];
        for (rect, tier) in strict_tiers {
            if let Some(rect) = rect {
                let placement = Placement::compute(&rect, options);
                if placement.encloses_target() {
                    debug!(tier, "strict fit succeeded");
                    return Ok(placement.into_region());
                }
            }
        }

        // Best-effort tail: center on the smallest recorded tier, or on
        // the image itself when the descriptor has no regions at all.
        let fallback = meta
            .smallest_region()
            .copied()
            .unwrap_or_else(RegionRect::image_center);
        debug!("best-effort fit");
        Ok(Placement::compute(&fallback, options).into_region())
    }
}

/// A candidate crop placement, kept in signed pixel space together with
/// the target rectangle it was centered on.
struct Placement {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
    target_left: i64,
    target_top: i64,
    target_right: i64,
    target_bottom: i64,
}

impl Placement {
    /// Center a crop of the requested (possibly shrunk) size on the
    /// pixel center of `rect`, then clamp it inside the image by
    /// shifting on each axis independently.
    fn compute(rect: &RegionRect, options: &FocusOptions) -> Self {
        let image_width = i64::from(options.image_width);
        let image_height = i64::from(options.image_height);
        let (crop_width, crop_height) = shrink_to_fit(options);

        let target_left = scale(options.image_width, rect.l);
        let target_top = scale(options.image_height, rect.t);
        let target_width = scale(options.image_width, rect.w);
        let target_height = scale(options.image_height, rect.h);
        let center_x = target_left + half(target_width);
        let center_y = target_top + half(target_height);

        let mut left = (center_x - half(crop_width)).max(0);
        let mut right = left + crop_width - 1;
        if right >= image_width {
            right = image_width - 1;
            left = (right - (crop_width - 1)).max(0);
        }
        let mut top = (center_y - half(crop_height)).max(0);
        let mut bottom = top + crop_height - 1;
        if bottom >= image_height {
            bottom = image_height - 1;
            top = (bottom - (crop_height - 1)).max(0);
        }
        right = right.min(image_width - 1);
        bottom = bottom.min(image_height - 1);

        Self {
            left,
            top,
            right,
            bottom,
            target_left,
            target_top,
            target_right: target_left + target_width,
            target_bottom: target_top + target_height,
        }
    }

    /// Whether the crop fully contains the target rectangle on all four
    /// edges.
    fn encloses_target(&self) -> bool {
        self.left <= self.target_left
            && self.top <= self.target_top
            && self.right >= self.target_right
            && self.bottom >= self.target_bottom
    }

    fn into_region(self) -> PixelRegion {
        PixelRegion {
            left: self.left as u32,
            top: self.top as u32,
            right: self.right as u32,
            bottom: self.bottom as u32,
            width: (self.right - self.left + 1) as u32,
            height: (self.bottom - self.top + 1) as u32,
        }
    }
}

/// Shrink the requested crop to fit inside the image while preserving
/// its aspect ratio: width first, then height. The recomputed dimension
/// cannot overflow its axis again.
fn shrink_to_fit(options: &FocusOptions) -> (i64, i64) {
    let image_width = i64::from(options.image_width);
    let image_height = i64::from(options.image_height);
    let aspect_x = f64::from(options.region_width) / f64::from(options.region_height);
    let aspect_y = f64::from(options.region_height) / f64::from(options.region_width);

    let mut width = i64::from(options.region_width);
    let mut height = i64::from(options.region_height);
    if width > image_width {
        width = image_width;
        height = (width as f64 * aspect_y).round() as i64;
    }
    if height > image_height {
        height = image_height;
        width = (height as f64 * aspect_x).round() as i64;
    }

    // An extreme aspect can round a dimension down to zero; keep at
    // least one pixel so the region invariants hold.
    (width.max(1), height.max(1))
}

/// Pixels covered by a normalized fraction of a dimension.
fn scale(dimension: u32, fraction: f64) -> i64 {
    (f64::from(dimension) * fraction).round() as i64
}

/// Half of a non-negative pixel count, rounding up.
fn half(value: i64) -> i64 {
    (value + 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::CenterPoint;

    fn sample_meta() -> Meta {
        Meta {
            v: META_VERSION,
            c: CenterPoint { x: 0.5, y: 0.5 },
            r25th: Some(RegionRect {
                l: 0.45,
                t: 0.45,
                w: 0.1,
                h: 0.1,
            }),
            r40th: None,
            r50th: Some(RegionRect {
                l: 0.40,
                t: 0.40,
                w: 0.2,
                h: 0.2,
            }),
            r75th: Some(RegionRect {
                l: 0.35,
                t: 0.35,
                w: 0.3,
                h: 0.3,
            }),
            r90th: Some(RegionRect {
                l: 0.25,
                t: 0.25,
                w: 0.5,
                h: 0.5,
            }),
        }
    }

    fn options(region_width: u32, region_height: u32) -> FocusOptions {
        FocusOptions::new(1024, 768, region_width, region_height)
    }

    #[test]
    fn test_widest_tier_wins_when_it_fits() {
        let region = RegionFitter::fit(&sample_meta(), &options(640, 480)).unwrap();
        assert_eq!(
            region,
            PixelRegion {
                left: 192,
                top: 144,
                right: 831,
                bottom: 623,
                width: 640,
                height: 480,
            }
        );
    }

    #[test]
    fn test_cascade_falls_through_to_seventy_fifth() {
        let region = RegionFitter::fit(&sample_meta(), &options(400, 400)).unwrap();
        assert_eq!(
            region,
            PixelRegion {
                left: 312,
                top: 184,
                right: 711,
                bottom: 583,
                width: 400,
                height: 400,
            }
        );
    }

    #[test]
    fn test_cascade_falls_through_to_fiftieth() {
        let region = RegionFitter::fit(&sample_meta(), &options(300, 300)).unwrap();
        assert_eq!(
            region,
            PixelRegion {
                left: 363,
                top: 234,
                right: 662,
                bottom: 533,
                width: 300,
                height: 300,
            }
        );
    }

    #[test]
    fn test_small_crop_lands_on_best_effort_tier() {
        // 200x200 cannot enclose any tier strictly; the smallest tier is
        // fit best-effort.
        let region = RegionFitter::fit(&sample_meta(), &options(200, 200)).unwrap();
        assert_eq!(
            region,
            PixelRegion {
                left: 412,
                top: 285,
                right: 611,
                bottom: 484,
                width: 200,
                height: 200,
            }
        );
    }

    #[test]
    fn test_overwide_crop_shrinks_width_first() {
        let region = RegionFitter::fit(&sample_meta(), &options(1400, 480)).unwrap();
        assert_eq!(
            region,
            PixelRegion {
                left: 0,
                top: 208,
                right: 1023,
                bottom: 558,
                width: 1024,
                height: 351,
            }
        );
    }

    #[test]
    fn test_overtall_crop_shrinks_height() {
        let region = RegionFitter::fit(&sample_meta(), &options(640, 1200)).unwrap();
        assert_eq!(
            region,
            PixelRegion {
                left: 307,
                top: 0,
                right: 716,
                bottom: 767,
                width: 410,
                height: 768,
            }
        );
    }

    #[test]
    fn test_meta_without_regions_centers_on_image() {
        let region = RegionFitter::fit(&Meta::centered(), &options(640, 480)).unwrap();
        assert_eq!(
            region,
            PixelRegion {
                left: 192,
                top: 144,
                right: 831,
                bottom: 623,
                width: 640,
                height: 480,
            }
        );
    }

    #[test]
    fn test_version_mismatch_rejected_before_geometry() {
        let mut meta = sample_meta();
        meta.v = 2;

        let err = RegionFitter::fit(&meta, &options(640, 480)).unwrap_err();
        assert!(matches!(
            err,
            FocusError::VersionMismatch {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected_by_field() {
        let meta = sample_meta();
        for (field, options) in [
            ("image_width", FocusOptions::new(0, 768, 640, 480)),
            ("image_height", FocusOptions::new(1024, 0, 640, 480)),
            ("region_width", FocusOptions::new(1024, 768, 0, 480)),
            ("region_height", FocusOptions::new(1024, 768, 640, 0)),
        ] {
            let err = RegionFitter::fit(&meta, &options).unwrap_err();
            match err {
                FocusError::InvalidDimension(name) => assert_eq!(name, field),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_result_stays_inside_image_bounds() {
        let meta = sample_meta();
        for (w, h) in [(64, 64), (333, 717), (1024, 768), (5000, 120), (90, 4000)] {
            let region = RegionFitter::fit(&meta, &options(w, h)).unwrap();
            assert!(region.left <= region.right);
            assert!(region.top <= region.bottom);
            assert!(region.right < 1024);
            assert!(region.bottom < 768);
            assert_eq!(region.width, region.right - region.left + 1);
            assert_eq!(region.height, region.bottom - region.top + 1);
        }
    }

    #[test]
    fn test_shrink_preserves_aspect() {
        let (w, h) = shrink_to_fit(&options(1400, 480));
        assert_eq!((w, h), (1024, 351));

        let (w, h) = shrink_to_fit(&options(640, 1200));
        assert_eq!((w, h), (410, 768));

        // Fits as-is: untouched.
        let (w, h) = shrink_to_fit(&options(640, 480));
        assert_eq!((w, h), (640, 480));
    }

    #[test]
    fn test_shrink_keeps_at_least_one_pixel() {
        let (w, h) = shrink_to_fit(&FocusOptions::new(10, 10, 10_000, 1));
        assert_eq!(w, 10);
        assert_eq!(h, 1);
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(half(205), 103);
        assert_eq!(half(512), 256);
        assert_eq!(half(0), 0);
        assert_eq!(half(351), 176);
    }
}
