//! Gravity bias curves
//!
//! Three fixed remapping functions weight candidate cells during
//! ranking: saliency mass, distance from the grid center, and vertical
//! position. Each is a css-style cubic-bezier ease composed with a
//! linear map onto its bias range. The instances are immutable and
//! shared process-wide.

use kurbo::{CubicBez, ParamCurve};
use std::sync::OnceLock;

// ============================================================
// Constants
// ============================================================

/// Saliency ease control points, see <http://cubic-bezier.com/#.04,.37,0,1>
const SALIENCY_EASE: [f64; 4] = [0.04, 0.37, 0.0, 1.0];

/// Saliency bias range.
const SALIENCY_BIAS: (f64, f64) = (0.0, 1.0);

/// Center ease control points, see <http://cubic-bezier.com/#.4,.41,.65,.1>
const CENTER_EASE: [f64; 4] = [0.4, 0.41, 0.65, 0.1];

/// Center bias range; central cells keep up to 10x the weight of corner cells.
const CENTER_BIAS: (f64, f64) = (0.1, 1.0);

/// Top ease control points, see <http://cubic-bezier.com/#.2,.21,.95,.92>
const TOP_EASE: [f64; 4] = [0.2, 0.21, 0.95, 0.92];

/// Top bias range; a mild boost for content near the top of the frame.
const TOP_BIAS: (f64, f64) = (1.0, 1.1);

/// Bisection steps when inverting the ease curve; 2^-32 is far below
/// descriptor precision.
const EASE_REFINE_STEPS: u32 = 32;

// ============================================================
// Bias Curve
// ============================================================

/// A monotonic ease composed with a linear map onto a bias range.
#[derive(Debug, Clone)]
pub(crate) struct BiasCurve {
    curve: CubicBez,
    bias_min: f64,
    bias_max: f64,
}

impl BiasCurve {
    fn new(ease: [f64; 4], bias: (f64, f64)) -> Self {
        let [x1, y1, x2, y2] = ease;
        Self {
            curve: CubicBez::new((0.0, 0.0), (x1, y1), (x2, y2), (1.0, 1.0)),
            bias_min: bias.0,
            bias_max: bias.1,
        }
    }

    /// Ease a normalized factor and map it into the bias range.
    pub(crate) fn apply(&self, factor: f64) -> f64 {
        let eased = self.ease(factor.clamp(0.0, 1.0));
        self.bias_min + eased * (self.bias_max - self.bias_min)
    }

    /// y at the parameter where the curve's x equals `x`.
    ///
    /// x(t) is monotone non-decreasing for control x in [0, 1], so a
    /// fixed-iteration bisection locates t.
    fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let mut low = 0.0_f64;
        let mut high = 1.0_f64;
        for _ in 0..EASE_REFINE_STEPS {
            let mid = 0.5 * (low + high);
            if self.curve.eval(mid).x < x {
                low = mid;
            } else {
                high = mid;
            }
        }
        self.curve.eval(0.5 * (low + high)).y
    }
}

// ============================================================
// Shared Instances
// ============================================================

/// The three process-wide bias curves.
#[derive(Debug, Clone)]
pub(crate) struct BiasCurves {
    pub saliency: BiasCurve,
    pub center: BiasCurve,
    pub top: BiasCurve,
}

impl BiasCurves {
    fn new() -> Self {
        Self {
            saliency: BiasCurve::new(SALIENCY_EASE, SALIENCY_BIAS),
            center: BiasCurve::new(CENTER_EASE, CENTER_BIAS),
            top: BiasCurve::new(TOP_EASE, TOP_BIAS),
        }
    }

    /// Shared immutable instance, built on first use.
    pub(crate) fn shared() -> &'static BiasCurves {
        static SHARED: OnceLock<BiasCurves> = OnceLock::new();
        SHARED.get_or_init(BiasCurves::new)
    }
}
