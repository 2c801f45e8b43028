//! Saliency gravity extraction
//!
//! Reduces a saliency matrix to the compact descriptor: a weighted
//! centroid over the raw matrix, plus nested percentile bounding boxes
//! found by growing a box outward from the heaviest grid cell toward
//! progressively lighter ones.

use tracing::debug;

use super::bias::BiasCurves;
use super::grid::{GravityCandidate, SalientGrid};
use super::types::{round4, CenterPoint, Meta, RegionRect, SalientMatrix, META_VERSION};
use super::GridOptions;

/// Saliency gravity extractor.
///
/// Stateless; every call builds its own grid and candidate pool and
/// shares only the immutable bias curves, so concurrent calls need no
/// coordination.
pub struct GravityExtractor;

impl GravityExtractor {
    /// Extract a descriptor using the default analysis grid.
    pub fn extract(matrix: &SalientMatrix) -> Meta {
        Self::extract_with(matrix, &GridOptions::default())
    }

    /// Extract a descriptor with an explicit analysis grid size.
    ///
    /// An all-zero matrix is a defined outcome, not an error: the
    /// descriptor has a centered centroid and no percentile regions.
    pub fn extract_with(matrix: &SalientMatrix, options: &GridOptions) -> Meta {
        let grid_rows = options.rows.max(1);
        let grid_cols = options.cols.max(1);

        let (center, total_mass) = running_centroid(matrix);

        let grid = SalientGrid::rebin(matrix, grid_rows, grid_cols);
        let mut ordered = rank_candidates(&grid, BiasCurves::shared());
        debug!(
            rows = matrix.rows(),
            cols = matrix.cols(),
            grid_rows,
            grid_cols,
            candidates = ordered.len(),
            "ranked gravity candidates"
        );

        if ordered.is_empty() {
            return Meta::centered();
        }

        let mut meta = Meta {
            v: META_VERSION,
            c: center,
            r25th: None,
            r40th: None,
            r50th: None,
            r75th: None,
            r90th: None,
        };
        grow_region(&grid, &mut ordered, total_mass, &mut meta);
        meta
    }
}

/// Incremental weighted centroid over the raw matrix, plus total mass.
///
/// The weight divisor is the mass seen strictly before the current
/// cell, so the result depends on traversal order; existing descriptors
/// were produced by this exact recurrence and it must not be replaced
/// with a plain weighted mean.
fn running_centroid(matrix: &SalientMatrix) -> (CenterPoint, f64) {
    let rows = matrix.rows() as f64;
    let cols = matrix.cols() as f64;

    let mut x = 0.5;
    let mut y = 0.5;
    let mut seen = 0.0;
    for (row, col, value) in matrix.cells() {
        if value == 0.0 {
            continue;
        }
        let weight = if seen > 0.0 { value / seen } else { 1.0 };
        x -= (x - col as f64 / cols) * weight;
        y -= (y - row as f64 / rows) * weight;
        seen += value;
    }

    (
        CenterPoint {
            x: round4(x),
            y: round4(y),
        },
        seen,
    )
}

/// Weight every non-zero grid cell and return them sorted ascending, so
/// the heaviest candidate pops first.
///
/// The weight multiplies three independent factors: eased saliency mass
/// relative to the peak cell, eased closeness to the grid center, and
/// eased closeness to the top row.
fn rank_candidates(grid: &SalientGrid, curves: &BiasCurves) -> Vec<GravityCandidate> {
    let candidates = grid.candidates();
    if candidates.is_empty() {
        return candidates;
    }

    let peak = candidates.iter().map(|c| c.sum).fold(0.0, f64::max);
    let half_rows = grid.rows() as f64 / 2.0;
    let half_cols = grid.cols() as f64 / 2.0;

    let mut ranked: Vec<(GravityCandidate, f64)> = candidates
        .into_iter()
        .map(|candidate| {
            let saliency = curves.saliency.apply(candidate.sum / peak);

            // Average fractional Manhattan distance from the grid center.
            let distance = ((candidate.row as f64 - half_rows).abs() / half_rows
                + (candidate.col as f64 - half_cols).abs() / half_cols)
                / 2.0;
            let center = curves.center.apply(1.0 - distance);

            let top = curves
                .top
                .apply(1.0 - candidate.row as f64 / grid.rows() as f64);

            (candidate, saliency * center * top)
        })
        .collect();

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.into_iter().map(|(candidate, _)| candidate).collect()
}

/// Grow a bounding box from the heaviest candidate toward the rest,
/// snapshotting the box each time its share of total mass first reaches
/// a coverage threshold.
///
/// Each iteration moves the box at most one column and one row toward
/// the active candidate; once the box encloses it, the next-heaviest
/// candidate takes over. Terminates when the 90% tier is recorded or
/// the pool runs dry.
fn grow_region(
    grid: &SalientGrid,
    ordered: &mut Vec<GravityCandidate>,
    total_mass: f64,
    meta: &mut Meta,
) {
    let Some(seed) = ordered.pop() else {
        return;
    };
    let rows = grid.rows() as f64;
    let cols = grid.cols() as f64;

    let mut left = seed.col;
    let mut right = seed.col;
    let mut top = seed.row;
    let mut bottom = seed.row;
    let mut region_sum = seed.sum;
    let mut target = seed;

    loop {
        let width = right - left + 1;
        let height = bottom - top + 1;
        let coverage = region_sum / total_mass;
        let rect = RegionRect {
            l: round4(left as f64 / cols),
            t: round4(top as f64 / rows),
            w: round4(width as f64 / cols),
            h: round4(height as f64 / rows),
        };
        record_coverage(meta, coverage, rect);
        if meta.r90th.is_some() {
            break;
        }

        // Gravitate one step per axis toward the active candidate,
        // folding the newly covered cells into the running sum.
        let mut moved = false;
        if target.col < left {
            left -= 1;
            for row in top..=bottom {
                region_sum += grid.cell(row, left);
            }
            moved = true;
        } else if target.col > right {
            right += 1;
            for row in top..=bottom {
                region_sum += grid.cell(row, right);
            }
            moved = true;
        }
        if target.row < top {
            top -= 1;
            for col in left..=right {
                region_sum += grid.cell(top, col);
            }
            moved = true;
        } else if target.row > bottom {
            bottom += 1;
            for col in left..=right {
                region_sum += grid.cell(bottom, col);
            }
            moved = true;
        }

        if !moved {
            match ordered.pop() {
                Some(next) => target = next,
                None => break,
            }
        }
    }

    debug!(
        r25th = meta.r25th.is_some(),
        r40th = meta.r40th.is_some(),
        r50th = meta.r50th.is_some(),
        r75th = meta.r75th.is_some(),
        r90th = meta.r90th.is_some(),
        "region growth finished"
    );
}

/// Record `rect` into every tier whose threshold `coverage` has reached
/// and that has not been recorded yet, lowest tier first.
fn record_coverage(meta: &mut Meta, coverage: f64, rect: RegionRect) {
    if meta.r25th.is_none() && coverage >= 0.25 {
        meta.r25th = Some(rect);
    }
    if meta.r40th.is_none() && coverage >= 0.40 {
        meta.r40th = Some(rect);
    }
    if meta.r50th.is_none() && coverage >= 0.50 {
        meta.r50th = Some(rect);
    }
    if meta.r75th.is_none() && coverage >= 0.75 {
        meta.r75th = Some(rect);
    }
    if meta.r90th.is_none() && coverage >= 0.90 {
        meta.r90th = Some(rect);
    }
}
