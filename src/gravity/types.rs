//! Saliency extraction core types
//!
//! Contains the validated saliency input container and the
//! schema-versioned descriptor produced by the extractor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Schema version stamped into every descriptor.
pub const META_VERSION: u32 = 1;

/// Scale used to round normalized descriptor fields to 4 decimal places.
const DESCRIPTOR_PRECISION: f64 = 10_000.0;

// ============================================================
// Error Types
// ============================================================

/// Saliency matrix validation error types
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("saliency matrix has no rows")]
    Empty,

    #[error("saliency matrix has no columns")]
    NoColumns,

    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) is not a finite non-negative value")]
    InvalidValue { row: usize, col: usize },

    #[error("buffer of length {len} cannot hold a {rows}x{cols} matrix")]
    LengthMismatch {
        len: usize,
        rows: usize,
        cols: usize,
    },
}

pub type Result<T> = std::result::Result<T, MatrixError>;

// ============================================================
// Saliency Input
// ============================================================

/// Immutable, validated saliency heat-map.
///
/// Row-major semantics: row 0 is the top edge of the image, column 0 the
/// left edge. A zero cell means "not salient". Values are produced by an
/// external detector; this container only guarantees shape and range.
#[derive(Debug, Clone, PartialEq)]
pub struct SalientMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl SalientMatrix {
    /// Build a matrix from nested rows, validating shape and values.
    ///
    /// Rejects empty input, ragged rows, and cells that are negative,
    /// infinite or NaN.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(MatrixError::Empty);
        }
        let cols = rows[0].len();
        if cols == 0 {
            return Err(MatrixError::NoColumns);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::Ragged {
                    row: row_index,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (col_index, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(MatrixError::InvalidValue {
                        row: row_index,
                        col: col_index,
                    });
                }
                data.push(value);
            }
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_flat(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 {
            return Err(MatrixError::Empty);
        }
        if cols == 0 {
            return Err(MatrixError::NoColumns);
        }
        if data.len() != rows * cols {
            return Err(MatrixError::LengthMismatch {
                len: data.len(),
                rows,
                cols,
            });
        }
        for (index, &value) in data.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(MatrixError::InvalidValue {
                    row: index / cols,
                    col: index % cols,
                });
            }
        }

        Ok(Self { data, rows, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Row-major iteration over `(row, col, value)`.
    pub(crate) fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(index, &value)| (index / cols, index % cols, value))
    }
}

// ============================================================
// Descriptor
// ============================================================

/// Normalized centroid of saliency mass, both axes in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterPoint {
    pub x: f64,
    pub y: f64,
}

/// Normalized rectangle, all fields in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionRect {
    /// Left edge.
    pub l: f64,
    /// Top edge.
    pub t: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl RegionRect {
    /// Zero-extent rectangle on the image center.
    pub fn image_center() -> Self {
        Self {
            l: 0.5,
            t: 0.5,
            w: 0.0,
            h: 0.0,
        }
    }

    /// Right edge (left + width).
    pub fn right(&self) -> f64 {
        self.l + self.w
    }

    /// Bottom edge (top + height).
    pub fn bottom(&self) -> f64 {
        self.t + self.h
    }
}

/// Resolution-independent saliency descriptor.
///
/// Produced once per extraction and consumed by the region fitter. The
/// percentile rectangles are nested by construction: each tier is a
/// superset of every lower tier that is present. A tier is absent only
/// when its coverage threshold was never reached; an image with no
/// saliency at all has no tiers and a centroid of (0.5, 0.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Schema version; consumers reject versions they do not implement.
    pub v: u32,

    /// Weighted centroid of the raw matrix.
    pub c: CenterPoint,

    /// Smallest recorded box holding at least 25% of total mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r25th: Option<RegionRect>,

    /// Box holding at least 40% of total mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r40th: Option<RegionRect>,

    /// Box holding at least 50% of total mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r50th: Option<RegionRect>,

    /// Box holding at least 75% of total mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r75th: Option<RegionRect>,

    /// Box holding at least 90% of total mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r90th: Option<RegionRect>,
}

impl Meta {
    /// Descriptor for an image with no measurable saliency.
    pub fn centered() -> Self {
        Self {
            v: META_VERSION,
            c: CenterPoint { x: 0.5, y: 0.5 },
            r25th: None,
            r40th: None,
            r50th: None,
            r75th: None,
            r90th: None,
        }
    }

    /// Whether any percentile region was recorded.
    pub fn has_regions(&self) -> bool {
        self.smallest_region().is_some()
    }

    /// The smallest recorded percentile region, if any.
    pub fn smallest_region(&self) -> Option<&RegionRect> {
        self.r25th
            .as_ref()
            .or(self.r40th.as_ref())
            .or(self.r50th.as_ref())
            .or(self.r75th.as_ref())
            .or(self.r90th.as_ref())
    }
}

/// Round a normalized value to descriptor precision (4 decimal places).
pub(crate) fn round4(value: f64) -> f64 {
    (value * DESCRIPTOR_PRECISION).round() / DESCRIPTOR_PRECISION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_valid() {
        let matrix = SalientMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 2);
        assert_eq!(matrix.get(1, 0), 2.0);
    }

    #[test]
    fn test_from_rows_empty() {
        let result = SalientMatrix::from_rows(vec![]);
        assert!(matches!(result, Err(MatrixError::Empty)));
    }

    #[test]
    fn test_from_rows_no_columns() {
        let result = SalientMatrix::from_rows(vec![vec![]]);
        assert!(matches!(result, Err(MatrixError::NoColumns)));
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = SalientMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(MatrixError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_from_rows_rejects_negative() {
        let result = SalientMatrix::from_rows(vec![vec![1.0, -0.5]]);
        assert!(matches!(
            result,
            Err(MatrixError::InvalidValue { row: 0, col: 1 })
        ));
    }

    #[test]
    fn test_from_rows_rejects_nan() {
        let result = SalientMatrix::from_rows(vec![vec![f64::NAN]]);
        assert!(matches!(
            result,
            Err(MatrixError::InvalidValue { row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_from_flat() {
        let matrix = SalientMatrix::from_flat(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 2, 3).unwrap();
        assert_eq!(matrix.get(0, 2), 2.0);
        assert_eq!(matrix.get(1, 1), 4.0);
    }

    #[test]
    fn test_from_flat_length_mismatch() {
        let result = SalientMatrix::from_flat(vec![1.0, 2.0, 3.0], 2, 2);
        assert!(matches!(
            result,
            Err(MatrixError::LengthMismatch {
                len: 3,
                rows: 2,
                cols: 2
            })
        ));
    }

    #[test]
    fn test_cells_row_major() {
        let matrix = SalientMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let cells: Vec<_> = matrix.cells().collect();
        assert_eq!(
            cells,
            vec![(0, 0, 1.0), (0, 1, 2.0), (1, 0, 3.0), (1, 1, 4.0)]
        );
    }

    #[test]
    fn test_centered_meta() {
        let meta = Meta::centered();
        assert_eq!(meta.v, META_VERSION);
        assert_eq!(meta.c, CenterPoint { x: 0.5, y: 0.5 });
        assert!(!meta.has_regions());
    }

    #[test]
    fn test_smallest_region_order() {
        let mut meta = Meta::centered();
        meta.r50th = Some(RegionRect {
            l: 0.2,
            t: 0.2,
            w: 0.6,
            h: 0.6,
        });
        meta.r90th = Some(RegionRect {
            l: 0.0,
            t: 0.0,
            w: 1.0,
            h: 1.0,
        });

        let smallest = meta.smallest_region().unwrap();
        assert_eq!(smallest.w, 0.6);
    }

    #[test]
    fn test_region_rect_edges() {
        let rect = RegionRect {
            l: 0.25,
            t: 0.25,
            w: 0.5,
            h: 0.5,
        };
        assert!((rect.right() - 0.75).abs() < 1e-12);
        assert!((rect.bottom() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(1.0 / 15.0), 0.0667);
        assert_eq!(round4(0.5), 0.5);
    }
}
