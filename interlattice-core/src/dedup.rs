//! Point deduplication on a rounding grid.
//!
//! Two points are the same when their coordinates, rounded to a fixed number
//! of decimal digits, are equal. This is a hash on a grid, not a spatial
//! merge: points a hair apart across a rounding boundary stay distinct.
//!
//! The `_in_units` variants measure coordinates in multiples of a length unit
//! (the cube side in the pipeline), so the grid scales with the geometry.

use crate::vector::Vec3;
use std::collections::HashSet;

/// Integer key for `value` rounded to `digits` decimal digits.
///
/// Integer keys make `-0.0` and `0.0` collide and avoid float hashing.
#[inline]
pub fn quantize(value: f64, digits: u32) -> i64 {
    (value * 10f64.powi(digits as i32)).round() as i64
}

/// Value represented by a [`quantize`] key
#[inline]
pub fn dequantize(key: i64, digits: u32) -> f64 {
    key as f64 / 10f64.powi(digits as i32)
}

/// Rounding key of a point
#[inline]
pub fn point_key(p: &Vec3, digits: u32) -> [i64; 3] {
    [quantize(p.x, digits), quantize(p.y, digits), quantize(p.z, digits)]
}

/// Keep the first point of every rounding-key class, in input order
pub fn unique_points(points: &[Vec3], precision: u32) -> Vec<Vec3> {
    unique_points_in_units(points, precision, 1.0)
}

/// [`unique_points`] with coordinates keyed in multiples of `unit`.
///
/// `unit` must be positive and finite. Returned points are the originals,
/// not rescaled.
pub fn unique_points_in_units(points: &[Vec3], precision: u32, unit: f64) -> Vec<Vec3> {
    let inv = 1.0 / unit;
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| seen.insert(point_key(&(**p * inv), precision)))
        .copied()
        .collect()
}
