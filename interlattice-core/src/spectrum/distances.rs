//! Pairwise distance spectrum.

use super::{capped_pair_count, capped_pairs, Histogram};
use crate::vector::Vec3;

/// Decimal digits kept for distance buckets
pub const DISTANCE_DIGITS: u32 = 6;

/// Histogram of distances over the first `max_pairs` point pairs.
///
/// Fewer than two points give an empty histogram.
pub fn analyze_distances(points: &[Vec3], max_pairs: usize) -> Histogram {
    analyze_distances_in_units(points, max_pairs, 1.0)
}

/// [`analyze_distances`] with distances bucketed in multiples of `unit`.
///
/// With `unit` set to the cube side, scaling the lattice by `k` scales
/// every bucket value by `k` and leaves the buckets themselves unchanged.
pub fn analyze_distances_in_units(points: &[Vec3], max_pairs: usize, unit: f64) -> Histogram {
    let examined = capped_pair_count(points.len(), max_pairs);
    if examined < capped_pair_count(points.len(), usize::MAX) {
        tracing::trace!(points = points.len(), max_pairs, "distance spectrum truncated");
    }

    Histogram::from_values_in_units(
        capped_pairs(points.len(), max_pairs).map(|(i, j)| points[i].distance(&points[j])),
        DISTANCE_DIGITS,
        unit,
    )
}
