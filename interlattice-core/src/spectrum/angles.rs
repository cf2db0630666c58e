//! Angle spectrum and special-angle classification.

use super::Histogram;
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Decimal digits kept for angle buckets
pub const ANGLE_DIGITS: u32 = 2;

/// Half-width of the window around each special angle (degrees)
pub const SPECIAL_ANGLE_WINDOW: f64 = 0.5;

/// Canonical angles (degrees) and the symmetry they belong to
pub const SPECIAL_ANGLES: [(f64, &str); 7] = [
    (36.0, "icosahedral 5-fold"),
    (45.0, "octahedral 4-fold"),
    (60.0, "tetrahedral 3-fold"),
    (72.0, "icosahedral 5-fold"),
    (90.0, "cubic"),
    (108.0, "dodecahedral face"),
    (120.0, "trigonal 3-fold"),
];

/// Occurrences of one special angle in an angle histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialAngleCount {
    pub angle: f64,
    pub label: String,
    /// Summed counts of buckets within [`SPECIAL_ANGLE_WINDOW`]
    pub count: usize,
}

/// Histogram of angles (degrees) between every pair of directions.
///
/// Exhaustive: direction sets are small after deduplication.
pub fn analyze_angles(directions: &[Vec3]) -> Histogram {
    let n = directions.len();
    let angles = (0..n).flat_map(|i| {
        (i + 1..n).map(move |j| {
            let cos = directions[i].dot(&directions[j]).clamp(-1.0, 1.0);
            cos.acos().to_degrees()
        })
    });

    Histogram::from_values(angles, ANGLE_DIGITS)
}

/// Count each [`SPECIAL_ANGLES`] entry in an angle histogram
pub fn classify_special_angles(angles: &Histogram) -> Vec<SpecialAngleCount> {
    SPECIAL_ANGLES
        .iter()
        .map(|&(angle, label)| SpecialAngleCount {
            angle,
            label: label.to_string(),
            count: angles.count_within(angle, SPECIAL_ANGLE_WINDOW),
        })
        .collect()
}
