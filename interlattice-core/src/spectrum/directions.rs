//! Direction spectrum and icosahedral alignment.
//!
//! A direction and its negation describe the same undirected relationship,
//! so every direction is reduced to one representative before counting.

use super::{capped_pair_count, capped_pairs};
use crate::dedup::point_key;
use crate::vector::Vec3;
use crate::{EPS, PHI, ROUND_DIGITS};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Deviation below which an icosahedral match is strong (degrees)
pub const STRONG_ALIGNMENT_DEG: f64 = 5.0;

/// Deviation below which an icosahedral match is moderate (degrees)
pub const MODERATE_ALIGNMENT_DEG: f64 = 15.0;

/// Flip `v` so that its first component with `|c| > EPS` is positive
pub fn canonicalize_direction(v: Vec3) -> Vec3 {
    let first = v.to_array().into_iter().find(|c| c.abs() > EPS);
    match first {
        Some(c) if c < 0.0 => -v,
        _ => v,
    }
}

/// Distinct canonical unit directions between the first `max_pairs` point
/// pairs, in order of first occurrence.
///
/// Coincident pairs are skipped.
pub fn analyze_directions(points: &[Vec3], max_pairs: usize) -> Vec<Vec3> {
    if max_pairs < capped_pair_count(points.len(), usize::MAX) {
        tracing::trace!(points = points.len(), max_pairs, "direction spectrum truncated");
    }

    let mut seen = HashSet::new();
    let mut directions = Vec::new();

    for (i, j) in capped_pairs(points.len(), max_pairs) {
        let diff = points[j] - points[i];
        if diff.norm() < EPS {
            continue;
        }
        let direction = canonicalize_direction(diff.normalize());
        if seen.insert(point_key(&direction, ROUND_DIGITS)) {
            directions.push(direction);
        }
    }

    directions
}

/// Unit 5-fold axis of the icosahedron, `(0, 1, φ)` normalized
pub fn icosahedral_axis() -> Vec3 {
    Vec3::new(0.0, 1.0, PHI).normalize()
}

/// How closely a direction set contains an icosahedral axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStrength {
    /// Deviation under 5°
    Strong,
    /// Deviation under 15°
    Moderate,
    Weak,
}

impl AlignmentStrength {
    pub fn from_deviation(deviation_deg: f64) -> Self {
        if deviation_deg < STRONG_ALIGNMENT_DEG {
            AlignmentStrength::Strong
        } else if deviation_deg < MODERATE_ALIGNMENT_DEG {
            AlignmentStrength::Moderate
        } else {
            AlignmentStrength::Weak
        }
    }
}

/// Direction closest to the icosahedral axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IcosahedralMatch {
    pub direction: Vec3,
    /// `|direction · axis|`
    pub alignment: f64,
    /// Angle between the direction's line and the axis (degrees)
    pub deviation_deg: f64,
    pub strength: AlignmentStrength,
}

/// Find the direction whose line is closest to the icosahedral 5-fold axis.
///
/// Returns `None` for an empty (or all-zero) direction set.
pub fn icosahedral_alignment(directions: &[Vec3]) -> Option<IcosahedralMatch> {
    let axis = icosahedral_axis();

    let mut best: Option<(Vec3, f64)> = None;
    for d in directions {
        let unit = d.normalize();
        if unit == Vec3::zero() {
            continue;
        }
        let alignment = unit.dot(&axis).abs().min(1.0);
        if best.map_or(true, |(_, a)| alignment > a) {
            best = Some((*d, alignment));
        }
    }

    best.map(|(direction, alignment)| {
        let deviation_deg = alignment.acos().to_degrees();
        IcosahedralMatch {
            direction,
            alignment,
            deviation_deg,
            strength: AlignmentStrength::from_deviation(deviation_deg),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Cube;

    #[test]
    fn test_canonical_sign() {
        let v = Vec3::new(-1.0, 2.0, 0.0);
        assert_eq!(canonicalize_direction(v), Vec3::new(1.0, -2.0, 0.0));
        assert_eq!(canonicalize_direction(-v), Vec3::new(1.0, -2.0, 0.0));
        assert_eq!(canonicalize_direction(Vec3::new(0.0, -1.0, 3.0)), Vec3::new(0.0, 1.0, -3.0));
        assert_eq!(canonicalize_direction(Vec3::zero()), Vec3::zero());
    }

    #[test]
    fn test_round_off_component_is_not_the_sign_carrier() {
        let a = canonicalize_direction(Vec3::new(1e-17, -1.0, 0.0));
        let b = canonicalize_direction(Vec3::new(-1e-17, 1.0, 0.0));
        assert_eq!(point_key(&a, ROUND_DIGITS), point_key(&b, ROUND_DIGITS));
    }

    #[test]
    fn test_cube_vertex_directions() {
        let vertices = Cube::axis_aligned(2.0).vertices();
        let directions = analyze_directions(&vertices, usize::MAX);
        // 3 axes, 6 face diagonals, 4 body diagonals
        assert_eq!(directions.len(), 13);
        for d in &directions {
            assert!((d.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_coincident_points_skipped() {
        let points = [Vec3::unit_x(), Vec3::unit_x(), Vec3::zero()];
        let directions = analyze_directions(&points, usize::MAX);
        assert_eq!(directions, vec![Vec3::unit_x()]);
    }

    #[test]
    fn test_cap_limits_directions() {
        let vertices = Cube::axis_aligned(1.0).vertices();
        // (0,1) → z, (0,2) → y
        let directions = analyze_directions(&vertices, 2);
        assert_eq!(directions, vec![Vec3::unit_z(), Vec3::unit_y()]);
    }

    #[test]
    fn test_icosahedral_alignment() {
        let exact = icosahedral_axis();
        let m = icosahedral_alignment(&[Vec3::unit_x(), -exact]).unwrap();
        assert!(m.deviation_deg < 1e-5);
        assert_eq!(m.strength, AlignmentStrength::Strong);

        // Best of the coordinate axes is z, about 31.7° away
        let m = icosahedral_alignment(&[Vec3::unit_x(), Vec3::unit_y(), Vec3::unit_z()]).unwrap();
        assert_eq!(m.direction, Vec3::unit_z());
        assert!((m.deviation_deg - 31.717).abs() < 0.01);
        assert_eq!(m.strength, AlignmentStrength::Weak);
    }

    #[test]
    fn test_icosahedral_alignment_empty() {
        assert!(icosahedral_alignment(&[]).is_none());
        assert!(icosahedral_alignment(&[Vec3::zero()]).is_none());
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(AlignmentStrength::from_deviation(4.9), AlignmentStrength::Strong);
        assert_eq!(AlignmentStrength::from_deviation(5.0), AlignmentStrength::Moderate);
        assert_eq!(AlignmentStrength::from_deviation(14.9), AlignmentStrength::Moderate);
        assert_eq!(AlignmentStrength::from_deviation(15.0), AlignmentStrength::Weak);
    }
}
