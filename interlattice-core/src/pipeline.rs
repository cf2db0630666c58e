//! Pipeline: one configuration in, one analysis record out.
//!
//! ```text
//! (side, angle, axis) → cube A (identity) + cube B (rotated)
//!     → vertices + edge×face hits (both ways) + edge×edge hits
//!     → unique_points
//!     → distances → ratio scans
//!     → directions → angles → special angles
//!                 → icosahedral alignment
//! ```
//!
//! Pure and deterministic: the same configuration always gives the same
//! record, and nothing is read or written along the way.
//!
//! Lengths are measured in units of the cube side: the edge crossing
//! tolerance, the point rounding grid and the distance buckets all scale
//! with `side`. Scaling `side` by `k` therefore scales every distance by `k`
//! and leaves counts, directions, angles and ratio candidates unchanged.

use crate::config::AnalysisConfig;
use crate::dedup::unique_points_in_units;
use crate::geometry::{Cube, RotationAxis};
use crate::intersection::{edge_edge_intersections, edge_face_intersections};
use crate::spectrum::{
    analyze_angles, analyze_directions, analyze_distances_in_units, classify_special_angles,
    icosahedral_alignment, scan_for_phi, scan_notable_ratios, AlignmentStrength, Histogram,
    IcosahedralMatch, PhiCandidate, RatioCount, SpecialAngleCount,
};
use crate::vector::Vec3;
use crate::{EPS, ROUND_DIGITS};
use serde::{Deserialize, Serialize};

/// Everything derived from one two-cube configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub side: f64,
    pub angle_deg: f64,
    pub axis: RotationAxis,
    pub max_distance_pairs: usize,
    pub max_direction_pairs: usize,

    /// Vertices of both cubes (16)
    pub vertex_count: usize,
    /// Edge×face hits, both cubes' edges against the other's faces
    pub edge_face_count: usize,
    /// Edge×edge crossings
    pub edge_edge_count: usize,
    /// All candidates before deduplication
    pub raw_point_count: usize,
    pub unique_point_count: usize,

    pub distance_histogram: Histogram,
    pub directions: Vec<Vec3>,
    pub angle_histogram: Histogram,
    pub phi_candidates: Vec<PhiCandidate>,
    pub ratio_counts: Vec<RatioCount>,
    pub special_angles: Vec<SpecialAngleCount>,
    pub icosahedral: Option<IcosahedralMatch>,
}

impl AnalysisResult {
    /// Occurrence entry for a special angle (degrees), if it is in the table
    pub fn special_angle(&self, angle: f64) -> Option<&SpecialAngleCount> {
        self.special_angles.iter().find(|s| (s.angle - angle).abs() < 1e-9)
    }

    /// Candidate count for a named entry of the notable-ratio table
    pub fn ratio_count(&self, name: &str) -> Option<usize> {
        self.ratio_counts.iter().find(|r| r.name == name).map(|r| r.count)
    }

    pub fn summary(&self) -> ResultSummary {
        let dominant_special_angle = self
            .special_angles
            .iter()
            .filter(|s| s.count > 0)
            .fold(None::<&SpecialAngleCount>, |best, s| match best {
                Some(b) if b.count >= s.count => Some(b),
                _ => Some(s),
            })
            .map(|s| s.angle);

        ResultSummary {
            side: self.side,
            angle_deg: self.angle_deg,
            axis: self.axis,
            unique_point_count: self.unique_point_count,
            distance_count: self.distance_histogram.len(),
            direction_count: self.directions.len(),
            phi_candidate_count: self.phi_candidates.len(),
            dominant_special_angle,
            icosahedral_strength: self.icosahedral.map(|m| m.strength),
        }
    }
}

/// Compact view of an [`AnalysisResult`], one line per sweep step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub side: f64,
    pub angle_deg: f64,
    pub axis: RotationAxis,
    pub unique_point_count: usize,
    /// Distinct distances
    pub distance_count: usize,
    pub direction_count: usize,
    pub phi_candidate_count: usize,
    /// Special angle with the most occurrences (ties go to the smaller angle)
    pub dominant_special_angle: Option<f64>,
    pub icosahedral_strength: Option<AlignmentStrength>,
}

/// The axis-aligned cube and its rotated twin, both centred at the origin
pub fn build_cubes(side: f64, angle_deg: f64, axis: RotationAxis) -> (Cube, Cube) {
    let a = Cube::axis_aligned(side);
    let b = Cube::new(Vec3::zero(), side, axis.rotation(angle_deg.to_radians()));
    (a, b)
}

/// Length unit of a lattice built from cubes of edge `side`.
///
/// Degenerate sides fall back to 1 so rounding grids stay finite.
pub fn lattice_unit(side: f64) -> f64 {
    if side.is_finite() && side > EPS {
        side
    } else {
        1.0
    }
}

/// Raw lattice candidates grouped by origin
#[derive(Debug, Clone, Default)]
pub struct LatticeCandidates {
    pub vertices: Vec<Vec3>,
    pub edge_face: Vec<Vec3>,
    pub edge_edge: Vec<Vec3>,
}

impl LatticeCandidates {
    /// All candidates: vertices, then edge×face, then edge×edge
    pub fn all(&self) -> Vec<Vec3> {
        let mut points =
            Vec::with_capacity(self.vertices.len() + self.edge_face.len() + self.edge_edge.len());
        points.extend_from_slice(&self.vertices);
        points.extend_from_slice(&self.edge_face);
        points.extend_from_slice(&self.edge_edge);
        points
    }
}

/// Collect every lattice candidate of two cubes
pub fn collect_candidates(a: &Cube, b: &Cube, edge_tolerance: f64) -> LatticeCandidates {
    let (edges_a, edges_b) = (a.edges(), b.edges());
    let (faces_a, faces_b) = (a.faces(), b.faces());

    let mut vertices = a.vertices().to_vec();
    vertices.extend_from_slice(&b.vertices());

    let mut edge_face = edge_face_intersections(&edges_a, &faces_b);
    edge_face.extend(edge_face_intersections(&edges_b, &faces_a));

    let edge_edge = edge_edge_intersections(&edges_a, &edges_b, edge_tolerance);

    LatticeCandidates {
        vertices,
        edge_face,
        edge_edge,
    }
}

/// Analyse one configuration with default tolerances.
///
/// `angle_deg` is in degrees. The caps bound the pairwise distance and
/// direction spectra; see [`crate::spectrum`] for what truncation drops.
pub fn run(
    side: f64,
    angle_deg: f64,
    axis: RotationAxis,
    max_distance_pairs: usize,
    max_direction_pairs: usize,
) -> AnalysisResult {
    let config = AnalysisConfig::new(side, angle_deg, axis)
        .with_pair_caps(max_distance_pairs, max_direction_pairs);
    run_config(&config)
}

/// Analyse one configuration.
///
/// Does not validate `config`; degenerate values (e.g. `side = 0`) yield
/// small or empty spectra rather than a panic. `edge_tolerance` is taken in
/// units of `side`.
pub fn run_config(config: &AnalysisConfig) -> AnalysisResult {
    let unit = lattice_unit(config.side);
    let (a, b) = build_cubes(config.side, config.angle_deg, config.axis);
    let candidates = collect_candidates(&a, &b, config.edge_tolerance * unit);
    let raw = candidates.all();
    let points = unique_points_in_units(&raw, ROUND_DIGITS, unit);

    tracing::debug!(
        side = config.side,
        angle_deg = config.angle_deg,
        axis = %config.axis,
        edge_face = candidates.edge_face.len(),
        edge_edge = candidates.edge_edge.len(),
        raw = raw.len(),
        unique = points.len(),
        "lattice built"
    );

    let distance_histogram =
        analyze_distances_in_units(&points, config.max_distance_pairs, unit);
    let phi_candidates = scan_for_phi(&distance_histogram, config.phi_tolerance);
    let ratio_counts = scan_notable_ratios(&distance_histogram, config.ratio_tolerance);

    let directions = analyze_directions(&points, config.max_direction_pairs);
    let angle_histogram = analyze_angles(&directions);
    let special_angles = classify_special_angles(&angle_histogram);
    let icosahedral = icosahedral_alignment(&directions);

    tracing::debug!(
        distances = distance_histogram.len(),
        directions = directions.len(),
        angles = angle_histogram.len(),
        phi_candidates = phi_candidates.len(),
        "spectra computed"
    );

    AnalysisResult {
        side: config.side,
        angle_deg: config.angle_deg,
        axis: config.axis,
        max_distance_pairs: config.max_distance_pairs,
        max_direction_pairs: config.max_direction_pairs,
        vertex_count: candidates.vertices.len(),
        edge_face_count: candidates.edge_face.len(),
        edge_edge_count: candidates.edge_edge.len(),
        raw_point_count: raw.len(),
        unique_point_count: points.len(),
        distance_histogram,
        directions,
        angle_histogram,
        phi_candidates,
        ratio_counts,
        special_angles,
        icosahedral,
    }
}

/// Run `base` once per angle, in order. Other fields of `base` are shared.
pub fn sweep(base: &AnalysisConfig, angles_deg: &[f64]) -> Vec<AnalysisResult> {
    angles_deg
        .iter()
        .map(|&angle| run_config(&base.clone().with_angle(angle)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turn_is_the_same_cube() {
        let result = run(1.0, 90.0, RotationAxis::Z, 20_000, 10_000);
        assert_eq!(result.vertex_count, 16);
        assert_eq!(result.unique_point_count, 8);
        assert_eq!(result.distance_histogram.len(), 3);
        assert_eq!(result.directions.len(), 13);
    }

    #[test]
    fn test_zero_rotation_matches_quarter_turn() {
        let still = run(1.0, 0.0, RotationAxis::Z, 20_000, 10_000);
        let quarter = run(1.0, 90.0, RotationAxis::Z, 20_000, 10_000);
        assert_eq!(still.unique_point_count, quarter.unique_point_count);
        let buckets = |r: &AnalysisResult| -> Vec<(f64, usize)> {
            r.angle_histogram.bins().iter().map(|b| (b.value, b.count)).collect()
        };
        assert_eq!(buckets(&still), buckets(&quarter));
    }

    #[test]
    fn test_candidates_grouped() {
        let (a, b) = build_cubes(1.0, 45.0, RotationAxis::Z);
        let c = collect_candidates(&a, &b, 1e-6);
        assert_eq!(c.vertices.len(), 16);
        assert!(!c.edge_face.is_empty());
        assert_eq!(
            c.all().len(),
            c.vertices.len() + c.edge_face.len() + c.edge_edge.len()
        );
    }

    #[test]
    fn test_zero_side_does_not_panic() {
        let result = run(0.0, 30.0, RotationAxis::X, 100, 100);
        assert_eq!(result.unique_point_count, 1);
        assert!(result.distance_histogram.is_empty());
        assert!(result.directions.is_empty());
        assert!(result.angle_histogram.is_empty());
        assert!(result.phi_candidates.is_empty());
        assert!(result.icosahedral.is_none());
        assert!(result.special_angles.iter().all(|s| s.count == 0));
    }

    #[test]
    fn test_lattice_unit() {
        assert_eq!(lattice_unit(2.5), 2.5);
        assert_eq!(lattice_unit(0.0), 1.0);
        assert_eq!(lattice_unit(1e-12), 1.0);
        assert_eq!(lattice_unit(f64::NAN), 1.0);
    }

    #[test]
    fn test_summary() {
        let result = run(1.0, 90.0, RotationAxis::Z, 20_000, 10_000);
        let summary = result.summary();
        assert_eq!(summary.unique_point_count, 8);
        assert_eq!(summary.direction_count, 13);
        assert_eq!(summary.dominant_special_angle, Some(90.0));
    }

    #[test]
    fn test_sweep_keeps_order() {
        let base = AnalysisConfig::default().with_pair_caps(500, 500);
        let results = sweep(&base, &[0.0, 30.0, 45.0]);
        let angles: Vec<f64> = results.iter().map(|r| r.angle_deg).collect();
        assert_eq!(angles, vec![0.0, 30.0, 45.0]);
        assert!(results.iter().all(|r| r.max_distance_pairs == 500));
    }
}
