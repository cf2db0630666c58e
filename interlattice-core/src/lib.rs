//! # Interlattice-Core
//!
//! Interference lattices of two superimposed cubes.
//!
//! One cube is axis-aligned, the other is rotated about an axis. The union of
//! both vertex sets together with every edge–face and edge–edge crossing forms
//! the *interference lattice*. This crate derives that point set and computes
//! spectra over it:
//!
//! - **Distance spectrum**: histogram of pairwise distances
//! - **Direction spectrum**: canonical (sign-free) pairwise directions
//! - **Angle spectrum**: histogram of angles between those directions
//! - **Ratio scan**: distance pairs whose ratio is close to φ or another notable ratio
//!
//! Everything is pure and deterministic. No caching, no I/O inside the
//! pipeline, no shared mutable state: callers may run analyses from as many
//! threads as they like.
//!
//! ## Example
//!
//! ```rust
//! use interlattice_core::{run, RotationAxis};
//!
//! let result = run(1.0, 45.0, RotationAxis::Z, 20_000, 10_000);
//!
//! assert!(result.unique_point_count > 16);
//! assert!(result.special_angle(45.0).map_or(0, |s| s.count) > 0);
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod pipeline;
pub mod spectrum;
pub mod vector;

// Re-exports for convenience
pub use config::AnalysisConfig;
pub use dedup::{unique_points, unique_points_in_units};
pub use error::{LatticeError, Result};
pub use geometry::{rotation_matrix_axis, rotation_matrix_z, Cube, Edge, Face, Mat3, RotationAxis};
pub use intersection::{
    closest_points_on_lines, edge_edge_intersections, edge_face_intersections,
    intersect_line_plane, point_in_face,
};
pub use pipeline::{run, run_config, sweep, AnalysisResult, ResultSummary};
pub use spectrum::{
    analyze_angles, analyze_directions, analyze_distances, analyze_distances_in_units,
    scan_for_phi, scan_for_ratio, Histogram, HistogramBin, IcosahedralMatch, PhiCandidate,
    SpecialAngleCount,
};
pub use vector::Vec3;

/// Tolerance for every "is this zero / parallel / coincident" decision
pub const EPS: f64 = 1e-9;

/// Decimal digits kept when two coordinates must compare equal
pub const ROUND_DIGITS: u32 = 9;

/// Golden ratio φ = (1 + √5) / 2
///
/// Only used to compare ratios against, never to build geometry.
pub const PHI: f64 = 1.618_033_988_749_895;
