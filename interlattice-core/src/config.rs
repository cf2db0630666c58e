//! Analysis configuration.
//!
//! `AnalysisConfig` is what callers fill in (from flags, a JSON file or code)
//! before handing it to [`crate::run_config`]. The pipeline itself trusts its
//! input; [`AnalysisConfig::validate`] is where out-of-range values are
//! rejected.

use crate::error::{LatticeError, Result};
use crate::geometry::RotationAxis;
use crate::intersection::EDGE_TOLERANCE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default pair cap for the distance spectrum
pub const DEFAULT_MAX_DISTANCE_PAIRS: usize = 20_000;

/// Default pair cap for the direction spectrum
pub const DEFAULT_MAX_DIRECTION_PAIRS: usize = 10_000;

/// Default acceptance for `|a/b − φ|`
pub const DEFAULT_PHI_TOLERANCE: f64 = 1e-3;

/// Parameters of one two-cube analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Edge length of both cubes
    pub side: f64,
    /// Rotation of the second cube (degrees)
    pub angle_deg: f64,
    pub axis: RotationAxis,
    pub max_distance_pairs: usize,
    pub max_direction_pairs: usize,
    pub phi_tolerance: f64,
    /// Acceptance for the other entries of the notable-ratio table
    pub ratio_tolerance: f64,
    /// Largest gap between two edges still counted as a crossing, in units
    /// of `side`
    pub edge_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            side: 1.0,
            angle_deg: 45.0,
            axis: RotationAxis::Z,
            max_distance_pairs: DEFAULT_MAX_DISTANCE_PAIRS,
            max_direction_pairs: DEFAULT_MAX_DIRECTION_PAIRS,
            phi_tolerance: DEFAULT_PHI_TOLERANCE,
            ratio_tolerance: DEFAULT_PHI_TOLERANCE,
            edge_tolerance: EDGE_TOLERANCE,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration for one `(side, angle, axis)` triple
    pub fn new(side: f64, angle_deg: f64, axis: RotationAxis) -> Self {
        Self {
            side,
            angle_deg,
            axis,
            ..Self::default()
        }
    }

    pub fn with_side(mut self, side: f64) -> Self {
        self.side = side;
        self
    }

    pub fn with_angle(mut self, angle_deg: f64) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    pub fn with_axis(mut self, axis: RotationAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Set both pair caps
    pub fn with_pair_caps(mut self, max_distance_pairs: usize, max_direction_pairs: usize) -> Self {
        self.max_distance_pairs = max_distance_pairs;
        self.max_direction_pairs = max_direction_pairs;
        self
    }

    pub fn with_phi_tolerance(mut self, tol: f64) -> Self {
        self.phi_tolerance = tol;
        self
    }

    pub fn with_ratio_tolerance(mut self, tol: f64) -> Self {
        self.ratio_tolerance = tol;
        self
    }

    pub fn with_edge_tolerance(mut self, tol: f64) -> Self {
        self.edge_tolerance = tol;
        self
    }

    /// Check every field is finite and in range
    pub fn validate(&self) -> Result<()> {
        if !self.side.is_finite() || self.side < 0.0 {
            return Err(LatticeError::invalid(
                "side",
                format!("must be finite and non-negative, got {}", self.side),
            ));
        }
        if !self.angle_deg.is_finite() {
            return Err(LatticeError::invalid(
                "angle_deg",
                format!("must be finite, got {}", self.angle_deg),
            ));
        }
        self.axis.validate()?;

        if self.max_distance_pairs == 0 {
            return Err(LatticeError::invalid("max_distance_pairs", "must be positive"));
        }
        if self.max_direction_pairs == 0 {
            return Err(LatticeError::invalid("max_direction_pairs", "must be positive"));
        }

        for (name, tol) in [
            ("phi_tolerance", self.phi_tolerance),
            ("ratio_tolerance", self.ratio_tolerance),
            ("edge_tolerance", self.edge_tolerance),
        ] {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(LatticeError::invalid(
                    name,
                    format!("must be finite and positive, got {}", tol),
                ));
            }
        }

        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LatticeError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LatticeError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;

    #[test]
    fn test_default_is_valid() {
        AnalysisConfig::default().validate().unwrap();
        AnalysisConfig::new(0.0, 90.0, RotationAxis::X).validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = AnalysisConfig::default();

        let err = base.clone().with_side(-1.0).validate().unwrap_err();
        assert!(matches!(err, LatticeError::InvalidParameter { name: "side", .. }));

        let err = base.clone().with_angle(f64::NAN).validate().unwrap_err();
        assert!(matches!(err, LatticeError::InvalidParameter { name: "angle_deg", .. }));

        let err = base.clone().with_pair_caps(0, 10).validate().unwrap_err();
        assert!(matches!(err, LatticeError::InvalidParameter { name: "max_distance_pairs", .. }));

        let err = base.clone().with_ratio_tolerance(-1e-3).validate().unwrap_err();
        assert!(matches!(err, LatticeError::InvalidParameter { name: "ratio_tolerance", .. }));

        let err = base.clone().with_edge_tolerance(0.0).validate().unwrap_err();
        assert!(matches!(err, LatticeError::InvalidParameter { name: "edge_tolerance", .. }));

        let err = base
            .with_axis(RotationAxis::Custom(Vec3::zero()))
            .validate()
            .unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateAxis));
    }

    #[test]
    fn test_builders_set_tolerances() {
        let config = AnalysisConfig::default()
            .with_phi_tolerance(1e-4)
            .with_ratio_tolerance(5e-3)
            .with_edge_tolerance(1e-7);
        assert_eq!(config.phi_tolerance, 1e-4);
        assert_eq!(config.ratio_tolerance, 5e-3);
        assert_eq!(config.edge_tolerance, 1e-7);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{ "side": 2.0, "axis": { "custom": { "x": 1.0, "y": 1.0, "z": 1.0 } } }"#)
                .unwrap();
        assert_eq!(config.side, 2.0);
        assert_eq!(config.angle_deg, 45.0);
        assert_eq!(config.axis, RotationAxis::Custom(Vec3::new(1.0, 1.0, 1.0)));
        assert_eq!(config.max_distance_pairs, DEFAULT_MAX_DISTANCE_PAIRS);
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join(format!("interlattice-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "angle_deg": 30.0, "axis": "x" }"#).unwrap();

        let config = AnalysisConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.angle_deg, 30.0);
        assert_eq!(config.axis, RotationAxis::X);
    }

    #[test]
    fn test_from_missing_file() {
        let err = AnalysisConfig::from_json_file("/nonexistent/interlattice.json").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_IO");
    }
}
