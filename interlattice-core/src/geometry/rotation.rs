//! Rotation matrices for orienting the second cube.

use crate::error::{LatticeError, Result};
use crate::vector::Vec3;
use crate::EPS;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A 3×3 matrix, row-major.
///
/// Cubes expect a proper rotation (orthonormal, determinant +1). Use
/// [`Mat3::is_orthonormal`] and [`Mat3::determinant`] to check one that did
/// not come from [`rotation_matrix_axis`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat3 {
    pub rows: [[f64; 3]; 3],
}

impl Mat3 {
    /// Create from rows
    pub const fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Identity matrix
    pub const fn identity() -> Self {
        Self::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Apply to a vector
    #[inline]
    pub fn mul_vec(&self, v: &Vec3) -> Vec3 {
        let r = &self.rows;
        Vec3::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }

    /// Column `i` (the image of local axis `i`)
    pub fn column(&self, i: usize) -> Vec3 {
        Vec3::new(self.rows[0][i], self.rows[1][i], self.rows[2][i])
    }

    /// Transpose (the inverse, for a rotation)
    pub fn transpose(&self) -> Self {
        let r = &self.rows;
        Self::new([
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ])
    }

    /// Determinant, by cofactor expansion along the first row
    pub fn determinant(&self) -> f64 {
        let r = &self.rows;
        r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
    }

    /// True if `Mᵀ·M` is the identity within `tol`
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        let product = self.transpose() * *self;
        let identity = Self::identity();
        (0..3).all(|i| (0..3).all(|j| (product.rows[i][j] - identity.rows[i][j]).abs() <= tol))
    }

    /// True if orthonormal with determinant +1
    pub fn is_rotation(&self, tol: f64) -> bool {
        self.is_orthonormal(tol) && (self.determinant() - 1.0).abs() <= tol
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum();
            }
        }
        Self::new(rows)
    }
}

/// Rotation by `theta` radians about `axis` (Rodrigues' formula).
///
/// `axis` is normalized here. A zero axis contributes nothing, leaving
/// `cos(theta)·I`, which is not a rotation: callers must not pass one.
pub fn rotation_matrix_axis(axis: Vec3, theta: f64) -> Mat3 {
    let k = axis.normalize();
    let (s, c) = theta.sin_cos();
    let t = 1.0 - c;

    Mat3::new([
        [c + t * k.x * k.x, t * k.x * k.y - s * k.z, t * k.x * k.z + s * k.y],
        [t * k.y * k.x + s * k.z, c + t * k.y * k.y, t * k.y * k.z - s * k.x],
        [t * k.z * k.x - s * k.y, t * k.z * k.y + s * k.x, c + t * k.z * k.z],
    ])
}

/// Rotation by `theta` radians about the z axis
pub fn rotation_matrix_z(theta: f64) -> Mat3 {
    let (s, c) = theta.sin_cos();
    Mat3::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
}

/// Axis the second cube is rotated about
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationAxis {
    X,
    Y,
    #[default]
    Z,
    /// Arbitrary direction, normalized on use
    Custom(Vec3),
}

impl RotationAxis {
    /// The axis direction (unnormalized for `Custom`)
    pub fn vector(&self) -> Vec3 {
        match self {
            RotationAxis::X => Vec3::unit_x(),
            RotationAxis::Y => Vec3::unit_y(),
            RotationAxis::Z => Vec3::unit_z(),
            RotationAxis::Custom(v) => *v,
        }
    }

    /// Rotation matrix for `theta` radians about this axis
    pub fn rotation(&self, theta: f64) -> Mat3 {
        match self {
            RotationAxis::Z => rotation_matrix_z(theta),
            other => rotation_matrix_axis(other.vector(), theta),
        }
    }

    /// Rejects custom axes that are non-finite or too short to normalize
    pub fn validate(&self) -> Result<()> {
        let v = self.vector();
        if !v.is_finite() {
            return Err(LatticeError::InvalidAxis(self.to_string()));
        }
        if v.norm() < EPS {
            return Err(LatticeError::DegenerateAxis);
        }
        Ok(())
    }
}

impl std::fmt::Display for RotationAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationAxis::X => write!(f, "x"),
            RotationAxis::Y => write!(f, "y"),
            RotationAxis::Z => write!(f, "z"),
            RotationAxis::Custom(v) => write!(f, "{},{},{}", v.x, v.y, v.z),
        }
    }
}

impl std::str::FromStr for RotationAxis {
    type Err = LatticeError;

    /// Accepts `x`, `y`, `z` or three comma-separated components
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(RotationAxis::X),
            "y" => Ok(RotationAxis::Y),
            "z" => Ok(RotationAxis::Z),
            other => {
                let parts = other
                    .split(',')
                    .map(|p| p.trim().parse::<f64>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|_| LatticeError::InvalidAxis(s.to_string()))?;
                let &[x, y, z] = parts.as_slice() else {
                    return Err(LatticeError::InvalidAxis(s.to_string()));
                };
                let axis = RotationAxis::Custom(Vec3::new(x, y, z));
                axis.validate()?;
                Ok(axis)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    fn assert_mat_close(a: &Mat3, b: &Mat3, tol: f64) {
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (a.rows[i][j] - b.rows[i][j]).abs() < tol,
                    "entry ({}, {}) differs: {} vs {}",
                    i,
                    j,
                    a.rows[i][j],
                    b.rows[i][j]
                );
            }
        }
    }

    #[test]
    fn test_z_rotation_matches_general_form() {
        for theta in [0.0, 0.3, FRAC_PI_3, FRAC_PI_2, PI, -1.2] {
            let general = rotation_matrix_axis(Vec3::unit_z(), theta);
            assert_mat_close(&general, &rotation_matrix_z(theta), 1e-15);
        }
    }

    #[test]
    fn test_quarter_turn_maps_x_to_y() {
        let r = rotation_matrix_z(FRAC_PI_2);
        let v = r.mul_vec(&Vec3::unit_x());
        assert!((v.x).abs() < 1e-15);
        assert!((v.y - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_axis_is_normalized_internally() {
        let a = rotation_matrix_axis(Vec3::new(0.0, 0.0, 5.0), 0.7);
        assert_mat_close(&a, &rotation_matrix_z(0.7), 1e-15);
    }

    #[test]
    fn test_rodrigues_is_proper_rotation() {
        let r = rotation_matrix_axis(Vec3::new(1.0, 2.0, -0.5), 1.1);
        assert!(r.is_orthonormal(1e-12));
        assert!((r.determinant() - 1.0).abs() < 1e-12);
        assert!(r.is_rotation(1e-12));
    }

    #[test]
    fn test_determinant_of_reflection_and_scale() {
        let mirror = Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]]);
        assert_eq!(mirror.determinant(), -1.0);
        assert!(mirror.is_orthonormal(1e-12));
        assert!(!mirror.is_rotation(1e-12));

        let shear = Mat3::new([[2.0, 1.0, 0.0], [0.0, 3.0, 0.0], [4.0, 0.0, 0.5]]);
        assert_eq!(shear.determinant(), 3.0);
    }

    #[test]
    fn test_zero_axis_leaves_scaled_identity() {
        let r = rotation_matrix_axis(Vec3::zero(), FRAC_PI_3);
        let c = FRAC_PI_3.cos();
        assert_mat_close(&r, &Mat3::new([[c, 0.0, 0.0], [0.0, c, 0.0], [0.0, 0.0, c]]), 1e-15);
        assert!(!r.is_rotation(1e-9));
    }

    #[test]
    fn test_axis_parsing() {
        assert_eq!("X".parse::<RotationAxis>().unwrap(), RotationAxis::X);
        assert_eq!(" z ".parse::<RotationAxis>().unwrap(), RotationAxis::Z);
        assert_eq!(
            "1, 1, 0".parse::<RotationAxis>().unwrap(),
            RotationAxis::Custom(Vec3::new(1.0, 1.0, 0.0))
        );
        assert!(matches!("w".parse::<RotationAxis>(), Err(LatticeError::InvalidAxis(_))));
        assert!(matches!("1,2".parse::<RotationAxis>(), Err(LatticeError::InvalidAxis(_))));
        assert!(matches!("0,0,0".parse::<RotationAxis>(), Err(LatticeError::DegenerateAxis)));
    }

    #[test]
    fn test_axis_serde_roundtrip() {
        let axis = RotationAxis::Custom(Vec3::new(1.0, 0.0, 1.0));
        let json = serde_json::to_string(&axis).unwrap();
        let back: RotationAxis = serde_json::from_str(&json).unwrap();
        assert_eq!(axis, back);
        assert_eq!(serde_json::to_string(&RotationAxis::Y).unwrap(), "\"y\"");
    }
}
