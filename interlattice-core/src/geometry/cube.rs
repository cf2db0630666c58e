//! Cube value type and its derived wireframe.
//!
//! A cube stores only `center`, `side` and `rotation`. Vertices, edges and
//! faces are recomputed on every call so there is no cached geometry to keep
//! in sync.

use super::rotation::Mat3;
use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Vertex-index pairs forming the 12 cube edges.
///
/// Vertex `i` has x sign from bit 2, y sign from bit 1, z sign from bit 0
/// (bit set = positive), so every pair differs in exactly one bit.
#[rustfmt::skip]
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (0, 2), (0, 4),
    (1, 3), (1, 5),
    (2, 3), (2, 6),
    (3, 7),
    (4, 5), (4, 6),
    (5, 7),
    (6, 7),
];

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub p0: Vec3,
    pub p1: Vec3,
}

impl Edge {
    pub const fn new(p0: Vec3, p1: Vec3) -> Self {
        Self { p0, p1 }
    }

    /// Unnormalized direction `p1 - p0`
    #[inline]
    pub fn vector(&self) -> Vec3 {
        self.p1 - self.p0
    }

    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Unit direction; zero for a degenerate edge
    pub fn direction(&self) -> Vec3 {
        self.vector().normalize()
    }

    pub fn midpoint(&self) -> Vec3 {
        self.p0.midpoint(&self.p1)
    }

    /// Point at parameter `t` (0 at `p0`, 1 at `p1`)
    #[inline]
    pub fn point_at(&self, t: f64) -> Vec3 {
        self.p0 + self.vector() * t
    }
}

/// A square face.
///
/// `u`, `v` and `normal` are mutually orthogonal unit vectors; the face spans
/// `center ± half_size·u ± half_size·v`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub center: Vec3,
    pub normal: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub half_size: f64,
}

impl Face {
    /// The four corners
    pub fn corners(&self) -> [Vec3; 4] {
        let u = self.u * self.half_size;
        let v = self.v * self.half_size;
        [
            self.center - u - v,
            self.center + u - v,
            self.center + u + v,
            self.center - u + v,
        ]
    }

    /// Signed distance of `point` from the face plane
    #[inline]
    pub fn signed_distance(&self, point: &Vec3) -> f64 {
        (*point - self.center).dot(&self.normal)
    }
}

/// A cube of edge length `side`, rotated by `rotation` about its `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub center: Vec3,
    pub side: f64,
    pub rotation: Mat3,
}

impl Cube {
    /// Create a cube. `rotation` should be a proper rotation matrix.
    pub fn new(center: Vec3, side: f64, rotation: Mat3) -> Self {
        Self {
            center,
            side,
            rotation,
        }
    }

    /// Axis-aligned cube centred at the origin
    pub fn axis_aligned(side: f64) -> Self {
        Self::new(Vec3::zero(), side, Mat3::identity())
    }

    /// Half the edge length
    #[inline]
    pub fn half_side(&self) -> f64 {
        self.side / 2.0
    }

    /// Map a point from the cube's local frame to world space
    #[inline]
    fn to_world(&self, local: Vec3) -> Vec3 {
        self.rotation.mul_vec(&local) + self.center
    }

    /// The 8 corners, ordered as described on [`CUBE_EDGES`]
    pub fn vertices(&self) -> [Vec3; 8] {
        let h = self.half_side();
        std::array::from_fn(|i| {
            let sign = |bit: usize| if i & (1 << bit) != 0 { h } else { -h };
            self.to_world(Vec3::new(sign(2), sign(1), sign(0)))
        })
    }

    /// The 12 edges
    pub fn edges(&self) -> [Edge; 12] {
        let vertices = self.vertices();
        CUBE_EDGES.map(|(a, b)| Edge::new(vertices[a], vertices[b]))
    }

    /// The 6 faces: -x, +x, -y, +y, -z, +z in the local frame
    pub fn faces(&self) -> [Face; 6] {
        let h = self.half_side();
        std::array::from_fn(|i| {
            let axis = i / 2;
            let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
            let normal = self.rotation.mul_vec(&(Vec3::basis(axis) * sign));
            Face {
                center: self.center + normal * h,
                normal,
                u: self.rotation.mul_vec(&Vec3::basis(axis + 1)),
                v: self.rotation.mul_vec(&Vec3::basis(axis + 2)),
                half_size: h,
            }
        })
    }

    /// Distance from the centre to any vertex: `side·√3/2`
    pub fn circumradius(&self) -> f64 {
        self.side * 3.0_f64.sqrt() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::rotation::rotation_matrix_axis;

    fn tilted_cube() -> Cube {
        Cube::new(
            Vec3::new(0.3, -1.0, 2.0),
            1.7,
            rotation_matrix_axis(Vec3::new(1.0, 2.0, 3.0), 0.9),
        )
    }

    #[test]
    fn test_counts() {
        let cube = tilted_cube();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.edges().len(), 12);
        assert_eq!(cube.faces().len(), 6);
    }

    #[test]
    fn test_vertices_on_circumsphere() {
        let cube = tilted_cube();
        for v in cube.vertices() {
            assert!((v.distance(&cube.center) - cube.circumradius()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_edge_table_is_a_wireframe() {
        let mut degree = [0usize; 8];
        for (a, b) in CUBE_EDGES {
            assert_eq!((a ^ b).count_ones(), 1, "edge ({}, {}) is not a cube edge", a, b);
            degree[a] += 1;
            degree[b] += 1;
        }
        assert!(degree.iter().all(|&d| d == 3));
    }

    #[test]
    fn test_edges_have_side_length() {
        let cube = tilted_cube();
        for edge in cube.edges() {
            assert!((edge.length() - cube.side).abs() < 1e-12);
            assert!((edge.direction().norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_face_frames_are_orthonormal() {
        let cube = tilted_cube();
        for face in cube.faces() {
            for w in [face.u, face.v, face.normal] {
                assert!((w.norm() - 1.0).abs() < 1e-12);
            }
            assert!(face.u.dot(&face.v).abs() < 1e-12);
            assert!(face.u.dot(&face.normal).abs() < 1e-12);
            assert!(face.v.dot(&face.normal).abs() < 1e-12);
            assert!(((face.center - cube.center).norm() - cube.half_side()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_each_face_holds_four_vertices() {
        let cube = tilted_cube();
        let vertices = cube.vertices();
        for face in cube.faces() {
            let on_plane = vertices
                .iter()
                .filter(|v| face.signed_distance(v).abs() < 1e-12)
                .count();
            assert_eq!(on_plane, 4);
            for corner in face.corners() {
                assert!(vertices.iter().any(|v| v.distance(&corner) < 1e-12));
            }
        }
    }

    #[test]
    fn test_zero_side_collapses_to_center() {
        let cube = Cube::axis_aligned(0.0);
        assert!(cube.vertices().iter().all(|v| *v == Vec3::zero()));
        assert!(cube.edges().iter().all(|e| e.direction() == Vec3::zero()));
    }
}
