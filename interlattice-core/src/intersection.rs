//! Intersection engine.
//!
//! Finds where the wireframe of one cube meets the other cube:
//!
//! - **Edge × face**: line–plane hit, restricted to the segment and the square
//! - **Edge × edge**: closest approach of the two carrier lines, accepted when
//!   it falls inside both segments and the gap is below a tolerance
//!
//! Both searches are exhaustive over their inputs (12 × 6 and 12 × 12 pairs
//! for two cubes). Parallel configurations never divide by a near-zero
//! denominator; they are reported as misses or resolved by projection.

use crate::geometry::{Edge, Face};
use crate::vector::Vec3;
use crate::EPS;
use serde::{Deserialize, Serialize};

/// Slack allowed when deciding whether a point lies on a face
pub const FACE_TOLERANCE: f64 = EPS;

/// Default gap below which two edges are considered to cross
pub const EDGE_TOLERANCE: f64 = 1e-6;

/// Where a line meets a plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePlaneHit {
    /// Line parameter, `0` at `p0` and `1` at `p1`. Not clamped.
    pub t: f64,
    pub point: Vec3,
}

/// Closest approach between two infinite lines `p1 + s·d1` and `p2 + t·d2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosestApproach {
    pub s: f64,
    pub t: f64,
    pub distance: f64,
}

/// Intersect the line through `p0`, `p1` with a plane.
///
/// Returns `None` when the line is parallel to the plane
/// (`|normal · (p1 - p0)| < EPS`).
pub fn intersect_line_plane(
    p0: Vec3,
    p1: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<LinePlaneHit> {
    let d = p1 - p0;
    let denom = plane_normal.dot(&d);
    if denom.abs() < EPS {
        return None;
    }

    let t = plane_normal.dot(&(plane_point - p0)) / denom;
    Some(LinePlaneHit {
        t,
        point: p0 + d * t,
    })
}

/// Check whether `point` lies on the square `face`, within `tol`.
///
/// Only valid for square faces with an orthonormal `(u, v, normal)` frame:
/// the test is a bounding box in the face's own coordinates.
pub fn point_in_face(face: &Face, point: &Vec3, tol: f64) -> bool {
    if face.signed_distance(point).abs() > tol {
        return false;
    }

    let offset = *point - face.center;
    let limit = face.half_size + tol;
    offset.dot(&face.u).abs() <= limit && offset.dot(&face.v).abs() <= limit
}

#[inline]
fn within_segment(param: f64) -> bool {
    (-EPS..=1.0 + EPS).contains(&param)
}

/// All points where an edge crosses a face, over every edge/face pair
pub fn edge_face_intersections(edges: &[Edge], faces: &[Face]) -> Vec<Vec3> {
    let mut points = Vec::new();

    for edge in edges {
        for face in faces {
            let Some(hit) = intersect_line_plane(edge.p0, edge.p1, face.center, face.normal) else {
                continue;
            };
            if within_segment(hit.t) && point_in_face(face, &hit.point, FACE_TOLERANCE) {
                points.push(hit.point);
            }
        }
    }

    points
}

/// Closest approach between the lines `p1 + s·d1` and `p2 + t·d2`.
///
/// Solves the 2×2 normal equations in `s`, `t`. When the directions are
/// parallel (`a·c − b² <= EPS·a·c`, with `a = d1·d1`, `b = d1·d2`,
/// `c = d2·d2`) the system is singular and the parameters come from a
/// projection instead:
///
/// - `d1` usable: `t = 0`, `s` projects `p2` onto line 1
/// - `d1` zero, `d2` usable: `s = 0`, `t` projects `p1` onto line 2
/// - both zero: `s = t = 0`
///
/// `distance` is always measured between the two returned points.
pub fn closest_points_on_lines(p1: Vec3, d1: Vec3, p2: Vec3, d2: Vec3) -> ClosestApproach {
    let w = p1 - p2;
    let a = d1.dot(&d1);
    let b = d1.dot(&d2);
    let c = d2.dot(&d2);
    let d = d1.dot(&w);
    let e = d2.dot(&w);
    let denom = a * c - b * b;

    let (s, t) = if denom <= EPS * a * c {
        if a >= EPS {
            (-d / a, 0.0)
        } else if c >= EPS {
            (0.0, e / c)
        } else {
            (0.0, 0.0)
        }
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };

    let q1 = p1 + d1 * s;
    let q2 = p2 + d2 * t;
    ClosestApproach {
        s,
        t,
        distance: q1.distance(&q2),
    }
}

/// All points where an edge of the first set crosses an edge of the second.
///
/// A pair counts when the closest approach of the carrier lines lies inside
/// both segments and the gap is below `tol`. The reported point is the
/// midpoint of the two closest points.
pub fn edge_edge_intersections(edges1: &[Edge], edges2: &[Edge], tol: f64) -> Vec<Vec3> {
    let mut points = Vec::new();

    for e1 in edges1 {
        let d1 = e1.vector();
        for e2 in edges2 {
            let d2 = e2.vector();
            let approach = closest_points_on_lines(e1.p0, d1, e2.p0, d2);

            if within_segment(approach.s)
                && within_segment(approach.t)
                && approach.distance < tol
            {
                let q1 = e1.p0 + d1 * approach.s;
                let q2 = e2.p0 + d2 * approach.t;
                points.push(q1.midpoint(&q2));
            }
        }
    }

    points
}
