//! Geometric primitives: rotations, cubes and their derived edges and faces.
//!
//! | Item | Derived from |
//! |------|--------------|
//! | 8 vertices | sign combinations of `(±s/2, ±s/2, ±s/2)`, rotated and translated |
//! | 12 edges | static vertex-index incidence table |
//! | 6 faces | one per local axis direction, normal and `(u, v)` basis rotated |

pub mod cube;
pub mod rotation;

pub use cube::{Cube, Edge, Face, CUBE_EDGES};
pub use rotation::{rotation_matrix_axis, rotation_matrix_z, Mat3, RotationAxis};
