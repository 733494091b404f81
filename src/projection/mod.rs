//! Spherical point to face-plane projection and its inverse.

pub mod dodecahedron;
pub mod gnomonic;
pub mod slice_dice;

pub use dodecahedron::{project_point, unproject_face_point, unproject_point, FaceCoords};
