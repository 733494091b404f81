//! Forward and inverse mapping between sphere and face plane.
//!
//! A point is first rotated into the face-local frame by the origin's
//! inverse quaternion; its gnomonic azimuth, corrected by the alignment
//! angle, selects the quintant wedge. The wedge's spherical triangle (face
//! axis and two polyhedron vertices) is then mapped onto the planar
//! quintant triangle by slice-and-dice: `t` is the area fraction at which
//! the great circle through the apex and the point cuts the vertex arc,
//! `s` the area fraction of the point along that cut. Area fractions carry
//! over to the planar triangle unchanged, which distributes the sphere's
//! area evenly across the sixty congruent quintant triangles.

use glam::DVec3;

use crate::constants::DEGENERATE_EPSILON;
use crate::coordinate::{determine_quintant, spherical_to_cartesian};
use crate::origins::{Origin, REFERENCE_FRAME};
use crate::projection::gnomonic::face_polar;
use crate::projection::slice_dice::{arc_intersection, slerp, solve_point_by_area, spherical_triangle_area};
use crate::types::FacePoint;

/// A point expressed in face-local slice-and-dice coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCoords {
  /// Quintant wedge, 0..=4.
  pub quintant: u8,
  /// Area fraction from the apex toward the vertex arc, 0 at the face
  /// center, 1 on the face edge.
  pub s: f64,
  /// Area fraction along the vertex arc, 0 at the wedge's first vertex.
  pub t: f64,
}

impl FaceCoords {
  /// Quintant-local Hilbert lattice coordinates at `level`. Clockwise
  /// faces mirror the lattice by swapping the two axes.
  #[must_use]
  pub fn to_lattice(&self, clockwise: bool, level: u32) -> [f64; 2] {
    let scale = (1u64 << level) as f64;
    let along_a = self.s * (1.0 - self.t) * scale;
    let along_b = self.s * self.t * scale;
    if clockwise {
      [along_b, along_a]
    } else {
      [along_a, along_b]
    }
  }

  /// Inverse of [`FaceCoords::to_lattice`].
  #[must_use]
  pub fn from_lattice(uv: [f64; 2], quintant: u8, clockwise: bool, level: u32) -> Self {
    let scale = (1u64 << level) as f64;
    let (along_a, along_b) = if clockwise { (uv[1], uv[0]) } else { (uv[0], uv[1]) };
    let s = (along_a + along_b) / scale;
    let t = if s.abs() < DEGENERATE_EPSILON {
      0.0
    } else {
      along_b / (along_a + along_b)
    };
    Self { quintant, s, t }
  }

  /// Position in the face plane.
  #[must_use]
  pub fn face_point(&self) -> FacePoint {
    let basis = crate::pentagon::quintant_basis(self.quintant, false);
    (basis.col(0) * (1.0 - self.t) + basis.col(1) * self.t) * self.s
  }

  /// Decomposes a face-plane point; the quintant is chosen by azimuth
  /// rounding, consistent with the forward projection.
  #[must_use]
  pub fn from_face_point(point: FacePoint) -> Self {
    let quintant = determine_quintant(point.x, point.y);
    let basis = crate::pentagon::quintant_basis(quintant, false);
    let weights = basis.inverse() * point;
    let s = weights.x + weights.y;
    let t = if s.abs() < DEGENERATE_EPSILON {
      0.0
    } else {
      weights.y / s
    };
    Self { quintant, s, t }
  }
}

/// Projects a unit-sphere point into the face-local coordinates of
/// `origin`.
#[must_use]
pub fn project_point(point: DVec3, origin: &Origin) -> FaceCoords {
  let local = origin.inverse_quat * point;
  let (_rho, gamma) = face_polar(local);
  let aligned = gamma - origin.angle;
  let quintant = determine_quintant(aligned.cos(), aligned.sin());

  let apex = spherical_to_cartesian(origin.axis);
  if 1.0 - local.z < DEGENERATE_EPSILON {
    // The face center itself.
    return FaceCoords { quintant, s: 0.0, t: 0.0 };
  }

  let (va, vb) = REFERENCE_FRAME.quintant_vertices(origin.id, quintant);
  let total = spherical_triangle_area(apex, va, vb);
  let cut = arc_intersection(apex, point, va, vb);
  let slice_area = spherical_triangle_area(apex, va, cut);
  let t = slice_area / total;
  let s = if slice_area.abs() < 1e-15 {
    // Point on the wedge's first boundary arc: fall back to the angle
    // fraction along apex -> cut, which the inverse mirrors.
    let full = apex.dot(cut).clamp(-1.0, 1.0).acos();
    let part = apex.dot(point).clamp(-1.0, 1.0).acos();
    if full < 1e-15 {
      0.0
    } else {
      part / full
    }
  } else {
    spherical_triangle_area(apex, va, point) / slice_area
  };

  FaceCoords { quintant, s, t }
}

/// Inverse of [`project_point`]: reconstructs the unit-sphere point from
/// face-local coordinates.
///
/// Area fractions within 1e-14 of an endpoint short-circuit to the exact
/// apex or polyhedron vertex; everything else goes through the two
/// numerically stabilized arc solves.
#[must_use]
pub fn unproject_point(coords: FaceCoords, origin: &Origin) -> DVec3 {
  let apex = spherical_to_cartesian(origin.axis);
  if coords.s.abs() < DEGENERATE_EPSILON {
    return apex;
  }

  let (va, vb) = REFERENCE_FRAME.quintant_vertices(origin.id, coords.quintant);
  let total = spherical_triangle_area(apex, va, vb);

  let t_degenerate = coords.t < DEGENERATE_EPSILON || coords.t > 1.0 - DEGENERATE_EPSILON;
  let cut = if coords.t < DEGENERATE_EPSILON {
    va
  } else if coords.t > 1.0 - DEGENERATE_EPSILON {
    vb
  } else {
    solve_point_by_area(va, vb, apex, va, coords.t * total)
  };

  if (coords.s - 1.0).abs() < DEGENERATE_EPSILON {
    return cut;
  }
  if t_degenerate {
    // Mirror of the forward projection's angle-fraction fallback.
    return slerp(apex, cut, coords.s);
  }
  let slice_area = spherical_triangle_area(apex, va, cut);
  solve_point_by_area(apex, cut, apex, va, coords.s * slice_area)
}

/// Projects a face-plane point back onto the sphere.
#[must_use]
pub fn unproject_face_point(point: FacePoint, origin: &Origin) -> DVec3 {
  unproject_point(FaceCoords::from_face_point(point), origin)
}

/// Face-plane position of a sphere point, used for containment scoring.
#[must_use]
pub fn project_to_face_plane(point: DVec3, origin: &Origin) -> FacePoint {
  project_point(point, origin).face_point()
}
