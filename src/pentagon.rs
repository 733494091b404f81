//! Pentagon and triangle cell shapes and their placement in the face plane.
//!
//! Cells live in two coordinate systems. The face plane holds the five
//! quintant triangles of a face: quintant `q` spans the unit-circumradius
//! triangle between the rays at (72q - 36) and (72q + 36) degrees. The
//! lattice frame is quintant-local: the level-h triangle {u, v >= 0,
//! u + v <= 2^h}, where the Hilbert curve addresses unit cells.

use std::sync::LazyLock;

use glam::{DMat2, DVec2};

use crate::constants::{M_PI_180, PENTAGON_BULGE, QUINTANT_ANGLE};
use crate::types::Anchor;

/// The five fixed rotation matrices taking quintant 0 into quintant k.
static SECTOR_ROTATIONS: LazyLock<[DMat2; 5]> = LazyLock::new(|| {
  [
    DMat2::from_angle(0.0),
    DMat2::from_angle(QUINTANT_ANGLE),
    DMat2::from_angle(2.0 * QUINTANT_ANGLE),
    DMat2::from_angle(3.0 * QUINTANT_ANGLE),
    DMat2::from_angle(4.0 * QUINTANT_ANGLE),
  ]
});

/// Unit vector at `degrees` from the face-local x axis.
fn dir(degrees: f64) -> DVec2 {
  let a = degrees * M_PI_180;
  DVec2::new(a.cos(), a.sin())
}

/// The two leg vertices of quintant `q` in the face plane. For clockwise
/// faces the legs are swapped, mirroring the lattice frame.
#[must_use]
pub fn quintant_basis(quintant: u8, clockwise: bool) -> DMat2 {
  let rotation = SECTOR_ROTATIONS[quintant as usize % 5];
  let leg_a = rotation * dir(-36.0);
  let leg_b = rotation * dir(36.0);
  if clockwise {
    DMat2::from_cols(leg_b, leg_a)
  } else {
    DMat2::from_cols(leg_a, leg_b)
  }
}

/// Maps quintant-local lattice coordinates at Hilbert level `level` to the
/// face plane.
#[must_use]
pub fn lattice_to_face(uv: DVec2, quintant: u8, clockwise: bool, level: u32) -> DVec2 {
  let scale = (1u64 << level) as f64;
  quintant_basis(quintant, clockwise) * (uv / scale)
}

/// Inverse of [`lattice_to_face`].
#[must_use]
pub fn face_to_lattice(point: DVec2, quintant: u8, clockwise: bool, level: u32) -> DVec2 {
  let scale = (1u64 << level) as f64;
  quintant_basis(quintant, clockwise).inverse() * point * scale
}

/// A closed planar polygon with counter-clockwise winding.
#[derive(Debug, Clone, PartialEq)]
pub struct PentagonShape {
  vertices: Vec<DVec2>,
}

impl PentagonShape {
  /// Builds a shape from a vertex ring, reversing it if the shoelace sign
  /// shows clockwise winding.
  #[must_use]
  pub fn new(mut vertices: Vec<DVec2>) -> Self {
    if signed_area(&vertices) < 0.0 {
      vertices.reverse();
    }
    Self { vertices }
  }

  #[must_use]
  pub fn vertices(&self) -> &[DVec2] {
    &self.vertices
  }

  /// Mean of the vertex ring.
  #[must_use]
  pub fn centroid(&self) -> DVec2 {
    let mut sum = DVec2::ZERO;
    for v in &self.vertices {
      sum += *v;
    }
    sum / self.vertices.len() as f64
  }

  /// Signed containment score of `point`.
  ///
  /// For every edge the perpendicular distance to the edge line is taken,
  /// positive on the interior side; the minimum over all edges is
  /// returned. Positive means strictly inside, and the magnitude ranks
  /// how comfortably a near-boundary point sits in this shape versus a
  /// neighboring one.
  #[must_use]
  pub fn contains_point(&self, point: DVec2) -> f64 {
    let mut min_distance = f64::INFINITY;
    let n = self.vertices.len();
    for i in 0..n {
      let a = self.vertices[i];
      let b = self.vertices[(i + 1) % n];
      let edge = b - a;
      let length = edge.length();
      if length == 0.0 {
        continue;
      }
      let distance = edge.perp_dot(point - a) / length;
      if distance < min_distance {
        min_distance = distance;
      }
    }
    min_distance
  }

  /// Applies a linear map to every vertex.
  pub fn transform(&mut self, matrix: DMat2) {
    for v in &mut self.vertices {
      *v = matrix * *v;
    }
  }

  pub fn translate(&mut self, offset: DVec2) {
    for v in &mut self.vertices {
      *v += offset;
    }
  }

  pub fn scale(&mut self, factor: f64) {
    for v in &mut self.vertices {
      *v *= factor;
    }
  }
}

fn signed_area(vertices: &[DVec2]) -> f64 {
  let n = vertices.len();
  let mut area = 0.0;
  for i in 0..n {
    let a = vertices[i];
    let b = vertices[(i + 1) % n];
    area += a.x * b.y - b.x * a.y;
  }
  area * 0.5
}

/// The resolution-0 cell: the regular face pentagon with unit circumradius,
/// vertices on the quintant boundaries.
#[must_use]
pub fn face_pentagon() -> PentagonShape {
  PentagonShape::new((0..5).map(|k| dir(36.0 + 72.0 * k as f64)).collect())
}

/// The resolution-1 cell: one quintant triangle.
#[must_use]
pub fn quintant_triangle(quintant: u8) -> PentagonShape {
  let basis = quintant_basis(quintant, false);
  PentagonShape::new(vec![DVec2::ZERO, basis.col(0), basis.col(1)])
}

/// The unit cell pentagon in lattice coordinates: the primitive triangle
/// with its two leg midpoints pushed outward. A strict superset of the
/// triangle, so every interior lattice point of a cell is strictly inside
/// its own pentagon; overlaps with neighbors stay within the bulge.
#[must_use]
fn unit_cell_pentagon() -> [DVec2; 5] {
  [
    DVec2::new(0.0, 0.0),
    DVec2::new(0.5, -PENTAGON_BULGE),
    DVec2::new(1.0, 0.0),
    DVec2::new(0.0, 1.0),
    DVec2::new(-PENTAGON_BULGE, 0.5),
  ]
}

/// Builds the face-plane shape of the cell at `anchor` within `quintant`.
///
/// Resolutions 0 and 1 predate the Hilbert curve and use the face pentagon
/// and quintant triangle templates; from resolution 2 on, the unit cell
/// pentagon is flipped and translated per the anchor, shrunk by
/// 2^-(resolution-1) and sheared into the quintant.
#[must_use]
pub fn pentagon_for(resolution: u8, quintant: u8, anchor: &Anchor, clockwise: bool) -> PentagonShape {
  match resolution {
    0 => face_pentagon(),
    1 => {
      let mut shape = quintant_triangle(0);
      shape.transform(SECTOR_ROTATIONS[quintant as usize % 5]);
      shape
    }
    _ => {
      let level = u32::from(resolution) - 1;
      let flips = DVec2::new(f64::from(anchor.flips[0]), f64::from(anchor.flips[1]));
      let offset = DVec2::new(anchor.offset[0] as f64, anchor.offset[1] as f64);
      let vertices = unit_cell_pentagon()
        .iter()
        .map(|t| lattice_to_face(offset + flips * *t, quintant, clockwise, level))
        .collect();
      PentagonShape::new(vertices)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Orientation;

  #[test]
  fn test_winding_is_corrected() {
    let ccw = PentagonShape::new(vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)]);
    let cw = PentagonShape::new(vec![DVec2::new(0.0, 1.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 0.0)]);
    assert!(signed_area(ccw.vertices()) > 0.0);
    assert!(signed_area(cw.vertices()) > 0.0);
  }

  #[test]
  fn test_contains_point_sign_and_ranking() {
    let triangle = PentagonShape::new(vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)]);
    assert!(triangle.contains_point(DVec2::new(0.25, 0.25)) > 0.0);
    assert!(triangle.contains_point(DVec2::new(1.0, 1.0)) < 0.0);
    // Deeper points score higher.
    let shallow = triangle.contains_point(DVec2::new(0.01, 0.3));
    let deep = triangle.contains_point(DVec2::new(0.25, 0.3));
    assert!(deep > shallow);
  }

  #[test]
  fn test_unit_cell_pentagon_is_convex_ccw_superset() {
    let pentagon = PentagonShape::new(unit_cell_pentagon().to_vec());
    assert_eq!(pentagon.vertices().len(), 5);
    // Strictly contains the interior of its primitive triangle.
    for &(u, v) in &[(0.2, 0.2), (0.05, 0.9), (0.9, 0.05), (0.45, 0.45)] {
      assert!(pentagon.contains_point(DVec2::new(u, v)) > 0.0, "({u},{v}) escaped");
    }
    // Convexity: all cross products of consecutive edges share a sign.
    let verts = pentagon.vertices();
    for i in 0..verts.len() {
      let a = verts[i];
      let b = verts[(i + 1) % verts.len()];
      let c = verts[(i + 2) % verts.len()];
      assert!((b - a).perp_dot(c - b) > 0.0, "concave corner at {i}");
    }
  }

  #[test]
  fn test_face_pentagon_geometry() {
    let face = face_pentagon();
    assert_eq!(face.vertices().len(), 5);
    for v in face.vertices() {
      assert!((v.length() - 1.0).abs() < 1e-12);
    }
    assert!(face.centroid().length() < 1e-12);
    assert!(face.contains_point(DVec2::ZERO) > 0.0);
  }

  #[test]
  fn test_lattice_face_round_trip() {
    for quintant in 0..5u8 {
      for &clockwise in &[false, true] {
        let uv = DVec2::new(3.25, 1.5);
        let p = lattice_to_face(uv, quintant, clockwise, 3);
        let back = face_to_lattice(p, quintant, clockwise, 3);
        assert!((back - uv).length() < 1e-12);
      }
    }
  }

  #[test]
  fn test_pentagon_for_contains_anchor_triangle() {
    let anchor = Anchor {
      offset: [2, 1],
      flips: [1, 1],
      orientation: Orientation::Wu,
    };
    let resolution = 4u8;
    let level = u32::from(resolution) - 1;
    let shape = pentagon_for(resolution, 2, &anchor, false);
    // The centroid of the anchor triangle, mapped to the face plane, must
    // be strictly inside.
    let interior = DVec2::new(2.0 + 1.0 / 3.0, 1.0 + 1.0 / 3.0);
    let p = lattice_to_face(interior, 2, false, level);
    assert!(shape.contains_point(p) > 0.0);
  }
}
