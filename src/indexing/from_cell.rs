// src/indexing/from_cell.rs

use crate::constants::FIRST_HILBERT_RESOLUTION;
use crate::coordinate::{cartesian_to_spherical, normalize_longitudes, spherical_to_lonlat};
use crate::hilbert::s_to_anchor;
use crate::origins::{segment_to_quintant, Origin, ORIGINS};
use crate::pentagon::{pentagon_for, PentagonShape};
use crate::projection::unproject_face_point;
use crate::serialization::decode;
use crate::types::{Anchor, CellAddress, CellId, GridError, LonLat};

/// Rebuilds the face-plane shape of a decoded cell.
fn shape_for(address: &CellAddress, origin: &Origin) -> (PentagonShape, u8) {
  let quintant = segment_to_quintant(address.segment, origin);
  let anchor = if address.resolution < FIRST_HILBERT_RESOLUTION {
    Anchor {
      offset: [0, 0],
      flips: [1, 1],
      orientation: origin.orientation[usize::from(quintant)],
    }
  } else {
    let level = u32::from(address.resolution) - 1;
    s_to_anchor(address.s, level, origin.orientation[usize::from(quintant)])
  };
  (pentagon_for(address.resolution, quintant, &anchor, origin.clockwise), quintant)
}

/// Returns the cell's center: the planar centroid of its shape, projected
/// back onto the ellipsoid.
pub fn cell_to_lonlat(id: CellId) -> Result<LonLat, GridError> {
  let address = decode(id)?;
  let origin = &ORIGINS[usize::from(address.origin)];
  let (shape, _) = shape_for(&address, origin);
  let point = unproject_face_point(shape.centroid(), origin);
  Ok(spherical_to_lonlat(cartesian_to_spherical(point)))
}

/// Default per-edge subdivision: coarse cells span enough of the sphere
/// that their edges need several linear pieces to follow the geodesic.
fn default_segments(resolution: u8) -> usize {
  match resolution {
    0..=2 => 8,
    3..=5 => 4,
    6..=8 => 2,
    _ => 1,
  }
}

/// Returns the cell boundary as a closed ring of geographic coordinates,
/// first vertex repeated at the end.
///
/// Each planar edge is subdivided into `segments` linear pieces (defaulted
/// from the resolution when `None`) before being unprojected, the ring is
/// unwrapped around the antimeridian, and the vertex order is reversed to
/// the externally expected winding.
pub fn cell_to_boundary(id: CellId, segments: Option<usize>) -> Result<Vec<LonLat>, GridError> {
  let address = decode(id)?;
  let origin = &ORIGINS[usize::from(address.origin)];
  let (shape, _) = shape_for(&address, origin);
  let per_edge = segments.unwrap_or_else(|| default_segments(address.resolution)).max(1);

  let vertices = shape.vertices();
  let mut ring = Vec::with_capacity(vertices.len() * per_edge + 1);
  for i in 0..vertices.len() {
    let a = vertices[i];
    let b = vertices[(i + 1) % vertices.len()];
    for step in 0..per_edge {
      let fraction = step as f64 / per_edge as f64;
      let planar = a + (b - a) * fraction;
      let point = unproject_face_point(planar, origin);
      ring.push(spherical_to_lonlat(cartesian_to_spherical(point)));
    }
  }
  normalize_longitudes(&mut ring);
  ring.reverse();
  let first = ring[0];
  ring.push(first);
  Ok(ring)
}
