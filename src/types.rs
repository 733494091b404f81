//! Core grid data structures.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};

/// A 64-bit pentagonal grid cell id.
///
/// The top 6 bits hold `origin * 5 + segment`; the low 58 bits hold the
/// Hilbert path index together with a resolution marker (see
/// `serialization`).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellId(pub u64);

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LonLat {
  /// Longitude in degrees, [-180, 180].
  pub lon: f64,
  /// Latitude in degrees, [-90, 90].
  pub lat: f64,
}

impl LonLat {
  pub const fn new(lon: f64, lat: f64) -> Self {
    Self { lon, lat }
  }
}

/// Point on the unit sphere in spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphericalPoint {
  /// Azimuthal angle in radians.
  pub theta: f64,
  /// Polar angle from the north pole in radians, [0, pi].
  pub phi: f64,
}

impl SphericalPoint {
  pub const fn new(theta: f64, phi: f64) -> Self {
    Self { theta, phi }
  }
}

/// Planar coordinates local to one dodecahedron face, with the face center
/// at the origin.
pub type FacePoint = glam::DVec2;

/// The decoded form of a [`CellId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellAddress {
  /// Dodecahedron face id, 0..=11.
  pub origin: u8,
  /// Winding-corrected sector, 0..=4. Always 0 at resolution 0.
  pub segment: u8,
  /// Position along the quintant's Hilbert curve, in [0, 4^(resolution-1)).
  pub s: u64,
  /// Grid resolution, 0..=MAX_RESOLUTION.
  pub resolution: u8,
}

/// One of the six Hilbert curve orientations.
///
/// Each variant names the (entry, exit) corner pair of the quintant
/// triangle the curve traverses; `u` and `v` are the two leg corners and
/// `w` the apex at the face center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum Orientation {
  /// Enter at u, exit at v.
  Uv = 0,
  /// Enter at v, exit at u.
  Vu = 1,
  /// Enter at u, exit at w.
  Uw = 2,
  /// Enter at w, exit at u.
  Wu = 3,
  /// Enter at v, exit at w.
  Vw = 4,
  /// Enter at w, exit at v.
  Wv = 5,
}

/// Hilbert curve placement state for one cell: where the cell's lattice
/// triangle sits and how the pentagon template is reflected into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
  /// Lattice offset of the cell's local origin corner.
  pub offset: [i64; 2],
  /// Per-axis template flips, each +1 or -1. Both are -1 for the
  /// point-reflected (downward) triangles.
  pub flips: [i8; 2],
  /// Curve orientation inside the cell.
  pub orientation: Orientation,
}

/// Grid error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum GridError {
  /// The operation failed but a more specific error is not available.
  Failed = 1,
  /// Longitude or latitude arguments were outside of acceptable range.
  LonLatDomain = 2,
  /// Resolution argument was outside of acceptable range.
  ResolutionDomain = 3,
  /// Cell id argument was not valid.
  CellInvalid = 4,
  /// Parent or children were requested past a resolution extreme.
  HierarchyDomain = 5,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cell_id_is_transparent_u64() {
    assert_eq!(std::mem::size_of::<CellId>(), 8);
    let id = CellId(0xdead_beef_0000_0001);
    assert_eq!(id.0, 0xdead_beef_0000_0001);
  }

  #[test]
  fn test_orientation_discriminants() {
    assert_eq!(Orientation::Uv as u8, 0);
    assert_eq!(Orientation::Wv as u8, 5);
  }
}
