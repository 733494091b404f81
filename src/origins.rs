//! The twelve dodecahedron face descriptors and the fixed reference frame.
//!
//! Everything here is computed once, on first use, and never mutated:
//! the per-face rotation quaternions and alignment angles, the quintant
//! ordering metadata, and the 62 reference directions (12 face axes, 20
//! polyhedron vertices, 30 edge midpoints) the projection is anchored to.

use std::sync::LazyLock;

use glam::{DQuat, DVec3};

use crate::constants::{
  INTER_FACE_ANGLE, M_PI, NUM_EDGES, NUM_ORIGINS, NUM_QUINTANTS, NUM_VERTICES, QUINTANT_ANGLE,
};
use crate::coordinate::{haversine, pos_angle_rads, spherical_to_cartesian};
use crate::types::{Orientation, SphericalPoint};

/// One dodecahedron face.
#[derive(Debug, Clone)]
pub struct Origin {
  /// Face id, 0..=11.
  pub id: u8,
  /// Spherical coordinates of the face center.
  pub axis: SphericalPoint,
  /// Rotation taking the face-local frame (+z on the face axis) to the
  /// global frame.
  pub quat: DQuat,
  /// Inverse of `quat`, cached because the forward projection applies it
  /// to every input point.
  pub inverse_quat: DQuat,
  /// Azimuth of the first quintant center in the raw face-local frame;
  /// subtracted so quintant boundaries land at canonical angles.
  pub angle: f64,
  /// Quintant holding segment 0.
  pub first_quintant: u8,
  /// Hilbert curve orientation per quintant.
  pub orientation: [Orientation; NUM_QUINTANTS],
  /// Whether the face's segment numbering runs clockwise in the local
  /// frame; also mirrors the quintant lattice.
  pub clockwise: bool,
  /// Which of the four canonical segment layouts this face uses.
  pub layout: u8,
}

/// Segment order templates, applied to `(quintant - first_quintant) mod 5`.
/// Two counter-clockwise and two clockwise patterns.
#[rustfmt::skip]
const SEGMENT_TEMPLATES: [[u8; NUM_QUINTANTS]; 4] = [
  [0, 1, 2, 3, 4], // counter-clockwise
  [1, 2, 3, 4, 0], // counter-clockwise, advanced start
  [0, 4, 3, 2, 1], // clockwise
  [1, 0, 4, 3, 2], // clockwise, advanced start
];

/// Per-face layout selector into `SEGMENT_TEMPLATES`.
const LAYOUT_IDS: [u8; NUM_ORIGINS] = [0, 1, 0, 1, 0, 1, 3, 2, 3, 2, 3, 2];

/// Per-face first quintant.
const FIRST_QUINTANTS: [u8; NUM_ORIGINS] = [0, 2, 4, 1, 3, 0, 2, 4, 1, 3, 0, 2];

/// Curve orientations along the chain of quintants of one face. The first
/// quintant starts at the face center; each later quintant enters at the
/// vertex it shares with its predecessor.
const CCW_CHAIN: [Orientation; NUM_QUINTANTS] = [
  Orientation::Wv,
  Orientation::Uv,
  Orientation::Uv,
  Orientation::Uv,
  Orientation::Uv,
];
const CW_CHAIN: [Orientation; NUM_QUINTANTS] = [
  Orientation::Wu,
  Orientation::Vu,
  Orientation::Vu,
  Orientation::Vu,
  Orientation::Vu,
];

fn face_axes() -> [SphericalPoint; NUM_ORIGINS] {
  let upper = INTER_FACE_ANGLE;
  let lower = M_PI - INTER_FACE_ANGLE;
  let mut axes = [SphericalPoint::new(0.0, 0.0); NUM_ORIGINS];
  for k in 0..5 {
    axes[k + 1] = SphericalPoint::new(pos_angle_rads(k as f64 * QUINTANT_ANGLE), upper);
    axes[k + 6] = SphericalPoint::new(pos_angle_rads(QUINTANT_ANGLE / 2.0 + k as f64 * QUINTANT_ANGLE), lower);
  }
  axes[11] = SphericalPoint::new(0.0, M_PI);
  axes
}

/// Rotation taking +z to `axis`, turning about the horizontal axis
/// perpendicular to the target azimuth. Poles get a fixed rotation axis so
/// the construction stays deterministic.
fn quat_for_axis(axis: SphericalPoint) -> DQuat {
  let rotation_axis = DVec3::new(-axis.theta.sin(), axis.theta.cos(), 0.0);
  DQuat::from_axis_angle(rotation_axis, axis.phi)
}

/// The immutable registry of all twelve origins.
pub static ORIGINS: LazyLock<[Origin; NUM_ORIGINS]> = LazyLock::new(|| {
  let axes = face_axes();
  let cartesian_axes: Vec<DVec3> = axes.iter().map(|a| spherical_to_cartesian(*a)).collect();

  std::array::from_fn(|id| {
    let quat = quat_for_axis(axes[id]);
    let inverse_quat = quat.conjugate();

    // The alignment reference is the midpoint of the edge shared with the
    // lowest-numbered adjacent face; quintant 0 is centered on it.
    let neighbor = (0..NUM_ORIGINS)
      .find(|&other| other != id && cartesian_axes[id].dot(cartesian_axes[other]) > 0.3)
      .unwrap_or(0);
    let midpoint = (cartesian_axes[id] + cartesian_axes[neighbor]).normalize();
    let local = inverse_quat * midpoint;
    let angle = local.y.atan2(local.x);

    let clockwise = id >= 6;
    let first_quintant = FIRST_QUINTANTS[id];
    let chain = if clockwise { &CW_CHAIN } else { &CCW_CHAIN };
    let orientation = std::array::from_fn(|quintant| {
      let position = if clockwise {
        (usize::from(first_quintant) + NUM_QUINTANTS - quintant) % NUM_QUINTANTS
      } else {
        (quintant + NUM_QUINTANTS - usize::from(first_quintant)) % NUM_QUINTANTS
      };
      chain[position]
    });

    Origin {
      id: id as u8,
      axis: axes[id],
      quat,
      inverse_quat,
      angle,
      first_quintant,
      orientation,
      clockwise,
      layout: LAYOUT_IDS[id],
    }
  })
});

/// Finds the origin whose axis is closest to `point` by haversine
/// distance. Exact ties go to the lowest face id.
#[must_use]
pub fn find_nearest_origin(point: SphericalPoint) -> &'static Origin {
  let mut best = &ORIGINS[0];
  let mut best_distance = f64::INFINITY;
  for origin in ORIGINS.iter() {
    let distance = haversine(point, origin.axis);
    if distance < best_distance {
      best_distance = distance;
      best = origin;
    }
  }
  log::trace!("nearest origin for ({:.6}, {:.6}): {}", point.theta, point.phi, best.id);
  best
}

/// Converts an angle-derived quintant to the serialization-facing segment.
#[must_use]
pub fn quintant_to_segment(quintant: u8, origin: &Origin) -> u8 {
  let position = (usize::from(quintant) + NUM_QUINTANTS - usize::from(origin.first_quintant)) % NUM_QUINTANTS;
  SEGMENT_TEMPLATES[origin.layout as usize][position]
}

/// Inverse of [`quintant_to_segment`].
#[must_use]
pub fn segment_to_quintant(segment: u8, origin: &Origin) -> u8 {
  let template = &SEGMENT_TEMPLATES[origin.layout as usize];
  let position = template.iter().position(|&s| s == segment % 5).unwrap_or(0);
  ((position + usize::from(origin.first_quintant)) % NUM_QUINTANTS) as u8
}

/// The fixed reference geometry: polyhedron vertices, edge midpoints, and
/// the per-face vertex rings ordered by aligned local azimuth so that the
/// ring entry `k` is the vertex at (72k + 36) degrees.
pub struct ReferenceFrame {
  /// The 20 dodecahedron vertices as unit vectors.
  pub vertices: Vec<DVec3>,
  /// The 30 edge midpoints as unit vectors.
  pub edge_midpoints: Vec<DVec3>,
  face_vertex_rings: [[DVec3; NUM_QUINTANTS]; NUM_ORIGINS],
}

impl ReferenceFrame {
  /// The two vertices bounding `quintant` of face `origin`: the first at
  /// local azimuth (72q - 36) degrees, the second at (72q + 36).
  #[must_use]
  pub fn quintant_vertices(&self, origin: u8, quintant: u8) -> (DVec3, DVec3) {
    let ring = &self.face_vertex_rings[origin as usize];
    let q = usize::from(quintant) % NUM_QUINTANTS;
    (ring[(q + NUM_QUINTANTS - 1) % NUM_QUINTANTS], ring[q])
  }
}

pub static REFERENCE_FRAME: LazyLock<ReferenceFrame> = LazyLock::new(|| {
  let axes: Vec<DVec3> = ORIGINS.iter().map(|o| spherical_to_cartesian(o.axis)).collect();
  let adjacent = |a: usize, b: usize| axes[a].dot(axes[b]) > 0.3;

  let mut vertices = Vec::with_capacity(NUM_VERTICES);
  for i in 0..NUM_ORIGINS {
    for j in (i + 1)..NUM_ORIGINS {
      if !adjacent(i, j) {
        continue;
      }
      for k in (j + 1)..NUM_ORIGINS {
        if adjacent(i, k) && adjacent(j, k) {
          vertices.push((axes[i] + axes[j] + axes[k]).normalize());
        }
      }
    }
  }
  debug_assert_eq!(vertices.len(), NUM_VERTICES);

  let mut edge_midpoints = Vec::with_capacity(NUM_EDGES);
  for i in 0..NUM_ORIGINS {
    for j in (i + 1)..NUM_ORIGINS {
      if adjacent(i, j) {
        edge_midpoints.push((axes[i] + axes[j]).normalize());
      }
    }
  }
  debug_assert_eq!(edge_midpoints.len(), NUM_EDGES);

  let face_vertex_rings = std::array::from_fn(|face| {
    let origin = &ORIGINS[face];
    let mut ring = [DVec3::ZERO; NUM_QUINTANTS];
    for vertex in &vertices {
      if vertex.dot(axes[face]) < 0.7 {
        continue;
      }
      let local = origin.inverse_quat * *vertex;
      let azimuth = pos_angle_rads(local.y.atan2(local.x) - origin.angle);
      // Vertices sit at azimuths 36 + 72k; recover k by rounding.
      let slot = ((azimuth - QUINTANT_ANGLE / 2.0) / QUINTANT_ANGLE).round() as i64;
      ring[slot.rem_euclid(NUM_QUINTANTS as i64) as usize] = *vertex;
    }
    ring
  });

  ReferenceFrame {
    vertices,
    edge_midpoints,
    face_vertex_rings,
  }
});
