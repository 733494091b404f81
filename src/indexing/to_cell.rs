// src/indexing/to_cell.rs

use glam::DVec3;

use crate::constants::{
  DISAMBIGUATION_RADIUS_DEG, DISAMBIGUATION_SAMPLES, FIRST_HILBERT_RESOLUTION, MAX_RESOLUTION,
};
use crate::coordinate::{
  lonlat_to_spherical, lonlat_to_spherical_unchecked, spherical_to_cartesian,
};
use crate::hilbert::{ij_to_s, s_to_anchor};
use crate::origins::{find_nearest_origin, quintant_to_segment, segment_to_quintant, Origin, ORIGINS};
use crate::pentagon::pentagon_for;
use crate::projection::project_point;
use crate::serialization::encode;
use crate::types::{CellAddress, CellId, GridError, LonLat, SphericalPoint};

/// Golden angle in radians; successive spiral samples step by it so the
/// probes fan out evenly instead of lining up.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Finds the cell containing the given coordinate at `resolution`.
///
/// Below the first Hilbert resolution the face/segment estimate is the
/// answer. From resolution 2 on, the estimate is accepted only if its
/// pentagon strictly contains the projected point; otherwise a bounded,
/// deterministic spiral of up to 25 nearby probes collects candidate
/// cells, and the first strict container — or failing that, the candidate
/// with the best containment score — wins. Projection and containment
/// carry independent floating-point error near cell edges, which is the
/// only reason the direct estimate can miss.
pub fn lonlat_to_cell(coordinate: LonLat, resolution: u8) -> Result<CellId, GridError> {
  if resolution > MAX_RESOLUTION {
    return Err(GridError::ResolutionDomain);
  }
  let spherical = lonlat_to_spherical(coordinate)?;
  let estimate = direct_estimate(spherical, resolution);

  if resolution < FIRST_HILBERT_RESOLUTION {
    return encode(estimate);
  }

  let point = spherical_to_cartesian(spherical);
  let estimate_score = containment_score(&estimate, point);
  if estimate_score > 0.0 {
    return encode(estimate);
  }
  log::debug!(
    "estimate {:?} does not contain ({}, {}), score {estimate_score:e}; probing",
    estimate,
    coordinate.lon,
    coordinate.lat
  );

  // The estimate stays in the running while nearby probes propose
  // alternatives; candidates are deduplicated by address.
  let mut candidates: Vec<(CellAddress, f64)> = vec![(estimate, estimate_score)];
  let hilbert_level = u32::from(resolution) - 1;
  let radius = DISAMBIGUATION_RADIUS_DEG / (1u64 << hilbert_level) as f64;
  for k in 0..DISAMBIGUATION_SAMPLES {
    let fraction = 1.0 - k as f64 / DISAMBIGUATION_SAMPLES as f64;
    let angle = k as f64 * GOLDEN_ANGLE;
    let probe = LonLat::new(
      coordinate.lon + radius * fraction * angle.cos(),
      coordinate.lat + radius * fraction * angle.sin(),
    );
    // Probes may step past a pole or the antimeridian; the unchecked
    // conversion continues smoothly over both.
    let candidate = direct_estimate(lonlat_to_spherical_unchecked(probe), resolution);
    if candidates.iter().any(|(seen, _)| *seen == candidate) {
      continue;
    }
    let score = containment_score(&candidate, point);
    if score > 0.0 {
      return encode(candidate);
    }
    candidates.push((candidate, score));
  }

  let best = candidates
    .iter()
    .max_by(|a, b| a.1.total_cmp(&b.1))
    .map(|(address, _)| *address)
    .unwrap_or(estimate);
  log::debug!("no strict container among {} candidates; best {best:?}", candidates.len());
  encode(best)
}

/// The single deterministic estimate: nearest origin, quintant by angle,
/// then the Hilbert path index of the projected lattice point.
fn direct_estimate(spherical: SphericalPoint, resolution: u8) -> CellAddress {
  let origin = find_nearest_origin(spherical);
  let point = spherical_to_cartesian(spherical);
  let coords = project_point(point, origin);
  if resolution == 0 {
    return CellAddress {
      origin: origin.id,
      segment: 0,
      s: 0,
      resolution,
    };
  }
  let segment = quintant_to_segment(coords.quintant, origin);
  if resolution < FIRST_HILBERT_RESOLUTION {
    return CellAddress {
      origin: origin.id,
      segment,
      s: 0,
      resolution,
    };
  }
  let level = u32::from(resolution) - 1;
  let uv = coords.to_lattice(origin.clockwise, level);
  let s = ij_to_s(uv, level, origin.orientation[usize::from(coords.quintant)]);
  CellAddress {
    origin: origin.id,
    segment,
    s,
    resolution,
  }
}

/// Signed pentagon containment score of `point` for the cell at `address`.
fn containment_score(address: &CellAddress, point: DVec3) -> f64 {
  let origin: &Origin = &ORIGINS[usize::from(address.origin)];
  let quintant = segment_to_quintant(address.segment, origin);
  let shape = if address.resolution < FIRST_HILBERT_RESOLUTION {
    let anchor = crate::types::Anchor {
      offset: [0, 0],
      flips: [1, 1],
      orientation: origin.orientation[usize::from(quintant)],
    };
    pentagon_for(address.resolution, quintant, &anchor, origin.clockwise)
  } else {
    let level = u32::from(address.resolution) - 1;
    let anchor = s_to_anchor(address.s, level, origin.orientation[usize::from(quintant)]);
    pentagon_for(address.resolution, quintant, &anchor, origin.clockwise)
  };
  let local = project_point(point, origin).face_point();
  shape.contains_point(local)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::serialization::decode;

  #[test]
  fn test_resolution_domain() {
    let geo = LonLat::new(10.0, 10.0);
    assert_eq!(lonlat_to_cell(geo, MAX_RESOLUTION + 1), Err(GridError::ResolutionDomain));
  }

  #[test]
  fn test_coordinate_domain() {
    assert_eq!(lonlat_to_cell(LonLat::new(181.0, 0.0), 5), Err(GridError::LonLatDomain));
    assert_eq!(lonlat_to_cell(LonLat::new(0.0, 91.0), 5), Err(GridError::LonLatDomain));
    assert_eq!(lonlat_to_cell(LonLat::new(f64::NAN, 0.0), 5), Err(GridError::LonLatDomain));
  }

  #[test]
  fn test_res0_is_nearest_face() {
    // Two cities on well-separated faces.
    let new_york = lonlat_to_cell(LonLat::new(-74.006, 40.7128), 0).unwrap();
    let london = lonlat_to_cell(LonLat::new(-0.1278, 51.5074), 0).unwrap();
    assert_ne!(new_york, london);
    // Both are genuine resolution-0 cells.
    assert_eq!(decode(new_york).unwrap().resolution, 0);
    assert_eq!(decode(london).unwrap().resolution, 0);
  }

  #[test]
  fn test_polar_points_use_polar_faces() {
    let north = lonlat_to_cell(LonLat::new(0.0, 89.0), 0).unwrap();
    let south = lonlat_to_cell(LonLat::new(0.0, -89.0), 0).unwrap();
    assert_ne!(north, south);
    assert_eq!(decode(north).unwrap().origin, 0);
    assert_eq!(decode(south).unwrap().origin, 11);
  }

  #[test]
  fn test_determinism() {
    let geo = LonLat::new(2.3522, 48.8566);
    let first = lonlat_to_cell(geo, 9).unwrap();
    for _ in 0..10 {
      assert_eq!(lonlat_to_cell(geo, 9).unwrap(), first);
    }
  }

  #[test]
  fn test_direct_estimate_contains_its_point() {
    // The projected lattice point lies in the estimate's own triangle, so
    // the pentagon (a strict superset) must contain it.
    for &(lon, lat) in &[(13.4, 52.5), (-58.4, -34.6), (139.7, 35.7), (0.0, 0.0)] {
      let spherical = lonlat_to_spherical(LonLat::new(lon, lat)).unwrap();
      for resolution in 2..=10u8 {
        let estimate = direct_estimate(spherical, resolution);
        let score = containment_score(&estimate, spherical_to_cartesian(spherical));
        assert!(score > 0.0, "({lon},{lat}) res {resolution}: score {score}");
      }
    }
  }
}
