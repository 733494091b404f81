//! Conversions between geographic, spherical and Cartesian coordinates.
//!
//! All projection math in this crate runs on the authalic sphere: geodetic
//! latitudes are corrected with an equal-area series before they become
//! polar angles, so that equal planar areas on the dodecahedron faces
//! correspond to equal areas on the WGS84 ellipsoid.

use glam::DVec3;

use crate::constants::{
  AUTHALIC_FWD_C2, AUTHALIC_FWD_C4, AUTHALIC_FWD_C6, AUTHALIC_INV_C2, AUTHALIC_INV_C4, AUTHALIC_INV_C6,
  LONGITUDE_OFFSET_DEG, M_180_PI, M_2PI, M_PI, M_PI_180, M_PI_2, POLE_EPSILON, QUINTANT_ANGLE,
};
use crate::types::{GridError, LonLat, SphericalPoint};

/// Converts degrees to radians.
#[inline]
#[must_use]
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees * M_PI_180
}

/// Converts radians to degrees.
#[inline]
#[must_use]
pub fn rads_to_degs(radians: f64) -> f64 {
  radians * M_180_PI
}

/// Normalizes radians to a value in [0, 2*PI).
#[inline]
#[must_use]
pub(crate) fn pos_angle_rads(rads: f64) -> f64 {
  let mut tmp = rads % M_2PI;
  if tmp < 0.0 {
    tmp += M_2PI;
  }
  if tmp >= M_2PI {
    tmp = 0.0;
  }
  tmp
}

/// Constrains longitude degrees to [-180, 180).
#[inline]
#[must_use]
pub(crate) fn constrain_lon_degs(mut lon: f64) -> f64 {
  while lon >= 180.0 {
    lon -= 360.0;
  }
  while lon < -180.0 {
    lon += 360.0;
  }
  lon
}

/// Geodetic latitude (radians) to authalic latitude (radians).
#[inline]
fn geodetic_to_authalic(lat: f64) -> f64 {
  lat
    + AUTHALIC_FWD_C2 * (2.0 * lat).sin()
    + AUTHALIC_FWD_C4 * (4.0 * lat).sin()
    + AUTHALIC_FWD_C6 * (6.0 * lat).sin()
}

/// Authalic latitude (radians) back to geodetic latitude (radians).
#[inline]
fn authalic_to_geodetic(lat: f64) -> f64 {
  lat
    + AUTHALIC_INV_C2 * (2.0 * lat).sin()
    + AUTHALIC_INV_C4 * (4.0 * lat).sin()
    + AUTHALIC_INV_C6 * (6.0 * lat).sin()
}

/// Converts geographic coordinates to a point on the authalic unit sphere.
///
/// Rejects non-finite input and coordinates outside lon [-180, 180],
/// lat [-90, 90].
pub fn lonlat_to_spherical(coordinate: LonLat) -> Result<SphericalPoint, GridError> {
  if !coordinate.lon.is_finite()
    || !coordinate.lat.is_finite()
    || coordinate.lon.abs() > 180.0
    || coordinate.lat.abs() > 90.0
  {
    return Err(GridError::LonLatDomain);
  }
  Ok(lonlat_to_spherical_unchecked(coordinate))
}

/// Range-unchecked variant of [`lonlat_to_spherical`].
///
/// The disambiguation sampler probes coordinates slightly outside the legal
/// range near the poles and the antimeridian; those probes go through here.
#[must_use]
pub(crate) fn lonlat_to_spherical_unchecked(coordinate: LonLat) -> SphericalPoint {
  let theta = pos_angle_rads(degs_to_rads(coordinate.lon + LONGITUDE_OFFSET_DEG));
  let authalic_lat = geodetic_to_authalic(degs_to_rads(coordinate.lat));
  SphericalPoint::new(theta, M_PI_2 - authalic_lat)
}

/// Exact inverse of [`lonlat_to_spherical`].
#[must_use]
pub fn spherical_to_lonlat(point: SphericalPoint) -> LonLat {
  let lat = rads_to_degs(authalic_to_geodetic(M_PI_2 - point.phi));
  let lon = constrain_lon_degs(rads_to_degs(point.theta) - LONGITUDE_OFFSET_DEG);
  LonLat::new(lon, lat.clamp(-90.0, 90.0))
}

/// Spherical to Cartesian coordinates on the unit sphere.
#[inline]
#[must_use]
pub fn spherical_to_cartesian(point: SphericalPoint) -> DVec3 {
  let sin_phi = point.phi.sin();
  DVec3::new(sin_phi * point.theta.cos(), sin_phi * point.theta.sin(), point.phi.cos())
}

/// Cartesian to spherical coordinates.
///
/// On the polar axis the azimuth is undefined; both angles collapse to
/// (0, 0) or (0, pi) instead of dividing by zero.
#[inline]
#[must_use]
pub fn cartesian_to_spherical(point: DVec3) -> SphericalPoint {
  let radius_xy = point.x.hypot(point.y);
  if radius_xy < POLE_EPSILON {
    let phi = if point.z >= 0.0 { 0.0 } else { M_PI };
    return SphericalPoint::new(0.0, phi);
  }
  SphericalPoint::new(pos_angle_rads(point.y.atan2(point.x)), radius_xy.atan2(point.z))
}

/// Determines which of the five 72-degree wedges around a face origin the
/// planar point (i, j) falls in.
///
/// Rounding, not truncation: wedge k is centered on the angle k * 72 deg,
/// so its boundaries sit halfway between adjacent quintant center rays.
#[inline]
#[must_use]
pub fn determine_quintant(i: f64, j: f64) -> u8 {
  let angle = pos_angle_rads(j.atan2(i));
  ((angle / QUINTANT_ANGLE).round() as u8) % 5
}

/// Haversine great-circle distance in radians between two points on the
/// unit sphere.
#[must_use]
pub fn haversine(a: SphericalPoint, b: SphericalPoint) -> f64 {
  let lat_a = M_PI_2 - a.phi;
  let lat_b = M_PI_2 - b.phi;
  let sin_dlat = ((lat_b - lat_a) / 2.0).sin();
  let sin_dlon = ((b.theta - a.theta) / 2.0).sin();
  let h = sin_dlat * sin_dlat + lat_a.cos() * lat_b.cos() * sin_dlon * sin_dlon;
  2.0 * h.sqrt().clamp(-1.0, 1.0).asin()
}

/// Unwraps the longitudes of a boundary ring so it never jumps across the
/// antimeridian.
///
/// An approximate 3D centroid of the ring picks a reference longitude;
/// every vertex is then shifted by whole turns until it lies within 180
/// degrees of that reference.
pub fn normalize_longitudes(ring: &mut [LonLat]) {
  if ring.is_empty() {
    return;
  }
  let mut centroid = DVec3::ZERO;
  for vertex in ring.iter() {
    let lon = degs_to_rads(vertex.lon);
    let lat = degs_to_rads(vertex.lat);
    centroid += DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
  }
  if centroid.x.hypot(centroid.y) < POLE_EPSILON {
    // Ring centered on a pole: any reference longitude works equally well.
    return;
  }
  let reference_lon = rads_to_degs(centroid.y.atan2(centroid.x));
  for vertex in ring.iter_mut() {
    while vertex.lon - reference_lon > 180.0 {
      vertex.lon -= 360.0;
    }
    while vertex.lon - reference_lon < -180.0 {
      vertex.lon += 360.0;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lonlat_domain_rejection() {
    assert_eq!(lonlat_to_spherical(LonLat::new(180.1, 0.0)), Err(GridError::LonLatDomain));
    assert_eq!(lonlat_to_spherical(LonLat::new(0.0, -90.5)), Err(GridError::LonLatDomain));
    assert_eq!(lonlat_to_spherical(LonLat::new(f64::NAN, 0.0)), Err(GridError::LonLatDomain));
    assert!(lonlat_to_spherical(LonLat::new(-180.0, 90.0)).is_ok());
  }

  #[test]
  fn test_spherical_round_trip() {
    for &(lon, lat) in &[
      (0.0, 0.0),
      (-74.006, 40.7128),
      (179.9, -33.0),
      (-179.9, 71.2),
      (12.5, -89.9),
    ] {
      let sph = lonlat_to_spherical(LonLat::new(lon, lat)).unwrap();
      let back = spherical_to_lonlat(sph);
      assert!((back.lon - lon).abs() < 1e-9, "lon {lon} -> {}", back.lon);
      assert!((back.lat - lat).abs() < 1e-9, "lat {lat} -> {}", back.lat);
    }
  }

  #[test]
  fn test_cartesian_round_trip_and_pole_guard() {
    let sph = lonlat_to_spherical(LonLat::new(31.0, -12.0)).unwrap();
    let cart = spherical_to_cartesian(sph);
    assert!((cart.length() - 1.0).abs() < 1e-12);
    let back = cartesian_to_spherical(cart);
    assert!((back.theta - sph.theta).abs() < 1e-12);
    assert!((back.phi - sph.phi).abs() < 1e-12);

    let north = cartesian_to_spherical(DVec3::new(0.0, 0.0, 1.0));
    assert_eq!((north.theta, north.phi), (0.0, 0.0));
    let south = cartesian_to_spherical(DVec3::new(0.0, 0.0, -1.0));
    assert_eq!(south.theta, 0.0);
    assert!((south.phi - M_PI).abs() < 1e-15);
  }

  #[test]
  fn test_authalic_correction_shrinks_midlatitudes() {
    // The authalic latitude is smaller in magnitude than the geodetic one
    // away from the equator and poles.
    let geodetic = degs_to_rads(45.0);
    let authalic = geodetic_to_authalic(geodetic);
    assert!(authalic < geodetic);
    assert!((authalic_to_geodetic(authalic) - geodetic).abs() < 1e-12);
  }

  #[test]
  fn test_determine_quintant_rounds() {
    // 30 degrees is closer to the 0-degree center than the 72-degree one.
    let a = degs_to_rads(30.0);
    assert_eq!(determine_quintant(a.cos(), a.sin()), 0);
    let b = degs_to_rads(40.0);
    assert_eq!(determine_quintant(b.cos(), b.sin()), 1);
    // Just below 360 wraps back to wedge 0.
    let c = degs_to_rads(355.0);
    assert_eq!(determine_quintant(c.cos(), c.sin()), 0);
  }

  #[test]
  fn test_normalize_longitudes_antimeridian() {
    let mut ring = vec![
      LonLat::new(179.0, 10.0),
      LonLat::new(-179.0, 10.0),
      LonLat::new(-178.5, 11.0),
      LonLat::new(179.5, 11.0),
    ];
    normalize_longitudes(&mut ring);
    let min = ring.iter().map(|v| v.lon).fold(f64::INFINITY, f64::min);
    let max = ring.iter().map(|v| v.lon).fold(f64::NEG_INFINITY, f64::max);
    assert!(max - min < 180.0, "ring still wraps: {ring:?}");
  }

  #[test]
  fn test_haversine_quarter_turn() {
    let a = SphericalPoint::new(0.0, M_PI_2);
    let b = SphericalPoint::new(M_PI_2, M_PI_2);
    assert!((haversine(a, b) - M_PI_2).abs() < 1e-12);
  }
}
