//! Gnomonic view of a face-local point.

use glam::DVec3;

/// Polar gnomonic coordinates (rho, gamma) of a point already rotated into
/// the face-local frame: gamma is the azimuth around the face axis and rho
/// the tangent-plane radius. Only the azimuth decides quintant membership;
/// rho is kept for the planar wedge tests.
#[inline]
#[must_use]
pub fn face_polar(local: DVec3) -> (f64, f64) {
  let gamma = local.y.atan2(local.x);
  let radius_xy = local.x.hypot(local.y);
  let rho = if local.z.abs() < f64::EPSILON {
    f64::INFINITY
  } else {
    radius_xy / local.z
  };
  (rho, gamma)
}
