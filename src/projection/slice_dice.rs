//! Equal-area spherical triangle machinery.
//!
//! The face projection maps between a spherical quintant triangle and its
//! planar counterpart by slicing along the great circle through the apex
//! and the point, then dicing along the slice, both by ratios of spherical
//! triangle areas. The 1-D solves needed by the inverse are monotone in
//! the slerp parameter and run a fixed-depth bisection, so every path is
//! bounded.

use glam::DVec3;

/// Signed spherical excess of the triangle (a, b, c) on the unit sphere
/// (Oosterom-Strackee). Positive when (a, b, c) wind counter-clockwise
/// seen from outside.
#[inline]
#[must_use]
pub fn spherical_triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
  let numerator = a.dot(b.cross(c));
  let denominator = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
  2.0 * numerator.atan2(denominator)
}

/// Spherical linear interpolation between two unit vectors. Extrapolates
/// for t outside [0, 1]; falls back to normalized lerp when the points are
/// nearly parallel.
#[must_use]
pub fn slerp(a: DVec3, b: DVec3, t: f64) -> DVec3 {
  let cos_angle = a.dot(b).clamp(-1.0, 1.0);
  let angle = cos_angle.acos();
  if angle < 1e-12 {
    return (a + (b - a) * t).normalize();
  }
  let sin_angle = angle.sin();
  (a * ((1.0 - t) * angle).sin() + b * (t * angle).sin()) / sin_angle
}

/// Intersection of the great circle through (c, p) with the great circle
/// through (a, b), on the side of the arc a-b.
#[must_use]
pub fn arc_intersection(c: DVec3, p: DVec3, a: DVec3, b: DVec3) -> DVec3 {
  let n1 = c.cross(p);
  let n2 = a.cross(b);
  let mut d = n1.cross(n2);
  if d.length_squared() < 1e-30 {
    // The two circles coincide: p already lies on the arc plane.
    return ((a + b) * 0.5).normalize();
  }
  d = d.normalize();
  if d.dot(a + b) < 0.0 {
    d = -d;
  }
  d
}

/// Number of bisection steps in the area solves: enough for ~1e-15 in the
/// slerp parameter, well inside the 1e-9 round-trip budget.
const SOLVE_STEPS: u32 = 52;
/// The solve bracket extends past [0, 1] so boundary vertices that poke
/// marginally over a face edge still resolve.
const SOLVE_MARGIN: f64 = 0.3;

/// Finds the point X on the arc from `from` to `to` such that the signed
/// area of (apex_a, apex_b, X) equals `target`. The area is monotone in
/// the slerp parameter, so a fixed bisection converges deterministically.
#[must_use]
pub fn solve_point_by_area(from: DVec3, to: DVec3, apex_a: DVec3, apex_b: DVec3, target: f64) -> DVec3 {
  let mut lo = -SOLVE_MARGIN;
  let mut hi = 1.0 + SOLVE_MARGIN;
  let area_at = |t: f64| spherical_triangle_area(apex_a, apex_b, slerp(from, to, t));
  // Orient the bracket so area increases from lo to hi.
  let increasing = area_at(hi) >= area_at(lo);
  for _ in 0..SOLVE_STEPS {
    let mid = 0.5 * (lo + hi);
    let area = area_at(mid);
    let below = if increasing { area < target } else { area > target };
    if below {
      lo = mid;
    } else {
      hi = mid;
    }
  }
  slerp(from, to, 0.5 * (lo + hi))
}
