//! Quaternary Hilbert indexing of the quintant triangle.
//!
//! Each resolution step splits the quintant triangle into four half-size
//! children: three corner triangles and one point-reflected middle
//! triangle. The curve visits them entry-corner, third-corner, middle,
//! exit-corner, which keeps consecutive path indices in corner-adjacent
//! cells. Six orientations — the ordered (entry, exit) pairs over the
//! triangle's corners — cover every way a curve can cross a quintant, and
//! the per-digit orientation handoff is a closed 6-state transition table.
//!
//! Lattice convention: the level-n quintant triangle is {u, v >= 0,
//! u + v <= 2^n}; the corner at the origin is `w`, the u-axis corner `u`
//! and the v-axis corner `v`.

use crate::types::{Anchor, Orientation};

use Orientation::{Uv, Uw, Vu, Vw, Wu, Wv};

/// Lattice offsets of the four children per orientation, indexed by
/// quaternary digit. Offsets are in doubled (child-level) coordinates:
/// (0,0) the w corner, (1,0) the u corner, (0,1) the v corner, (1,1) the
/// point-reflected middle triangle.
#[rustfmt::skip]
const CHILD_OFFSETS: [[[i64; 2]; 4]; 6] = [
  /* Uv */ [[1, 0], [0, 0], [1, 1], [0, 1]],
  /* Vu */ [[0, 1], [0, 0], [1, 1], [1, 0]],
  /* Uw */ [[1, 0], [0, 1], [1, 1], [0, 0]],
  /* Wu */ [[0, 0], [0, 1], [1, 1], [1, 0]],
  /* Vw */ [[0, 1], [1, 0], [1, 1], [0, 0]],
  /* Wv */ [[0, 0], [1, 0], [1, 1], [0, 1]],
];

/// Orientation handoff per (orientation, digit). Digits 0 and 2 (the entry
/// corner and the middle) turn toward the third corner; digits 1 and 3
/// keep the parent orientation.
#[rustfmt::skip]
const NEXT_ORIENTATION: [[Orientation; 4]; 6] = [
  /* Uv */ [Uw, Uv, Uw, Uv],
  /* Vu */ [Vw, Vu, Vw, Vu],
  /* Uw */ [Uv, Uw, Uv, Uw],
  /* Wu */ [Wv, Wu, Wv, Wu],
  /* Vw */ [Vu, Vw, Vu, Vw],
  /* Wv */ [Wu, Wv, Wu, Wv],
];

/// The digit whose child is the point-reflected middle triangle.
const MIDDLE_DIGIT: u64 = 2;

/// Maps a continuous lattice point to its position along the curve.
///
/// `(u, v)` are coordinates in the level-`resolution` lattice triangle of
/// side `2^resolution`; the result is the quaternary path index of the
/// unit triangle containing the point, in [0, 4^resolution). Boundary ties
/// resolve toward the corner children in test order (w, u, v, middle),
/// which makes the digit extraction deterministic.
#[must_use]
pub fn ij_to_s(ij: [f64; 2], resolution: u32, orientation: Orientation) -> u64 {
  let [mut u, mut v] = ij;
  let mut orient = orientation;
  let mut s: u64 = 0;
  let mut size = (1u64 << resolution) as f64;
  for _ in 0..resolution {
    let half = size * 0.5;
    // Which child triangle holds the point, as a doubled-lattice offset.
    let offset: [i64; 2] = if u + v <= half {
      [0, 0]
    } else if u >= half {
      u -= half;
      [1, 0]
    } else if v >= half {
      v -= half;
      [0, 1]
    } else {
      // Middle child: point-reflect into the canonical frame.
      u = half - u;
      v = half - v;
      [1, 1]
    };
    let digit = CHILD_OFFSETS[orient as usize]
      .iter()
      .position(|candidate| *candidate == offset)
      .unwrap_or(0) as u64;
    s = (s << 2) | digit;
    orient = NEXT_ORIENTATION[orient as usize][digit as usize];
    size = half;
  }
  s
}

/// Reconstructs the placement of the cell at path index `s`.
///
/// Exact inverse of [`ij_to_s`] over the lattice: the returned anchor's
/// offset is the image of the cell's local origin corner, and its flips
/// are both -1 when an odd number of middle-child steps point-reflected
/// the cell.
#[must_use]
pub fn s_to_anchor(s: u64, resolution: u32, orientation: Orientation) -> Anchor {
  let mut offset = [0i64, 0i64];
  let mut sign: i64 = 1;
  let mut orient = orientation;
  for level in (0..resolution).rev() {
    let digit = (s >> (2 * level)) & 3;
    let delta = CHILD_OFFSETS[orient as usize][digit as usize];
    offset[0] = 2 * offset[0] + sign * delta[0];
    offset[1] = 2 * offset[1] + sign * delta[1];
    if digit == MIDDLE_DIGIT {
      sign = -sign;
    }
    orient = NEXT_ORIENTATION[orient as usize][digit as usize];
  }
  let flip = if sign > 0 { 1 } else { -1 };
  Anchor {
    offset,
    flips: [flip, flip],
    orientation: orient,
  }
}

/// A point strictly inside the anchor's unit triangle, used when a cell
/// has to be fed back through the curve.
#[must_use]
pub fn anchor_interior_point(anchor: &Anchor) -> [f64; 2] {
  let third = 1.0 / 3.0;
  [
    anchor.offset[0] as f64 + f64::from(anchor.flips[0]) * third,
    anchor.offset[1] as f64 + f64::from(anchor.flips[1]) * third,
  ]
}

/// All six curve orientations, in discriminant order.
pub const ALL_ORIENTATIONS: [Orientation; 6] = [Uv, Vu, Uw, Wu, Vw, Wv];
