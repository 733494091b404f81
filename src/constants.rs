//! Core grid constants.

use std::f64::consts;

// Mathematical constants
/// pi
pub const M_PI: f64 = consts::PI;
/// pi / 2.0
pub const M_PI_2: f64 = consts::FRAC_PI_2;
/// 2.0 * PI
pub const M_2PI: f64 = 2.0 * consts::PI;
/// pi / 180
pub const M_PI_180: f64 = consts::PI / 180.0;
/// 180 / pi
pub const M_180_PI: f64 = 180.0 / consts::PI;

/// 2 * pi / 5: the angular width of one quintant wedge.
pub const QUINTANT_ANGLE: f64 = M_2PI / 5.0;

/// Golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Polar angle between a dodecahedron face axis and the axes of its five
/// neighboring faces: atan(2).
pub const INTER_FACE_ANGLE: f64 = 1.107_148_717_794_090_4;

/// Dot product between the axes of two adjacent dodecahedron faces,
/// cos(atan(2)) = 1 / sqrt(5). Used to detect face adjacency when the
/// reference frame is built.
pub const ADJACENT_AXIS_DOT: f64 = 0.447_213_595_499_958;

/// Fixed rotation applied to all longitudes before projection, in degrees.
/// Orients the dodecahedron so that face 0 sits over the north pole with
/// its first quintant wedge in a fixed position relative to the prime
/// meridian.
pub const LONGITUDE_OFFSET_DEG: f64 = 93.0;

/// Epsilon below which a Cartesian point is considered to be on the polar
/// axis and its azimuth is pinned to zero instead of dividing by zero.
pub const POLE_EPSILON: f64 = 1e-12;

/// Barycentric weights within this distance of an endpoint short-circuit
/// to the exact triangle vertex during unprojection.
pub const DEGENERATE_EPSILON: f64 = 1e-14;

// WGS84 ellipsoid
/// WGS84 inverse flattening.
pub const WGS84_INV_FLATTENING: f64 = 298.257_223_563;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / WGS84_INV_FLATTENING;
/// WGS84 first eccentricity squared.
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);
const E2: f64 = WGS84_E2;
const E4: f64 = E2 * E2;
const E6: f64 = E4 * E2;

// Authalic latitude series (Snyder, Map Projections: A Working Manual,
// eqs. 3-18 and 3-18'). Forward takes geodetic latitude to the equal-area
// sphere; inverse is the complementary series back.
/// Coefficient of sin(2φ) in the geodetic → authalic series.
pub const AUTHALIC_FWD_C2: f64 = -(E2 / 3.0 + 31.0 * E4 / 180.0 + 59.0 * E6 / 560.0);
/// Coefficient of sin(4φ) in the geodetic → authalic series.
pub const AUTHALIC_FWD_C4: f64 = 17.0 * E4 / 360.0 + 61.0 * E6 / 1260.0;
/// Coefficient of sin(6φ) in the geodetic → authalic series.
pub const AUTHALIC_FWD_C6: f64 = -383.0 * E6 / 45360.0;
/// Coefficient of sin(2β) in the authalic → geodetic series.
pub const AUTHALIC_INV_C2: f64 = E2 / 3.0 + 31.0 * E4 / 180.0 + 517.0 * E6 / 5040.0;
/// Coefficient of sin(4β) in the authalic → geodetic series.
pub const AUTHALIC_INV_C4: f64 = 23.0 * E4 / 360.0 + 251.0 * E6 / 3780.0;
/// Coefficient of sin(6β) in the authalic → geodetic series.
pub const AUTHALIC_INV_C6: f64 = 761.0 * E6 / 45360.0;

// Grid system constants

/// The number of dodecahedron faces.
pub const NUM_ORIGINS: usize = 12;
/// The number of dodecahedron vertices.
pub const NUM_VERTICES: usize = 20;
/// The number of dodecahedron edges.
pub const NUM_EDGES: usize = 30;
/// Quintants per face.
pub const NUM_QUINTANTS: usize = 5;

/// Maximum grid resolution.
///
/// The id layout gives every resolution step below the quintant level two
/// payload bits plus a marker; 58 payload bits therefore admit resolutions
/// 0 through 29. (A 31st level cannot exist in any 64-bit layout: the cell
/// population of resolutions 0..=30 under 5×4-ary branching exceeds 2^64.)
pub const MAX_RESOLUTION: u8 = 29;

/// First resolution at which cells are placed by the Hilbert curve.
/// Resolution 0 addresses whole faces and resolution 1 whole quintants.
pub const FIRST_HILBERT_RESOLUTION: u8 = 2;

// Cell id bit layout (see serialization.rs)

/// Number of low bits holding the path index and resolution marker.
pub const PAYLOAD_BITS: u32 = 58;
/// Mask of the 58 payload bits.
pub const PAYLOAD_MASK: u64 = (1u64 << PAYLOAD_BITS) - 1;
/// Number of top bits holding `origin * 5 + segment`.
pub const ORIGIN_SEGMENT_BITS: u32 = 6;
/// Exclusive upper bound of the top field.
pub const ORIGIN_SEGMENT_RANGE: u64 = (NUM_ORIGINS * NUM_QUINTANTS) as u64;

/// Number of samples probed by the containment disambiguation search.
pub const DISAMBIGUATION_SAMPLES: usize = 25;
/// Base radius, in degrees, of the disambiguation spiral at Hilbert level 0.
pub const DISAMBIGUATION_RADIUS_DEG: f64 = 50.0;

/// Outward displacement of the two leg-midpoint vertices of the unit cell
/// pentagon, in lattice units. Keeps every pentagon a strict superset of
/// its lattice triangle so the direct estimate contains its own point.
pub const PENTAGON_BULGE: f64 = 0.15;
