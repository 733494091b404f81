//! 64-bit cell id packing.
//!
//! Bit layout, most significant first:
//!
//! ```text
//! | 6 bits: origin * 5 + segment | 58 bits: path index + marker |
//! ```
//!
//! For resolution r >= 1 the path index S (2*(r-1) bits) sits at the top
//! of the payload, followed immediately by a single 1 marker bit, with
//! zeros below. Resolution 0 is the all-zero payload and carries segment
//! 0. The marker walks down two bits per resolution step, so an
//! ancestor's id is the descendant's with S right-shifted two bits per
//! step — truncation toward the low bits preserves the hierarchy, and
//! resolution is recoverable from `trailing_zeros` alone.

use crate::constants::{MAX_RESOLUTION, ORIGIN_SEGMENT_RANGE, PAYLOAD_BITS, PAYLOAD_MASK};
use crate::types::{CellAddress, CellId, GridError};

/// Marker bit position for a given resolution (1..=MAX_RESOLUTION):
/// bit 57 at resolution 1, two lower per step, bit 1 at resolution 29.
#[inline]
const fn marker_bit(resolution: u8) -> u32 {
  PAYLOAD_BITS - 1 - 2 * (resolution as u32 - 1)
}

/// Packs an address into its cell id.
///
/// Fails if any field is out of range: origin > 11, segment > 4 (or
/// nonzero at resolution 0), resolution > `MAX_RESOLUTION`, or a path
/// index too large for the resolution.
pub fn encode(address: CellAddress) -> Result<CellId, GridError> {
  if address.origin > 11 || address.segment > 4 {
    return Err(GridError::CellInvalid);
  }
  if address.resolution > MAX_RESOLUTION {
    return Err(GridError::ResolutionDomain);
  }
  let top = u64::from(address.origin) * 5 + u64::from(address.segment);

  if address.resolution == 0 {
    if address.segment != 0 || address.s != 0 {
      return Err(GridError::CellInvalid);
    }
    return Ok(CellId(top << PAYLOAD_BITS));
  }

  // At most 28 digit pairs, so the shift below never overflows.
  let digits = u32::from(address.resolution) - 1;
  if address.s >> (2 * digits) != 0 {
    return Err(GridError::CellInvalid);
  }
  let marker = marker_bit(address.resolution);
  let payload = (address.s << (marker + 1)) | (1u64 << marker);
  Ok(CellId((top << PAYLOAD_BITS) | payload))
}

/// Unpacks a cell id, rejecting any 64-bit value that is not a well-formed
/// cell: a top field of 60 or more, a resolution-0 payload on a nonzero
/// segment, or a marker in an impossible position.
pub fn decode(id: CellId) -> Result<CellAddress, GridError> {
  let top = id.0 >> PAYLOAD_BITS;
  if top >= ORIGIN_SEGMENT_RANGE {
    return Err(GridError::CellInvalid);
  }
  let origin = (top / 5) as u8;
  let segment = (top % 5) as u8;

  let payload = id.0 & PAYLOAD_MASK;
  if payload == 0 {
    if segment != 0 {
      return Err(GridError::CellInvalid);
    }
    return Ok(CellAddress {
      origin,
      segment,
      s: 0,
      resolution: 0,
    });
  }

  let trailing = payload.trailing_zeros();
  // Valid markers sit at odd bit positions 57, 55, ..., 1.
  if trailing % 2 == 0 {
    return Err(GridError::CellInvalid);
  }
  let resolution = ((PAYLOAD_BITS - 1 - trailing) / 2 + 1) as u8;
  let s = payload >> (trailing + 1);
  Ok(CellAddress {
    origin,
    segment,
    s,
    resolution,
  })
}

/// Extracts the resolution without a full decode.
pub fn get_resolution(id: CellId) -> Result<u8, GridError> {
  let top = id.0 >> PAYLOAD_BITS;
  if top >= ORIGIN_SEGMENT_RANGE {
    return Err(GridError::CellInvalid);
  }
  let payload = id.0 & PAYLOAD_MASK;
  if payload == 0 {
    if top % 5 != 0 {
      return Err(GridError::CellInvalid);
    }
    return Ok(0);
  }
  let trailing = payload.trailing_zeros();
  if trailing % 2 == 0 {
    return Err(GridError::CellInvalid);
  }
  Ok(((PAYLOAD_BITS - 1 - trailing) / 2 + 1) as u8)
}

/// Whether a 64-bit value is a well-formed cell id.
#[must_use]
pub fn is_valid_cell(id: CellId) -> bool {
  decode(id).is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn address(origin: u8, segment: u8, s: u64, resolution: u8) -> CellAddress {
    CellAddress {
      origin,
      segment,
      s,
      resolution,
    }
  }

  #[test]
  fn test_golden_bit_patterns() {
    // Resolution 0, face 7: top field 35, empty payload.
    let id = encode(address(7, 0, 0, 0)).unwrap();
    assert_eq!(id.0, 35u64 << 58);
    // Resolution 1, face 0 segment 2: marker at bit 57.
    let id = encode(address(0, 2, 0, 1)).unwrap();
    assert_eq!(id.0, (2u64 << 58) | (1u64 << 57));
    // Resolution 3, face 11 segment 4, S = 0b1101: S at bits 57..54,
    // marker at bit 53.
    let id = encode(address(11, 4, 0b1101, 3)).unwrap();
    assert_eq!(id.0, (59u64 << 58) | (0b1101u64 << 54) | (1u64 << 53));
  }

  #[test]
  fn test_round_trip_exhaustive_low_resolutions() {
    for origin in 0..12u8 {
      let id0 = encode(address(origin, 0, 0, 0)).unwrap();
      assert_eq!(decode(id0).unwrap(), address(origin, 0, 0, 0));
      for segment in 0..5u8 {
        for resolution in 1..=4u8 {
          for s in 0..(1u64 << (2 * (resolution - 1))) {
            let a = address(origin, segment, s, resolution);
            let id = encode(a).unwrap();
            assert_eq!(decode(id).unwrap(), a, "id {:#x}", id.0);
            assert_eq!(get_resolution(id).unwrap(), resolution);
          }
        }
      }
    }
  }

  #[test]
  fn test_round_trip_max_resolution() {
    let s_max = (1u64 << (2 * (MAX_RESOLUTION - 1) as u32)) - 1;
    for &s in &[0u64, 1, 12345, s_max] {
      let a = address(5, 3, s, MAX_RESOLUTION);
      let id = encode(a).unwrap();
      assert_eq!(decode(id).unwrap(), a);
    }
    // One past the maximum path index fails.
    assert_eq!(
      encode(address(5, 3, s_max + 1, MAX_RESOLUTION)),
      Err(GridError::CellInvalid)
    );
  }

  #[test]
  fn test_truncation_preserves_hierarchy() {
    // Child path digits 3, 1, 2, 0; the parent drops the last one.
    let child = encode(address(4, 2, 0b11011000, 5)).unwrap();
    let parent = encode(address(4, 2, 0b110110, 4)).unwrap();
    let decoded_child = decode(child).unwrap();
    let decoded_parent = decode(parent).unwrap();
    assert_eq!(decoded_parent.s, decoded_child.s >> 2);
    // Same top field, marker two bits higher.
    assert_eq!(child.0 >> 58, parent.0 >> 58);
    assert_eq!(
      (child.0 & PAYLOAD_MASK).trailing_zeros() + 2,
      (parent.0 & PAYLOAD_MASK).trailing_zeros()
    );
  }

  #[test]
  fn test_rejects_foreign_input() {
    // Top field out of range.
    assert_eq!(decode(CellId(60u64 << 58)), Err(GridError::CellInvalid));
    assert_eq!(decode(CellId(u64::MAX)), Err(GridError::CellInvalid));
    // Marker at an even position.
    assert_eq!(decode(CellId(0b100)), Err(GridError::CellInvalid));
    // Resolution 0 payload on a nonzero segment.
    assert_eq!(decode(CellId(1u64 << 58)), Err(GridError::CellInvalid));
    // Resolution bound.
    assert_eq!(
      encode(address(0, 0, 0, MAX_RESOLUTION + 1)),
      Err(GridError::ResolutionDomain)
    );
  }

  #[test]
  fn test_resolution_from_trailing_zeros() {
    for resolution in 1..=MAX_RESOLUTION {
      let id = encode(address(3, 1, 0, resolution)).unwrap();
      assert_eq!(get_resolution(id).unwrap(), resolution);
    }
  }
}
