//! Parent and child derivation on encoded cell ids.
//!
//! Pure integer arithmetic: no reprojection is involved. One step up the
//! hierarchy drops the low quaternary digit of the path index; one step
//! down appends one. The only five-way fan-out is from a face to its
//! quintants.

use crate::constants::MAX_RESOLUTION;
use crate::serialization::{decode, encode};
use crate::types::{CellId, GridError};

/// Returns the parent cell one resolution step up.
///
/// Fails with [`GridError::HierarchyDomain`] at resolution 0.
pub fn cell_to_parent(id: CellId) -> Result<CellId, GridError> {
  let mut address = decode(id)?;
  match address.resolution {
    0 => Err(GridError::HierarchyDomain),
    1 => {
      address.segment = 0;
      address.resolution = 0;
      encode(address)
    }
    _ => {
      address.s >>= 2;
      address.resolution -= 1;
      encode(address)
    }
  }
}

/// Returns the children one resolution step down: the five quintants of a
/// face at resolution 0, four quarter cells everywhere else.
///
/// Fails with [`GridError::HierarchyDomain`] at `MAX_RESOLUTION`.
pub fn cell_to_children(id: CellId) -> Result<Vec<CellId>, GridError> {
  let address = decode(id)?;
  if address.resolution >= MAX_RESOLUTION {
    return Err(GridError::HierarchyDomain);
  }
  if address.resolution == 0 {
    let mut children = Vec::with_capacity(5);
    for segment in 0..5u8 {
      let mut child = address;
      child.segment = segment;
      child.resolution = 1;
      children.push(encode(child)?);
    }
    return Ok(children);
  }
  let mut children = Vec::with_capacity(4);
  for digit in 0..4u64 {
    let mut child = address;
    child.s = (address.s << 2) | digit;
    child.resolution = address.resolution + 1;
    children.push(encode(child)?);
  }
  Ok(children)
}

/// The twelve resolution-0 cells.
#[must_use]
pub fn res0_cells() -> Vec<CellId> {
  (0..12u8)
    .map(|origin| CellId((u64::from(origin) * 5) << crate::constants::PAYLOAD_BITS))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::serialization::is_valid_cell;
  use crate::types::CellAddress;

  fn cell(origin: u8, segment: u8, s: u64, resolution: u8) -> CellId {
    encode(CellAddress {
      origin,
      segment,
      s,
      resolution,
    })
    .unwrap()
  }

  #[test]
  fn test_parent_of_res0_fails() {
    assert_eq!(cell_to_parent(cell(0, 0, 0, 0)), Err(GridError::HierarchyDomain));
  }

  #[test]
  fn test_children_of_max_resolution_fail() {
    let leaf = cell(2, 1, 7, MAX_RESOLUTION);
    assert_eq!(cell_to_children(leaf), Err(GridError::HierarchyDomain));
  }

  #[test]
  fn test_res0_fans_out_to_quintants() {
    let face = cell(3, 0, 0, 0);
    let children = cell_to_children(face).unwrap();
    assert_eq!(children.len(), 5);
    for (segment, child) in children.iter().enumerate() {
      let a = decode(*child).unwrap();
      assert_eq!(a.resolution, 1);
      assert_eq!(usize::from(a.segment), segment);
      assert_eq!(cell_to_parent(*child).unwrap(), face);
    }
  }

  #[test]
  fn test_children_parent_inverse_at_depth() {
    // Path digits 2, 1, 3.
    let parent = cell(9, 4, 0b100111, 4);
    let children = cell_to_children(parent).unwrap();
    assert_eq!(children.len(), 4);
    for child in children {
      assert!(is_valid_cell(child));
      assert_eq!(cell_to_parent(child).unwrap(), parent);
    }
  }

  #[test]
  fn test_res0_cells_are_distinct_and_valid() {
    let cells = res0_cells();
    assert_eq!(cells.len(), 12);
    for (i, id) in cells.iter().enumerate() {
      assert!(is_valid_cell(*id));
      let a = decode(*id).unwrap();
      assert_eq!((usize::from(a.origin), a.resolution), (i, 0));
    }
  }
}
