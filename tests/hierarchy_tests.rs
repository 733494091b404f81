// tests/hierarchy_tests.rs

use pentagrid::*;

#[test]
fn test_parent_of_children_is_identity() {
  // Spec scenario: an arbitrary resolution-5 cell.
  let cell = lonlat_to_cell(LonLat::new(-3.7038, 40.4168), 5).unwrap();
  let children = cell_to_children(cell).unwrap();
  assert_eq!(cell_to_parent(children[0]).unwrap(), cell);
  for child in &children {
    assert_eq!(cell_to_parent(*child).unwrap(), cell);
  }
}

#[test]
fn test_cardinality_five_then_four() {
  let face = res0_cells()[4];
  assert_eq!(cell_to_children(face).unwrap().len(), 5);
  let quintant = cell_to_children(face).unwrap()[3];
  assert_eq!(cell_to_children(quintant).unwrap().len(), 4);
  let deeper = cell_to_children(quintant).unwrap()[2];
  assert_eq!(cell_to_children(deeper).unwrap().len(), 4);
}

#[test]
fn test_hierarchy_consistency_every_resolution() {
  // Walk a single lineage from a face to MAX_RESOLUTION, checking the
  // parent/child inverse at every step.
  let mut cell = res0_cells()[7];
  for resolution in 0..MAX_RESOLUTION {
    let children = cell_to_children(cell).unwrap();
    let expected = if resolution == 0 { 5 } else { 4 };
    assert_eq!(children.len(), expected, "res {resolution}");
    for child in &children {
      assert_eq!(get_resolution(*child).unwrap(), resolution + 1);
      assert_eq!(cell_to_parent(*child).unwrap(), cell, "res {resolution}");
    }
    // Descend along a non-trivial branch.
    cell = children[children.len() - 1];
  }
  assert_eq!(get_resolution(cell).unwrap(), MAX_RESOLUTION);
  assert_eq!(cell_to_children(cell), Err(GridError::HierarchyDomain));
}

#[test]
fn test_children_are_distinct_and_share_no_ids_across_parents() {
  use std::collections::HashSet;
  let parents = cell_to_children(res0_cells()[2]).unwrap();
  let mut all = HashSet::new();
  for parent in parents {
    for child in cell_to_children(parent).unwrap() {
      assert!(all.insert(child), "duplicate child {:#x}", child.0);
    }
  }
  assert_eq!(all.len(), 20);
}

#[test]
fn test_parent_at_resolution_zero_fails() {
  for face in res0_cells() {
    assert_eq!(cell_to_parent(face), Err(GridError::HierarchyDomain));
  }
}

#[test]
fn test_ancestor_by_repeated_parent_matches_coordinate_lookup_estimate() {
  // Walking parents from a deep cell yields valid cells of every
  // intermediate resolution with the same face.
  let deep = lonlat_to_cell(LonLat::new(126.98, 37.57), 20).unwrap();
  let face = decode(deep).unwrap().origin;
  let mut cell = deep;
  for expected in (0..20u8).rev() {
    cell = cell_to_parent(cell).unwrap();
    assert_eq!(get_resolution(cell).unwrap(), expected);
    assert_eq!(decode(cell).unwrap().origin, face);
  }
}

#[test]
fn test_malformed_ids_rejected_by_hierarchy_ops() {
  assert_eq!(cell_to_parent(CellId(u64::MAX)), Err(GridError::CellInvalid));
  assert_eq!(cell_to_children(CellId(0b100)), Err(GridError::CellInvalid));
  assert_eq!(get_resolution(CellId(61u64 << 58)), Err(GridError::CellInvalid));
}
