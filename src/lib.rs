#![deny(clippy::all)] // Enforce clippy lints
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Often a matter of taste
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)] // Reviewed at each bit-layout site
#![allow(clippy::cast_precision_loss)] // Lattice sizes stay far below 2^52
#![allow(clippy::cast_sign_loss)] // Angles are normalized before truncation
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::similar_names)] // Common in math-heavy code
#![allow(clippy::wildcard_imports)] // Allow for re-exporting from modules

//! `pentagrid` is a pentagonal discrete global grid system.
//!
//! The sphere is tessellated by projecting it onto a dodecahedron with an
//! equal-area slice-and-dice projection; each of the twelve pentagonal
//! faces splits into five quintants, and each quintant subdivides
//! quaternary along a Hilbert curve. A cell is addressed by a single
//! 64-bit id whose truncation toward the low bits walks up the hierarchy.
//!
//! The public surface is small: `lonlat_to_cell`, `cell_to_lonlat`,
//! `cell_to_boundary`, `cell_to_parent`, `cell_to_children` and
//! `get_resolution`. Everything is a pure function over immutable,
//! build-once registries, so the crate is freely shareable across threads.

// Declare modules
pub mod constants;
pub mod coordinate;
pub mod hierarchy;
pub mod hilbert;
pub mod indexing;
pub mod origins;
pub mod pentagon;
pub mod projection;
pub mod serialization;
pub mod types;

// Re-export key public types and functions for easier use
pub use constants::{FIRST_HILBERT_RESOLUTION, MAX_RESOLUTION};
pub use coordinate::{degs_to_rads, determine_quintant, haversine, normalize_longitudes, rads_to_degs};
pub use hierarchy::{cell_to_children, cell_to_parent, res0_cells};
pub use indexing::{cell_to_boundary, cell_to_lonlat, lonlat_to_cell};
pub use serialization::{decode, encode, get_resolution, is_valid_cell};
pub use types::{Anchor, CellAddress, CellId, GridError, LonLat, Orientation, SphericalPoint};
