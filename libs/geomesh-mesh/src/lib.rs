//! # geomesh Mesh
//!
//! Unstructured meshes as produced by Gmsh: a point array, typed cell
//! blocks and per-block tag data.
//!
//! ## Architecture
//!
//! ```text
//! .msh file → msh::parse_msh → Mesh → cleanup / compute_volume
//!                                  ↘ msh::write_msh22
//! ```
//!
//! ## Supported Files
//!
//! - ASCII MSH 2.2
//! - ASCII MSH 4.0 and 4.1
//!
//! Binary files are rejected with [`MshError::Binary`].
//!
//! ## Usage
//!
//! ```rust
//! use geomesh_mesh::{compute_volume, CellBlock, CellType, Mesh};
//! use glam::DVec3;
//!
//! let mut mesh = Mesh::new(
//!     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(5.0, 5.0, 0.0)],
//!     vec![
//!         CellBlock::new(CellType::Line, vec![0, 1]),
//!         CellBlock::new(CellType::Triangle, vec![0, 1, 2]),
//!     ],
//! );
//! mesh.remove_lower_dimensional_cells();
//! mesh.remove_orphaned_nodes();
//!
//! assert_eq!(mesh.num_points(), 3);
//! assert_eq!(compute_volume(&mesh), 0.5);
//! ```

pub mod cell;
pub mod error;
pub mod measure;
pub mod mesh;
pub mod msh;

pub use cell::{CellBlock, CellType};
pub use error::MshError;
pub use measure::{compute_volume, segment_length, tetra_volume, triangle_area};
pub use mesh::{FieldTag, Mesh, GEOMETRICAL_TAG_KEY, PHYSICAL_TAG_KEY};
pub use msh::{parse_msh, read_msh, write_msh22};
