//! # geomesh
//!
//! Build a geometry in Rust, mesh it with Gmsh and get the mesh back.
//!
//! ## Architecture
//!
//! ```text
//! geomesh-geometry (Geometry<K>) → .geo → gmsh → .msh → geomesh-mesh (Mesh)
//! ```
//!
//! This crate owns the middle: the [`MeshEngine`] seam, the [`Gmsh`]
//! process runner and [`generate_mesh`]. The geometry and mesh crates are
//! re-exported so one dependency is enough.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use geomesh::{compute_volume, generate_mesh, BuiltInGeometry, Layers, MeshOptions};
//!
//! let mut geom = BuiltInGeometry::new();
//! let hole = geom.add_circle([0.0, 0.0, 0.0], 0.1, Some(0.05), None, &[], false)?;
//! let plate = geom.add_rectangle(
//!     -0.5, 0.5, -0.5, 0.5, 0.0, Some(0.05), &[&hole.curve_loop], true,
//! )?;
//! if let Some(surface) = &plate.surface {
//!     geom.extrude(surface, [0.0, 0.0, 0.1], Some(&Layers::uniform(1)))?;
//! }
//!
//! let mesh = generate_mesh(&geom, &MeshOptions::new())?;
//! println!("volume = {}", compute_volume(&mesh));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration
//!
//! The executable defaults to `gmsh` on the `PATH`; set `GMSH_EXECUTABLE`
//! or [`MeshOptions::gmsh_path`] to use another one.

pub mod engine;
pub mod error;
pub mod options;
pub mod pipeline;


pub use engine::{parse_version, Gmsh, GmshVersion, MeshEngine};
pub use error::GmshError;
pub use options::{MeshOptions, MshVersion};
pub use pipeline::{clean_up, generate_mesh, generate_mesh_with};

pub use config::MeshingConfig;
pub use geomesh_geometry as geometry;
pub use geomesh_geometry::{
    BooleanOp, BuiltInGeometry, Circle, Entity, Geometry, GeometryError, Layers, OccGeometry,
    Polygon,
};
pub use geomesh_mesh as mesh;
pub use geomesh_mesh::{compute_volume, CellBlock, CellType, Mesh, MshError};
