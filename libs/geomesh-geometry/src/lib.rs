//! # geomesh Geometry
//!
//! Declarative geometry building for Gmsh. A [`Geometry`] records points,
//! curves, surfaces, volumes and operations on them, and renders the
//! resulting `.geo` script with [`Geometry::code`].
//!
//! ## Architecture
//!
//! ```text
//! Geometry<K> (add_* calls) → .geo script → gmsh (geomesh crate)
//! ```
//!
//! ## Kernels
//!
//! - [`BuiltInGeometry`]: Gmsh's native kernel, structured extrusions
//! - [`OccGeometry`]: OpenCASCADE, adds solid primitives and booleans
//!
//! ## Usage
//!
//! ```rust
//! use geomesh_geometry::{BuiltInGeometry, Layers};
//!
//! let mut geom = BuiltInGeometry::new();
//! let square = geom
//!     .add_rectangle(0.0, 1.0, 0.0, 1.0, 0.0, Some(0.1), &[], true)
//!     .unwrap();
//! let surface = square.surface.unwrap();
//! geom.extrude(&surface, [0.0, 0.0, 1.0], Some(&Layers::uniform(1)))
//!     .unwrap();
//!
//! assert!(geom.code().contains("Extrude{0.0, 0.0, 1.0}"));
//! ```

pub mod entity;
pub mod error;
mod format;
pub mod geometry;
pub mod kernel;

pub use entity::{Curve, CurveLoop, Dim, Entity, Field, Point, Surface, SurfaceLoop, Volume};
pub use error::GeometryError;
pub use geometry::occ::BooleanOp;
pub use geometry::{
    BoundaryLayer, BuiltInGeometry, Circle, Extrusion, Geometry, Layers, OccGeometry,
    PhysicalGroup, Polygon,
};
pub use kernel::{BuiltIn, Kernel, OpenCascade};
