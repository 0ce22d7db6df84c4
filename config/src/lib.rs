//! # Config Crate
//!
//! Centralized configuration for the geomesh pipeline. Magic numbers shared
//! between the geometry builder, the mesh reader and the gmsh runner live
//! here, together with [`MeshingConfig`], the resolved runtime settings.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON_TOLERANCE, GMSH_EXECUTABLE};
//! use config::MeshingConfig;
//!
//! let length: f64 = 1e-12;
//! assert!(length < EPSILON_TOLERANCE);
//!
//! let cfg = MeshingConfig::default();
//! assert_eq!(cfg.gmsh_executable.to_str(), Some(GMSH_EXECUTABLE));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: constants are defined once, used everywhere
//! - **No Dependencies**: this crate only uses the standard library
//! - **Gmsh Compatible**: defaults match what the gmsh executable expects

pub mod constants;
pub mod meshing;

pub use meshing::{ConfigError, MeshingConfig};
