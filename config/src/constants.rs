//! # Configuration Constants
//!
//! Centralized constants for the geomesh pipeline.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Gmsh**: Executable lookup and file naming
//! - **Geometry**: Defaults for high-level shape builders

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance used when rejecting degenerate geometry (zero-length lines,
/// zero radii, zero extrusion vectors).
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON_TOLERANCE;
///
/// let length: f64 = 0.0;
/// assert!(length.abs() <= EPSILON_TOLERANCE);
/// ```
pub const EPSILON_TOLERANCE: f64 = 1.0e-9;

/// Tolerance used by `prune_z_0` to decide whether a mesh is planar.
///
/// Gmsh writes coordinates with 16 significant digits, so a planar mesh
/// built at `z = 0` reads back with exact zeros. The tolerance only has to
/// absorb round-off from transformations.
pub const PLANAR_Z_TOLERANCE: f64 = 1.0e-12;

// =============================================================================
// GMSH CONSTANTS
// =============================================================================

/// Program name of the gmsh executable, resolved through `PATH`.
pub const GMSH_EXECUTABLE: &str = "gmsh";

/// Environment variable that overrides [`GMSH_EXECUTABLE`].
///
/// # Example
///
/// ```rust
/// use config::constants::GMSH_EXECUTABLE_ENV;
///
/// let path = std::env::var_os(GMSH_EXECUTABLE_ENV);
/// assert!(path.is_none() || path.is_some());
/// ```
pub const GMSH_EXECUTABLE_ENV: &str = "GMSH_EXECUTABLE";

/// Default topological dimension to mesh (`gmsh -3`).
pub const DEFAULT_MESH_DIMENSION: u8 = 3;

/// Highest element order gmsh accepts through `-order`.
pub const MAX_ELEMENT_ORDER: u8 = 5;

/// MSH version requested from gmsh when none is given.
pub const DEFAULT_MSH_VERSION: &str = "4.1";

/// Name of the geometry script written into the scratch directory.
pub const GEO_FILE_NAME: &str = "geomesh.geo";

/// Name of the mesh file gmsh writes into the scratch directory.
pub const MSH_FILE_NAME: &str = "geomesh.msh";

/// Factory name emitted by `SetFactory` for the OpenCASCADE kernel.
pub const OCC_FACTORY: &str = "OpenCASCADE";

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Number of arcs used by `add_circle` when the caller does not choose.
///
/// Gmsh's built-in kernel only accepts circle arcs strictly smaller than π,
/// so a full circle needs at least three of them.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_CIRCLE_SECTIONS, MIN_CIRCLE_SECTIONS};
///
/// assert!(DEFAULT_CIRCLE_SECTIONS >= MIN_CIRCLE_SECTIONS);
/// ```
pub const DEFAULT_CIRCLE_SECTIONS: usize = 3;

/// Smallest number of arcs a circle can be split into.
pub const MIN_CIRCLE_SECTIONS: usize = 3;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns true when `a` and `b` differ by no more than [`EPSILON_TOLERANCE`].
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-12));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON_TOLERANCE
}

/// Returns true when `value` is within [`EPSILON_TOLERANCE`] of zero.
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() <= EPSILON_TOLERANCE
}
