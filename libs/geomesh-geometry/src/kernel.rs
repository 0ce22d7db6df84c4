//! # Geometry Kernels
//!
//! Gmsh ships two geometry kernels. The built-in kernel understands
//! points, curves, surfaces and structured extrusions. The OpenCASCADE
//! kernel adds solid primitives and boolean operations. The kernel is a
//! type parameter of [`crate::Geometry`] so that OpenCASCADE-only
//! operations simply do not exist on a built-in geometry.

use std::f64::consts::PI;

use config::constants::{EPSILON_TOLERANCE, OCC_FACTORY};

mod private {
    pub trait Sealed {}
}

/// Marker trait implemented by [`BuiltIn`] and [`OpenCascade`].
pub trait Kernel: private::Sealed + Default + Clone + std::fmt::Debug {
    /// Human readable kernel name.
    const NAME: &'static str;

    /// Factory selected with `SetFactory(...)`, if any.
    const FACTORY: Option<&'static str>;

    /// Whether a revolution by `angle` radians is accepted.
    fn accepts_revolve_angle(angle: f64) -> bool;
}

/// Gmsh's native geometry kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltIn;

/// The OpenCASCADE kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenCascade;

impl private::Sealed for BuiltIn {}
impl private::Sealed for OpenCascade {}

impl Kernel for BuiltIn {
    const NAME: &'static str = "built-in";
    const FACTORY: Option<&'static str> = None;

    // The built-in kernel builds rotations from circle arcs, which must
    // stay strictly below half a turn.
    fn accepts_revolve_angle(angle: f64) -> bool {
        angle > EPSILON_TOLERANCE && angle < PI
    }
}

impl Kernel for OpenCascade {
    const NAME: &'static str = "OpenCASCADE";
    const FACTORY: Option<&'static str> = Some(OCC_FACTORY);

    fn accepts_revolve_angle(angle: f64) -> bool {
        angle > EPSILON_TOLERANCE && angle <= 2.0 * PI + EPSILON_TOLERANCE
    }
}
