//! # Geometry Errors
//!
//! Validation errors raised while building a geometry script. Every check
//! runs before the corresponding statements are appended, so a failed call
//! leaves the script untouched.

use thiserror::Error;

use crate::entity::Dim;

/// Errors that can occur while declaring geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A coordinate or parameter is NaN or infinite.
    #[error("Non-finite value in {context}")]
    NonFinite { context: String },

    /// A characteristic mesh size is zero or negative.
    #[error("Mesh size must be positive: {value}")]
    InvalidMeshSize { value: f64 },

    /// Not enough points or entities for the requested shape.
    #[error("{shape} needs at least {min} points, got {got}")]
    TooFewPoints {
        shape: &'static str,
        min: usize,
        got: usize,
    },

    /// A length that must be non-zero collapsed below tolerance.
    #[error("Degenerate geometry: {message}")]
    DegenerateLength { message: String },

    /// A radius is zero or negative.
    #[error("Radius must be positive: {value}")]
    InvalidRadius { value: f64 },

    /// A circle split into too few arcs.
    #[error("Circle needs at least {min} sections, got {got}")]
    InvalidSections { min: usize, got: usize },

    /// Extrusion layer description is inconsistent.
    #[error("Invalid layers: {message}")]
    InvalidLayers { message: String },

    /// A rotation angle outside what the kernel accepts.
    #[error("Invalid angle {angle}: {message}")]
    InvalidAngle { angle: f64, message: String },

    /// A list-taking operation was called with nothing to operate on.
    #[error("{operation} needs at least one entity")]
    EmptyOperands { operation: &'static str },

    /// Entities of different dimensions were mixed in one operation.
    #[error("{operation} mixes entities of dimension {expected} and {found}")]
    MixedDimensions {
        operation: &'static str,
        expected: Dim,
        found: Dim,
    },

    /// The operation is not defined for entities of this dimension.
    #[error("{operation} does not support entities of dimension {dim}")]
    UnsupportedDimension { operation: &'static str, dim: Dim },

    /// A curve loop was requested without any curve.
    #[error("Curve loop needs at least one curve")]
    OpenCurveLoop,

    /// A mesh-size field is inconsistent.
    #[error("Invalid field: {message}")]
    InvalidField { message: String },
}

impl GeometryError {
    /// Creates a non-finite value error.
    pub fn non_finite(context: impl Into<String>) -> Self {
        Self::NonFinite {
            context: context.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateLength {
            message: message.into(),
        }
    }

    /// Creates an invalid layers error.
    pub fn invalid_layers(message: impl Into<String>) -> Self {
        Self::InvalidLayers {
            message: message.into(),
        }
    }

    /// Creates an invalid angle error.
    pub fn invalid_angle(angle: f64, message: impl Into<String>) -> Self {
        Self::InvalidAngle {
            angle,
            message: message.into(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(message: impl Into<String>) -> Self {
        Self::InvalidField {
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
