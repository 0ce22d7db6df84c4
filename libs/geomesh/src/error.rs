//! # Runner Errors
//!
//! Everything that can go wrong between rendering a script and holding a
//! parsed mesh.

use std::path::PathBuf;
use std::process::ExitStatus;

use config::ConfigError;
use geomesh_mesh::MshError;
use thiserror::Error;

/// Errors raised by [`crate::generate_mesh`] and the [`crate::Gmsh`] engine.
#[derive(Debug, Error)]
pub enum GmshError {
    /// Reading or writing scratch files failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The gmsh executable could not be started
    #[error("gmsh executable not found: {}", .0.display())]
    ExecutableNotFound(PathBuf),

    /// gmsh exited with a failure status
    #[error("gmsh failed ({status}): {message}")]
    ProcessFailed { status: ExitStatus, message: String },

    /// gmsh reported success but wrote no mesh file
    #[error("gmsh produced no mesh at {}", .0.display())]
    MissingOutput(PathBuf),

    /// `gmsh --version` printed something unexpected
    #[error("cannot parse gmsh version from {0:?}")]
    VersionParse(String),

    /// Meshing options out of range
    #[error("invalid mesh options: {0}")]
    InvalidOptions(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The produced mesh file could not be read
    #[error("mesh file error: {0}")]
    Mesh(#[from] MshError),
}

impl GmshError {
    /// Creates an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }
}
