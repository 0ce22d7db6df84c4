//! # MSH Errors
//!
//! Errors raised while reading or writing Gmsh mesh files.

use thiserror::Error;

/// Errors that can occur while reading or writing MSH files.
#[derive(Debug, Error)]
pub enum MshError {
    /// Underlying read or write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed content
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A `$MeshFormat` version other than 2.x or 4.x
    #[error("Unsupported MSH version {0}")]
    UnsupportedVersion(String),

    /// Binary MSH files are not read
    #[error("Binary MSH files are not supported, request ASCII output")]
    Binary,

    /// Element type code without a known cell type
    #[error("Unknown element type {code} at line {line}")]
    UnknownElementType { code: u32, line: usize },

    /// A required section is absent
    #[error("Missing ${0} section")]
    MissingSection(&'static str),

    /// An element or data entry references a node that was never declared
    #[error("Unknown node tag {tag} at line {line}")]
    UnknownNode { tag: usize, line: usize },
}

impl MshError {
    /// Creates a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
