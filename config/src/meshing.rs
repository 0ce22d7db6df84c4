//! Runtime settings resolved from defaults and the environment.
//!
//! The constants in [`crate::constants`] are compile-time defaults;
//! [`MeshingConfig`] is the snapshot a pipeline run actually uses.

use std::fmt;
use std::path::PathBuf;

use crate::constants::{DEFAULT_MESH_DIMENSION, GMSH_EXECUTABLE, GMSH_EXECUTABLE_ENV};

/// Immutable snapshot of the settings used to drive gmsh.
///
/// # Examples
/// ```
/// use config::MeshingConfig;
/// let cfg = MeshingConfig::default();
/// assert_eq!(cfg.dimension, 3);
/// assert!(!cfg.verbose);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshingConfig {
    /// Path or program name of the gmsh executable.
    pub gmsh_executable: PathBuf,
    /// Topological dimension passed as `-1`, `-2` or `-3`.
    pub dimension: u8,
    /// Forward every line gmsh prints instead of only warnings and errors.
    pub verbose: bool,
    /// Arguments appended verbatim to the gmsh command line.
    pub extra_args: Vec<String>,
}

impl MeshingConfig {
    /// Builds a configuration, validating the mesh dimension.
    ///
    /// # Examples
    /// ```
    /// use config::MeshingConfig;
    /// let cfg = MeshingConfig::new("/opt/gmsh/bin/gmsh", 2).expect("valid config");
    /// assert_eq!(cfg.dimension, 2);
    /// assert!(MeshingConfig::new("gmsh", 4).is_err());
    /// ```
    pub fn new(gmsh_executable: impl Into<PathBuf>, dimension: u8) -> Result<Self, ConfigError> {
        validate_dimension(dimension)?;
        let gmsh_executable = gmsh_executable.into();
        if gmsh_executable.as_os_str().is_empty() {
            return Err(ConfigError::EmptyExecutable);
        }
        Ok(Self {
            gmsh_executable,
            dimension,
            verbose: false,
            extra_args: Vec::new(),
        })
    }

    /// Defaults, with the executable taken from `GMSH_EXECUTABLE` when that
    /// variable is set to a non-empty value.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(path) = std::env::var_os(GMSH_EXECUTABLE_ENV) {
            if !path.is_empty() {
                cfg.gmsh_executable = PathBuf::from(path);
            }
        }
        cfg
    }

    /// Returns a copy with `verbose` set.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns a copy with additional command-line arguments.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Default for MeshingConfig {
    fn default() -> Self {
        Self {
            gmsh_executable: PathBuf::from(GMSH_EXECUTABLE),
            dimension: DEFAULT_MESH_DIMENSION,
            verbose: false,
            extra_args: Vec::new(),
        }
    }
}

/// Checks that `dimension` is one of 1, 2 or 3.
pub fn validate_dimension(dimension: u8) -> Result<(), ConfigError> {
    if (1..=3).contains(&dimension) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension(dimension))
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the mesh dimension is not 1, 2 or 3.
    InvalidDimension(u8),
    /// Raised when the executable path is empty.
    EmptyExecutable,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimension(value) => {
                write!(f, "mesh dimension must be 1, 2 or 3: {value}")
            }
            ConfigError::EmptyExecutable => write!(f, "gmsh executable path is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
