//! # Mesh Options
//!
//! Per-call settings of [`crate::generate_mesh`]: what gmsh is asked to
//! produce and which clean-up steps run on the result.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use config::constants::{DEFAULT_MESH_DIMENSION, MAX_ELEMENT_ORDER};
use config::meshing::validate_dimension;
use serde::{Deserialize, Serialize};

use crate::error::GmshError;

/// Output format requested from gmsh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MshVersion {
    #[default]
    V41,
    V22,
}

impl MshVersion {
    /// Value of gmsh's `-format` flag.
    pub fn format_flag(self) -> &'static str {
        match self {
            MshVersion::V41 => "msh41",
            MshVersion::V22 => "msh22",
        }
    }
}

impl fmt::Display for MshVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MshVersion::V41 => write!(f, "4.1"),
            MshVersion::V22 => write!(f, "2.2"),
        }
    }
}

impl FromStr for MshVersion {
    type Err = GmshError;

    /// Accepts `4.1`/`2.2` as well as the `msh41`/`msh22` flag values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4.1" | "msh41" | "msh4" => Ok(MshVersion::V41),
            "2.2" | "msh22" | "msh2" => Ok(MshVersion::V22),
            other => Err(GmshError::invalid_options(format!(
                "unsupported MSH version `{other}`"
            ))),
        }
    }
}

/// Options for a single meshing run.
///
/// # Example
///
/// ```rust
/// use geomesh::{MeshOptions, MshVersion};
///
/// let opts = MeshOptions::new()
///     .with_dim(2)
///     .with_msh_version(MshVersion::V22)
///     .with_prune_z_0(true);
/// assert!(opts.validate().is_ok());
/// assert!(opts.remove_orphaned_nodes);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshOptions {
    /// Mesh dimension, 1 to 3.
    pub dim: u8,
    /// Element order; gmsh's default (linear) when `None`.
    pub order: Option<u8>,
    pub msh_version: MshVersion,
    /// Drop vertex cells from the result.
    pub prune_vertices: bool,
    /// Keep only cells of the highest dimension.
    pub remove_lower_dim_cells: bool,
    /// Drop points that no cell uses.
    pub remove_orphaned_nodes: bool,
    /// Flatten z to zero when the mesh is planar.
    pub prune_z_0: bool,
    /// Overrides the configured gmsh executable.
    pub gmsh_path: Option<PathBuf>,
    /// Appended to the gmsh command line.
    pub extra_args: Vec<String>,
    /// Scratch directory for the script and mesh file. A temporary
    /// directory is used and removed when unset.
    pub work_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl MeshOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dim(mut self, dim: u8) -> Self {
        self.dim = dim;
        self
    }

    pub fn with_order(mut self, order: u8) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_msh_version(mut self, version: MshVersion) -> Self {
        self.msh_version = version;
        self
    }

    pub fn with_prune_vertices(mut self, prune: bool) -> Self {
        self.prune_vertices = prune;
        self
    }

    pub fn with_remove_lower_dim_cells(mut self, remove: bool) -> Self {
        self.remove_lower_dim_cells = remove;
        self
    }

    pub fn with_remove_orphaned_nodes(mut self, remove: bool) -> Self {
        self.remove_orphaned_nodes = remove;
        self
    }

    pub fn with_prune_z_0(mut self, prune: bool) -> Self {
        self.prune_z_0 = prune;
        self
    }

    pub fn with_gmsh_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.gmsh_path = Some(path.into());
        self
    }

    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks the dimension and element order.
    pub fn validate(&self) -> Result<(), GmshError> {
        validate_dimension(self.dim)?;
        if let Some(order) = self.order {
            if !(1..=MAX_ELEMENT_ORDER).contains(&order) {
                return Err(GmshError::invalid_options(format!(
                    "element order must be between 1 and {MAX_ELEMENT_ORDER}, got {order}"
                )));
            }
        }
        if self.gmsh_path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(GmshError::invalid_options("gmsh path is empty"));
        }
        Ok(())
    }
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            dim: DEFAULT_MESH_DIMENSION,
            order: None,
            msh_version: MshVersion::default(),
            prune_vertices: true,
            remove_lower_dim_cells: false,
            remove_orphaned_nodes: true,
            prune_z_0: false,
            gmsh_path: None,
            extra_args: Vec::new(),
            work_dir: None,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::DEFAULT_MSH_VERSION;
    use config::ConfigError;

    #[test]
    fn test_defaults() {
        let opts = MeshOptions::default();
        assert_eq!(opts.dim, 3);
        assert_eq!(opts.msh_version, MshVersion::V41);
        assert!(opts.prune_vertices);
        assert!(!opts.remove_lower_dim_cells);
        assert!(opts.remove_orphaned_nodes);
        assert!(!opts.prune_z_0);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            MeshOptions::new().with_dim(0).validate(),
            Err(GmshError::Config(ConfigError::InvalidDimension(0)))
        ));
        assert!(matches!(
            MeshOptions::new().with_order(6).validate(),
            Err(GmshError::InvalidOptions(_))
        ));
        assert!(matches!(
            MeshOptions::new().with_order(0).validate(),
            Err(GmshError::InvalidOptions(_))
        ));
        assert!(MeshOptions::new().with_order(5).validate().is_ok());
        assert!(MeshOptions::new().with_gmsh_path("").validate().is_err());
    }

    #[test]
    fn test_format_flags() {
        assert_eq!(MshVersion::V41.format_flag(), "msh41");
        assert_eq!(MshVersion::V22.format_flag(), "msh22");
        assert_eq!(MshVersion::V22.to_string(), "2.2");
    }

    #[test]
    fn test_parse_msh_version() {
        assert_eq!(
            DEFAULT_MSH_VERSION.parse::<MshVersion>().unwrap(),
            MshVersion::default()
        );
        assert_eq!("msh22".parse::<MshVersion>().unwrap(), MshVersion::V22);
        assert!("3.0".parse::<MshVersion>().is_err());
    }
}
