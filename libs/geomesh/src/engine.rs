//! # Mesh Engines
//!
//! [`MeshEngine`] turns a `.geo` script on disk into a `.msh` file.
//! [`Gmsh`] does it by running the gmsh executable; tests substitute
//! engines that write canned files.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use config::MeshingConfig;
use tracing::{debug, error, info, warn};

use crate::error::GmshError;
use crate::options::MeshOptions;

#[cfg(test)]
mod tests;

/// Lines of stderr kept in the error message when gmsh fails without
/// printing an `Error` line.
const STDERR_TAIL_LINES: usize = 5;

/// Produces a mesh file from a geometry script.
pub trait MeshEngine {
    /// Meshes the script at `geo` and writes the result to `msh`.
    fn mesh(&self, geo: &Path, msh: &Path, opts: &MeshOptions) -> Result<(), GmshError>;
}

// =============================================================================
// GMSH
// =============================================================================

/// Runs the gmsh executable.
///
/// # Example
///
/// ```rust,no_run
/// use geomesh::Gmsh;
///
/// let gmsh = Gmsh::from_env();
/// if let Ok(version) = gmsh.version() {
///     println!("using gmsh {version}");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gmsh {
    config: MeshingConfig,
}

/// A parsed `gmsh --version` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GmshVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for GmshVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Gmsh {
    pub fn new(config: MeshingConfig) -> Self {
        Self { config }
    }

    /// Uses [`MeshingConfig::from_env`].
    pub fn from_env() -> Self {
        Self::new(MeshingConfig::from_env())
    }

    pub fn config(&self) -> &MeshingConfig {
        &self.config
    }

    /// Executable for a run with `opts`.
    pub fn executable(&self, opts: &MeshOptions) -> PathBuf {
        opts.gmsh_path
            .clone()
            .unwrap_or_else(|| self.config.gmsh_executable.clone())
    }

    /// Command line arguments for meshing `geo` into `msh`.
    pub fn arguments(&self, geo: &Path, msh: &Path, opts: &MeshOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            format!("-{}", opts.dim).into(),
            geo.into(),
            "-format".into(),
            opts.msh_version.format_flag().into(),
            "-o".into(),
            msh.into(),
        ];
        if let Some(order) = opts.order {
            args.push("-order".into());
            args.push(order.to_string().into());
        }
        args.extend(self.config.extra_args.iter().map(OsString::from));
        args.extend(opts.extra_args.iter().map(OsString::from));
        args
    }

    /// Runs `gmsh --version`.
    pub fn version(&self) -> Result<GmshVersion, GmshError> {
        let executable = self.config.gmsh_executable.clone();
        let output = run(Command::new(&executable).arg("--version"), &executable)?;
        // Older releases print the version on stderr.
        let text = if output.stdout.iter().any(|b| !b.is_ascii_whitespace()) {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            String::from_utf8_lossy(&output.stderr).into_owned()
        };
        parse_version(&text)
    }

    /// Whether the configured executable runs and reports a version.
    pub fn is_available(&self) -> bool {
        self.version().is_ok()
    }
}

impl MeshEngine for Gmsh {
    fn mesh(&self, geo: &Path, msh: &Path, opts: &MeshOptions) -> Result<(), GmshError> {
        let executable = self.executable(opts);
        let args = self.arguments(geo, msh, opts);
        debug!(
            command = %executable.display(),
            args = ?args,
            "running gmsh"
        );

        remove_stale_output(msh)?;
        let output = run(Command::new(&executable).args(&args), &executable)?;
        let verbose = opts.verbose || self.config.verbose;
        let errors = forward_log(&String::from_utf8_lossy(&output.stdout), verbose);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr_errors = forward_log(&stderr, verbose);

        if !output.status.success() {
            let mut lines: Vec<String> = errors.into_iter().chain(stderr_errors).collect();
            if lines.is_empty() {
                lines = stderr_tail(&stderr);
            }
            return Err(GmshError::ProcessFailed {
                status: output.status,
                message: lines.join("\n"),
            });
        }
        if !msh.is_file() {
            return Err(GmshError::MissingOutput(msh.to_path_buf()));
        }
        Ok(())
    }
}

/// Deletes a mesh file left over from an earlier run. A missing file is
/// not an error.
pub(crate) fn remove_stale_output(msh: &Path) -> Result<(), GmshError> {
    match fs::remove_file(msh) {
        Ok(()) => {
            debug!(path = %msh.display(), "removed stale mesh file");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(GmshError::Io(e)),
    }
}

fn run(command: &mut Command, executable: &Path) -> Result<Output, GmshError> {
    command.output().map_err(|e| match e.kind() {
        ErrorKind::NotFound => GmshError::ExecutableNotFound(executable.to_path_buf()),
        _ => GmshError::Io(e),
    })
}

// =============================================================================
// OUTPUT HANDLING
// =============================================================================

/// Severity gmsh gives a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Info,
    Warning,
    Error,
}

pub(crate) fn classify(line: &str) -> LineKind {
    if line.starts_with("Error") {
        LineKind::Error
    } else if line.starts_with("Warning") {
        LineKind::Warning
    } else {
        LineKind::Info
    }
}

/// Sends gmsh's output to `tracing` and returns its `Error` lines.
pub(crate) fn forward_log(text: &str, verbose: bool) -> Vec<String> {
    let mut errors = Vec::new();
    for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
        match classify(line) {
            LineKind::Error => {
                error!(target: "gmsh", "{line}");
                errors.push(line.to_string());
            }
            LineKind::Warning => warn!(target: "gmsh", "{line}"),
            LineKind::Info if verbose => info!(target: "gmsh", "{line}"),
            LineKind::Info => debug!(target: "gmsh", "{line}"),
        }
    }
    errors
}

fn stderr_tail(stderr: &str) -> Vec<String> {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].iter().map(|l| l.to_string()).collect()
}

/// Parses `major.minor[.patch]` from the first token of `text`. Suffixes
/// such as `-git-1234abcd` are ignored.
pub fn parse_version(text: &str) -> Result<GmshVersion, GmshError> {
    let fail = || GmshError::VersionParse(text.trim().to_string());
    let token = text.split_whitespace().next().ok_or_else(fail)?;
    let numeric = token.split('-').next().unwrap_or(token);
    let parts = numeric
        .split('.')
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| fail())?;

    match parts.as_slice() {
        [major, minor] => Ok(GmshVersion {
            major: *major,
            minor: *minor,
            patch: 0,
        }),
        [major, minor, patch, ..] => Ok(GmshVersion {
            major: *major,
            minor: *minor,
            patch: *patch,
        }),
        _ => Err(fail()),
    }
}
