//! Command line construction, log classification and version parsing.

use super::*;
use crate::options::MshVersion;

fn strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

#[test]
fn test_default_arguments() {
    let gmsh = Gmsh::default();
    let args = gmsh.arguments(Path::new("in.geo"), Path::new("out.msh"), &MeshOptions::new());
    assert_eq!(
        strings(&args),
        vec!["-3", "in.geo", "-format", "msh41", "-o", "out.msh"]
    );
}

#[test]
fn test_arguments_with_order_and_extras() {
    let config = MeshingConfig::default().with_extra_args(["-nt", "4"]);
    let gmsh = Gmsh::new(config);
    let opts = MeshOptions::new()
        .with_dim(2)
        .with_order(2)
        .with_msh_version(MshVersion::V22)
        .with_extra_args(["-clscale", "0.5"]);
    let args = gmsh.arguments(Path::new("a.geo"), Path::new("a.msh"), &opts);
    assert_eq!(
        strings(&args),
        vec![
            "-2", "a.geo", "-format", "msh22", "-o", "a.msh", "-order", "2", "-nt", "4",
            "-clscale", "0.5"
        ]
    );
}

#[test]
fn test_executable_resolution() {
    let config = MeshingConfig::new("/opt/gmsh/bin/gmsh", 3).unwrap();
    let gmsh = Gmsh::new(config);
    assert_eq!(
        gmsh.executable(&MeshOptions::new()),
        PathBuf::from("/opt/gmsh/bin/gmsh")
    );
    assert_eq!(
        gmsh.executable(&MeshOptions::new().with_gmsh_path("/usr/local/bin/gmsh")),
        PathBuf::from("/usr/local/bin/gmsh")
    );
}

#[test]
fn test_log_classification() {
    assert_eq!(classify("Info    : Meshing 2D..."), LineKind::Info);
    assert_eq!(classify("Warning : 1 ill-shaped tets"), LineKind::Warning);
    assert_eq!(classify("Error   : Unknown variable 'p9'"), LineKind::Error);

    let log = "Info    : Reading 'a.geo'...\n\nError   : Unknown variable 'p9'\nWarning : done\n";
    assert_eq!(forward_log(log, false), vec!["Error   : Unknown variable 'p9'"]);
}

#[test]
fn test_stderr_tail_keeps_last_lines() {
    let stderr = "a\nb\n\nc\nd\ne\nf\ng\n";
    assert_eq!(stderr_tail(stderr), vec!["c", "d", "e", "f", "g"]);
    assert!(stderr_tail("").is_empty());
}

#[test]
fn test_parse_version() {
    assert_eq!(
        parse_version("4.11.1\n").unwrap(),
        GmshVersion {
            major: 4,
            minor: 11,
            patch: 1
        }
    );
    assert_eq!(parse_version("4.13.0-git-a1b2c3d").unwrap().to_string(), "4.13.0");
    assert_eq!(parse_version("3.0").unwrap().patch, 0);
    assert!(matches!(
        parse_version("gmsh: command not found"),
        Err(GmshError::VersionParse(_))
    ));
    assert!(parse_version("").is_err());
}

#[test]
fn test_missing_executable() {
    let config = MeshingConfig::new("/nonexistent/geomesh-test/gmsh", 3).unwrap();
    let gmsh = Gmsh::new(config);
    assert!(matches!(
        gmsh.version(),
        Err(GmshError::ExecutableNotFound(_))
    ));
    assert!(!gmsh.is_available());

    let dir = tempfile::tempdir().unwrap();
    let result = gmsh.mesh(
        &dir.path().join("a.geo"),
        &dir.path().join("a.msh"),
        &MeshOptions::new(),
    );
    assert!(matches!(result, Err(GmshError::ExecutableNotFound(_))));
}

#[test]
fn test_remove_stale_output() {
    let dir = tempfile::tempdir().unwrap();
    let msh = dir.path().join("old.msh");
    std::fs::write(&msh, "$MeshFormat\n").unwrap();

    remove_stale_output(&msh).unwrap();
    assert!(!msh.exists());
    // Nothing left to remove.
    remove_stale_output(&msh).unwrap();
}
