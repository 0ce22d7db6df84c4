//! # Meshing Pipeline
//!
//! ```text
//! Geometry::code → <work>/geomesh.geo → engine → <work>/geomesh.msh
//!                → read_msh → clean-up → Mesh
//! ```

use std::fs;
use std::path::PathBuf;

use config::constants::{GEO_FILE_NAME, MSH_FILE_NAME};
use geomesh_geometry::{Geometry, Kernel};
use geomesh_mesh::{read_msh, CellType, Mesh};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::engine::{remove_stale_output, Gmsh, MeshEngine};
use crate::error::GmshError;
use crate::options::MeshOptions;

/// Meshes `geometry` with the gmsh executable.
///
/// The executable is `options.gmsh_path` if set, else the
/// `GMSH_EXECUTABLE` environment variable, else `gmsh` on the `PATH`.
///
/// # Example
///
/// ```rust,no_run
/// use geomesh::{compute_volume, generate_mesh, BuiltInGeometry, MeshOptions};
///
/// let mut geom = BuiltInGeometry::new();
/// geom.add_rectangle(0.0, 1.0, 0.0, 1.0, 0.0, Some(0.1), &[], true)?;
///
/// let mesh = generate_mesh(&geom, &MeshOptions::new().with_dim(2))?;
/// assert!((compute_volume(&mesh) - 1.0).abs() < 1e-9);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate_mesh<K: Kernel>(
    geometry: &Geometry<K>,
    options: &MeshOptions,
) -> Result<Mesh, GmshError> {
    generate_mesh_with(&Gmsh::from_env(), geometry, options)
}

/// Meshes `geometry` with any [`MeshEngine`].
pub fn generate_mesh_with<E, K>(
    engine: &E,
    geometry: &Geometry<K>,
    options: &MeshOptions,
) -> Result<Mesh, GmshError>
where
    E: MeshEngine + ?Sized,
    K: Kernel,
{
    options.validate()?;

    // Kept alive until the mesh has been read.
    let scratch = match &options.work_dir {
        Some(_) => None,
        None => Some(tempfile::Builder::new().prefix("geomesh-").tempdir()?),
    };
    let work_dir = work_dir(options, scratch.as_ref())?;
    let geo = work_dir.join(GEO_FILE_NAME);
    let msh = work_dir.join(MSH_FILE_NAME);

    fs::write(&geo, geometry.code())?;
    debug!(path = %geo.display(), kernel = geometry.kernel_name(), "wrote geometry script");

    remove_stale_output(&msh)?;
    engine.mesh(&geo, &msh, options)?;
    if !msh.is_file() {
        return Err(GmshError::MissingOutput(msh));
    }

    let mut mesh = read_msh(&msh)?;
    clean_up(&mut mesh, options);

    info!(
        points = mesh.num_points(),
        cells = mesh.num_cells(),
        blocks = mesh.cells.len(),
        "generated mesh"
    );
    Ok(mesh)
}

fn work_dir(options: &MeshOptions, scratch: Option<&TempDir>) -> Result<PathBuf, GmshError> {
    match (&options.work_dir, scratch) {
        (Some(dir), _) => {
            fs::create_dir_all(dir)?;
            Ok(dir.clone())
        }
        (None, Some(tmp)) => Ok(tmp.path().to_path_buf()),
        (None, None) => Err(GmshError::invalid_options("no work directory")),
    }
}

/// Applies the clean-up steps selected in `options`, in a fixed order:
/// vertices, lower-dimensional cells, orphaned nodes, z-pruning.
pub fn clean_up(mesh: &mut Mesh, options: &MeshOptions) {
    if options.prune_vertices {
        mesh.remove_cells_of_type(CellType::Vertex);
    }
    if options.remove_lower_dim_cells {
        mesh.remove_lower_dimensional_cells();
    }
    if options.remove_orphaned_nodes {
        mesh.remove_orphaned_nodes();
    }
    if options.prune_z_0 {
        mesh.prune_z_0();
    }
}
