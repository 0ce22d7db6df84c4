//! # Mesh Measures
//!
//! Total volume, area or length of a mesh, whichever matches its highest
//! cell dimension. Non-simplex cells are split into simplices; higher
//! order cells are measured through their corner nodes, so curved edges
//! count as straight.

use glam::DVec3;
use rayon::prelude::*;
use tracing::warn;

use crate::cell::{CellBlock, CellType};
use crate::mesh::Mesh;

/// Corner count of the largest linear cell, the hexahedron.
const MAX_CORNERS: usize = 8;

/// Wedge corners split into three tetrahedra.
const WEDGE_TETS: [[usize; 4]; 3] = [[0, 1, 2, 5], [0, 1, 4, 5], [0, 3, 4, 5]];

/// Hexahedron corners split into two wedges along the bottom diagonal 0-2.
const HEX_WEDGES: [[usize; 6]; 2] = [[0, 1, 2, 4, 5, 6], [0, 2, 3, 4, 6, 7]];

/// Pyramid corners split into two tetrahedra.
const PYRAMID_TETS: [[usize; 4]; 2] = [[0, 1, 2, 4], [0, 2, 3, 4]];

/// Unsigned volume of the tetrahedron `abcd`.
#[inline]
pub fn tetra_volume(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> f64 {
    (b - a).cross(c - a).dot(d - a).abs() / 6.0
}

/// Area of the triangle `abc`.
#[inline]
pub fn triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    0.5 * (b - a).cross(c - a).length()
}

/// Length of the segment `ab`.
#[inline]
pub fn segment_length(a: DVec3, b: DVec3) -> f64 {
    a.distance(b)
}

/// Sums the measure of the highest-dimensional cells of `mesh`.
///
/// - any 3D cells: total volume of the 3D cells
/// - else any triangles or quads: total area
/// - else any lines: total length
/// - else `0.0`
///
/// Cells referring to a point index past the end of `mesh.points` are
/// skipped with a warning.
///
/// # Example
///
/// ```rust
/// use geomesh_mesh::{compute_volume, CellBlock, CellType, Mesh};
/// use glam::DVec3;
///
/// let mesh = Mesh::new(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///     vec![CellBlock::new(CellType::Triangle, vec![0, 1, 2])],
/// );
/// assert_eq!(compute_volume(&mesh), 0.5);
/// ```
pub fn compute_volume(mesh: &Mesh) -> f64 {
    let Some(dim) = mesh
        .cells
        .iter()
        .filter(|b| !b.is_empty() && b.cell_type.dim() > 0)
        .map(|b| b.cell_type.dim())
        .max()
    else {
        return 0.0;
    };

    mesh.cells
        .iter()
        .filter(|b| b.cell_type.dim() == dim)
        .map(|b| block_measure(&mesh.points, b))
        .sum()
}

fn block_measure(points: &[DVec3], block: &CellBlock) -> f64 {
    let linear = block.cell_type.linear();
    let corners = linear.num_nodes();
    let (total, skipped) = block
        .connectivity
        .par_chunks_exact(block.cell_type.num_nodes())
        .map(|cell| match corner_points(cell, corners, points) {
            Some(p) => (cell_measure(linear, &p), 0usize),
            None => (0.0, 1),
        })
        .reduce(|| (0.0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    if skipped > 0 {
        warn!(
            cell_type = ?block.cell_type,
            skipped,
            "skipped cells with out-of-range node indices"
        );
    }
    total
}

/// Positions of the first `corners` nodes of `cell`, or `None` if one of
/// them is not a valid point index.
fn corner_points(
    cell: &[usize],
    corners: usize,
    points: &[DVec3],
) -> Option<[DVec3; MAX_CORNERS]> {
    let mut out = [DVec3::ZERO; MAX_CORNERS];
    for (slot, &i) in out.iter_mut().zip(cell.iter().take(corners)) {
        *slot = *points.get(i)?;
    }
    Some(out)
}

fn cell_measure(linear: CellType, p: &[DVec3; MAX_CORNERS]) -> f64 {
    match linear {
        CellType::Line => segment_length(p[0], p[1]),
        CellType::Triangle => triangle_area(p[0], p[1], p[2]),
        CellType::Quad => triangle_area(p[0], p[1], p[2]) + triangle_area(p[0], p[2], p[3]),
        CellType::Tetra => tetra_volume(p[0], p[1], p[2], p[3]),
        CellType::Wedge => wedge_volume(&[p[0], p[1], p[2], p[3], p[4], p[5]]),
        CellType::Hexahedron => HEX_WEDGES
            .iter()
            .map(|w| wedge_volume(&w.map(|i| p[i])))
            .sum::<f64>(),
        CellType::Pyramid => PYRAMID_TETS
            .iter()
            .map(|[a, b, c, d]| tetra_volume(p[*a], p[*b], p[*c], p[*d]))
            .sum::<f64>(),
        _ => 0.0,
    }
}

fn wedge_volume(p: &[DVec3; 6]) -> f64 {
    WEDGE_TETS
        .iter()
        .map(|[a, b, c, d]| tetra_volume(p[*a], p[*b], p[*c], p[*d]))
        .sum()
}
