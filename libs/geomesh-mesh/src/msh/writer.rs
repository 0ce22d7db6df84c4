//! ASCII MSH 2.2 output.

use std::io::Write;

use crate::error::MshError;
use crate::mesh::{Mesh, GEOMETRICAL_TAG_KEY, PHYSICAL_TAG_KEY};

/// Writes `mesh` as ASCII MSH 2.2.
///
/// Node and element tags are one-based and consecutive. Every element
/// carries two tags, the physical and the elementary one, taken from
/// `gmsh:physical` and `gmsh:geometrical` (zero when absent). Point data
/// is written as one `$NodeData` view per key.
pub fn write_msh22<W: Write>(mesh: &Mesh, mut out: W) -> Result<(), MshError> {
    writeln!(out, "$MeshFormat")?;
    writeln!(out, "2.2 0 8")?;
    writeln!(out, "$EndMeshFormat")?;

    if !mesh.field_data.is_empty() {
        writeln!(out, "$PhysicalNames")?;
        writeln!(out, "{}", mesh.field_data.len())?;
        for (name, field) in &mesh.field_data {
            writeln!(out, "{} {} \"{}\"", field.dim, field.tag, name)?;
        }
        writeln!(out, "$EndPhysicalNames")?;
    }

    writeln!(out, "$Nodes")?;
    writeln!(out, "{}", mesh.points.len())?;
    for (i, p) in mesh.points.iter().enumerate() {
        writeln!(out, "{} {:?} {:?} {:?}", i + 1, p.x, p.y, p.z)?;
    }
    writeln!(out, "$EndNodes")?;

    let physical = mesh.cell_data.get(PHYSICAL_TAG_KEY);
    let geometrical = mesh.cell_data.get(GEOMETRICAL_TAG_KEY);
    let tag = |data: Option<&Vec<Vec<i64>>>, block: usize, cell: usize| {
        data.and_then(|d| d.get(block))
            .and_then(|b| b.get(cell))
            .copied()
            .unwrap_or(0)
    };

    writeln!(out, "$Elements")?;
    writeln!(out, "{}", mesh.num_cells())?;
    let mut id = 1;
    for (b, block) in mesh.cells.iter().enumerate() {
        let code = block.cell_type.gmsh_code();
        for (c, nodes) in block.cells().enumerate() {
            write!(
                out,
                "{id} {code} 2 {} {}",
                tag(physical, b, c),
                tag(geometrical, b, c)
            )?;
            for node in nodes {
                write!(out, " {}", node + 1)?;
            }
            writeln!(out)?;
            id += 1;
        }
    }
    writeln!(out, "$EndElements")?;

    for (name, values) in &mesh.point_data {
        let components = values.first().map_or(1, Vec::len);
        writeln!(out, "$NodeData")?;
        writeln!(out, "1")?;
        writeln!(out, "\"{name}\"")?;
        writeln!(out, "1")?;
        writeln!(out, "0.0")?;
        writeln!(out, "3")?;
        writeln!(out, "0")?;
        writeln!(out, "{components}")?;
        writeln!(out, "{}", values.len())?;
        for (i, value) in values.iter().enumerate() {
            write!(out, "{}", i + 1)?;
            for v in value {
                write!(out, " {v:?}")?;
            }
            writeln!(out)?;
        }
        writeln!(out, "$EndNodeData")?;
    }

    out.flush()?;
    Ok(())
}
