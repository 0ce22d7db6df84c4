//! MSH 2.x node and element sections.
//!
//! ```text
//! $Nodes
//! <count>
//! <tag> <x> <y> <z>
//! $EndNodes
//! $Elements
//! <count>
//! <tag> <type> <ntags> <physical> <elementary> [...] <node tags>
//! $EndElements
//! ```

use std::io::BufRead;

use glam::DVec3;

use super::reader::LineReader;
use super::MeshBuilder;
use crate::cell::CellType;
use crate::error::MshError;

pub(super) fn read_nodes<R: BufRead>(
    lines: &mut LineReader<R>,
    builder: &mut MeshBuilder,
) -> Result<(), MshError> {
    let count = lines.count("node count")?;
    builder.reserve_nodes(count);
    for _ in 0..count {
        let line = lines.expect_line("node")?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let tag: usize = lines.field(&tokens, 0, "node tag")?;
        let x: f64 = lines.field(&tokens, 1, "x coordinate")?;
        let y: f64 = lines.field(&tokens, 2, "y coordinate")?;
        let z: f64 = lines.field(&tokens, 3, "z coordinate")?;
        builder.add_node(tag, DVec3::new(x, y, z), lines.line())?;
    }
    lines.expect_end("Nodes")
}

/// Consecutive elements sharing type and tags form one block.
pub(super) fn read_elements<R: BufRead>(
    lines: &mut LineReader<R>,
    builder: &mut MeshBuilder,
) -> Result<(), MshError> {
    let count = lines.count("element count")?;
    let mut current: Option<(CellType, i64, i64)> = None;
    for _ in 0..count {
        let fields: Vec<i64> = lines.header("element", 3)?;
        let line = lines.line();

        let code = u32::try_from(fields[1])
            .map_err(|_| MshError::parse(line, format!("invalid element type {}", fields[1])))?;
        let cell_type =
            CellType::from_gmsh(code).ok_or(MshError::UnknownElementType { code, line })?;
        let tag_count = usize::try_from(fields[2])
            .map_err(|_| MshError::parse(line, "negative tag count"))?;
        let tags = fields
            .get(3..3 + tag_count)
            .ok_or_else(|| MshError::parse(line, "element line is missing tags"))?;
        let physical = tags.first().copied().unwrap_or(0);
        let geometrical = tags.get(1).copied().unwrap_or(0);

        let node_tags = fields[3 + tag_count..]
            .iter()
            .map(|&t| {
                usize::try_from(t).map_err(|_| MshError::parse(line, format!("invalid node tag {t}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let key = (cell_type, physical, geometrical);
        if current != Some(key) {
            builder.begin_block(cell_type);
            current = Some(key);
        }
        builder.push_cell(&node_tags, physical, geometrical, line)?;
    }
    lines.expect_end("Elements")
}
