//! MSH 4.x entity, node and element sections.
//!
//! Nodes and elements are grouped in entity blocks. The 4.1 block header
//! is `<dim> <entity tag> ...`; 4.0 swaps the first two fields. In 4.1
//! node tags and coordinates are listed separately; 4.0 writes them on
//! the same line.

use std::collections::HashMap;
use std::io::BufRead;

use glam::DVec3;

use super::reader::LineReader;
use super::MeshBuilder;
use crate::cell::CellType;
use crate::error::MshError;

/// First physical tag of every elementary entity, keyed by `(dim, tag)`.
#[derive(Debug, Default)]
pub(super) struct Entities {
    physical: HashMap<(u8, i64), i64>,
}

impl Entities {
    fn physical_tag(&self, dim: u8, tag: i64) -> i64 {
        self.physical.get(&(dim, tag.abs())).copied().unwrap_or(0)
    }
}

pub(super) fn read_entities<R: BufRead>(
    lines: &mut LineReader<R>,
    minor: u32,
) -> Result<Entities, MshError> {
    let counts: Vec<usize> = lines.header("entity counts", 4)?;
    let mut entities = Entities::default();
    for (dim, &count) in (0u8..4).zip(&counts) {
        // Points carry a position in 4.1 and a bounding box in 4.0.
        let bounds = if dim == 0 && minor >= 1 { 3 } else { 6 };
        for _ in 0..count {
            let line = lines.expect_line("entity")?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let tag: i64 = lines.field(&tokens, 0, "entity tag")?;
            let physical_count: usize = lines.field(&tokens, 1 + bounds, "physical tag count")?;
            let physical = if physical_count > 0 {
                lines.field(&tokens, 2 + bounds, "physical tag")?
            } else {
                0
            };
            entities.physical.insert((dim, tag), physical);
        }
    }
    lines.expect_end("Entities")?;
    Ok(entities)
}

/// Reads `(dim, entity tag, third field, count)` of a block header.
fn block_header<R: BufRead>(
    lines: &mut LineReader<R>,
    minor: u32,
    what: &str,
) -> Result<(u8, i64, i64, usize), MshError> {
    let fields: Vec<i64> = lines.header(what, 4)?;
    let (dim, tag) = if minor >= 1 {
        (fields[0], fields[1])
    } else {
        (fields[1], fields[0])
    };
    let dim = u8::try_from(dim)
        .ok()
        .filter(|d| *d <= 3)
        .ok_or_else(|| lines.error(format!("invalid entity dimension {dim}")))?;
    let count = usize::try_from(fields[3])
        .map_err(|_| lines.error(format!("invalid {what} size {}", fields[3])))?;
    Ok((dim, tag, fields[2], count))
}

pub(super) fn read_nodes<R: BufRead>(
    lines: &mut LineReader<R>,
    builder: &mut MeshBuilder,
    minor: u32,
) -> Result<(), MshError> {
    let header: Vec<usize> = lines.header("node section header", 2)?;
    let (blocks, total) = (header[0], header[1]);
    builder.reserve_nodes(total);

    for _ in 0..blocks {
        let (_, _, _, count) = block_header(lines, minor, "node block")?;
        if minor >= 1 {
            let mut tags = Vec::with_capacity(count);
            for _ in 0..count {
                tags.push(lines.count("node tag")?);
            }
            for tag in tags {
                let coords: Vec<f64> = lines.header("node coordinates", 3)?;
                let position = DVec3::new(coords[0], coords[1], coords[2]);
                builder.add_node(tag, position, lines.line())?;
            }
        } else {
            for _ in 0..count {
                let line = lines.expect_line("node")?;
                let tokens: Vec<&str> = line.split_whitespace().collect();
                let tag: usize = lines.field(&tokens, 0, "node tag")?;
                let x: f64 = lines.field(&tokens, 1, "x coordinate")?;
                let y: f64 = lines.field(&tokens, 2, "y coordinate")?;
                let z: f64 = lines.field(&tokens, 3, "z coordinate")?;
                builder.add_node(tag, DVec3::new(x, y, z), lines.line())?;
            }
        }
    }
    lines.expect_end("Nodes")
}

/// Every entity block becomes its own cell block.
pub(super) fn read_elements<R: BufRead>(
    lines: &mut LineReader<R>,
    builder: &mut MeshBuilder,
    entities: &Entities,
    minor: u32,
) -> Result<(), MshError> {
    let header: Vec<usize> = lines.header("element section header", 2)?;
    let blocks = header[0];

    for _ in 0..blocks {
        let (dim, tag, code, count) = block_header(lines, minor, "element block")?;
        let line = lines.line();
        let code = u32::try_from(code)
            .map_err(|_| MshError::parse(line, format!("invalid element type {code}")))?;
        let cell_type =
            CellType::from_gmsh(code).ok_or(MshError::UnknownElementType { code, line })?;
        let physical = entities.physical_tag(dim, tag);

        if count > 0 {
            builder.begin_block(cell_type);
        }
        for _ in 0..count {
            let fields: Vec<usize> = lines.header("element", 2)?;
            builder.push_cell(&fields[1..], physical, tag, lines.line())?;
        }
    }
    lines.expect_end("Elements")
}
