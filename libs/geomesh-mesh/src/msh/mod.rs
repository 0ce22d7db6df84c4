//! # Gmsh MSH Files
//!
//! Reading ASCII MSH 2.x and 4.x, writing ASCII MSH 2.2.
//!
//! ## Sections
//!
//! | Section          | 2.x | 4.x | Result                          |
//! |------------------|-----|-----|---------------------------------|
//! | `$MeshFormat`    | yes | yes | version dispatch                |
//! | `$PhysicalNames` | yes | yes | `field_data`                    |
//! | `$Entities`      |  -  | yes | physical tag of each block      |
//! | `$Nodes`         | yes | yes | `points`                        |
//! | `$Elements`      | yes | yes | `cells`, `cell_data`            |
//! | `$NodeData`      | yes | yes | `point_data`                    |
//!
//! Any other section is skipped up to its `$End` marker.

mod reader;
mod v2;
mod v4;
mod writer;


use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::DVec3;
use tracing::{debug, info};

use crate::cell::{CellBlock, CellType};
use crate::error::MshError;
use crate::mesh::{FieldTag, Mesh, GEOMETRICAL_TAG_KEY, PHYSICAL_TAG_KEY};
use reader::LineReader;

pub use writer::write_msh22;

/// Major MSH format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    V2,
    V4 { minor: u32 },
}

/// Reads an ASCII MSH file.
pub fn read_msh(path: impl AsRef<Path>) -> Result<Mesh, MshError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mesh = parse_msh(BufReader::new(file))?;
    info!(
        path = %path.display(),
        points = mesh.num_points(),
        cells = mesh.num_cells(),
        blocks = mesh.cells.len(),
        "read mesh"
    );
    Ok(mesh)
}

/// Parses ASCII MSH content.
pub fn parse_msh<R: BufRead>(reader: R) -> Result<Mesh, MshError> {
    let mut lines = LineReader::new(reader);
    let format = read_format(&mut lines)?;

    let mut builder = MeshBuilder::default();
    let mut entities = v4::Entities::default();
    let mut seen_nodes = false;
    let mut seen_elements = false;

    while let Some(line) = lines.next_line()? {
        match (line.as_str(), format) {
            ("$PhysicalNames", _) => read_physical_names(&mut lines, &mut builder)?,
            ("$Entities", Format::V4 { minor }) => {
                entities = v4::read_entities(&mut lines, minor)?;
            }
            ("$Nodes", Format::V2) => {
                v2::read_nodes(&mut lines, &mut builder)?;
                seen_nodes = true;
            }
            ("$Nodes", Format::V4 { minor }) => {
                v4::read_nodes(&mut lines, &mut builder, minor)?;
                seen_nodes = true;
            }
            ("$Elements", _) if !seen_nodes => return Err(MshError::MissingSection("Nodes")),
            ("$Elements", Format::V2) => {
                v2::read_elements(&mut lines, &mut builder)?;
                seen_elements = true;
            }
            ("$Elements", Format::V4 { minor }) => {
                v4::read_elements(&mut lines, &mut builder, &entities, minor)?;
                seen_elements = true;
            }
            ("$NodeData", _) if !seen_nodes => return Err(MshError::MissingSection("Nodes")),
            ("$NodeData", _) => read_node_data(&mut lines, &mut builder)?,
            (other, _) => match other.strip_prefix('$') {
                Some(section) if !section.starts_with("End") => {
                    debug!(section, line = lines.line(), "skipping section");
                    lines.skip_section(section)?;
                }
                _ => return Err(lines.error(format!("unexpected content `{other}`"))),
            },
        }
    }

    if !seen_nodes {
        return Err(MshError::MissingSection("Nodes"));
    }
    if !seen_elements {
        return Err(MshError::MissingSection("Elements"));
    }
    Ok(builder.finish())
}

fn read_format<R: BufRead>(lines: &mut LineReader<R>) -> Result<Format, MshError> {
    match lines.next_line()? {
        Some(line) if line == "$MeshFormat" => {}
        _ => return Err(MshError::MissingSection("MeshFormat")),
    }
    let line = lines.expect_line("format line")?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let version: &str = tokens
        .first()
        .ok_or_else(|| lines.error("empty format line"))?;
    let file_type: u32 = lines.field(&tokens, 1, "file type")?;
    if file_type != 0 {
        return Err(MshError::Binary);
    }

    let mut parts = version.split('.');
    let major = parts.next().and_then(|s| s.parse::<u32>().ok());
    let minor = parts.next().and_then(|s| s.parse::<u32>().ok()).unwrap_or(0);
    let format = match major {
        Some(2) => Format::V2,
        Some(4) => Format::V4 { minor },
        _ => return Err(MshError::UnsupportedVersion(version.to_string())),
    };
    lines.expect_end("MeshFormat")?;
    debug!(version, "reading MSH");
    Ok(format)
}

// =============================================================================
// SHARED SECTIONS
// =============================================================================

fn read_physical_names<R: BufRead>(
    lines: &mut LineReader<R>,
    builder: &mut MeshBuilder,
) -> Result<(), MshError> {
    let count = lines.count("physical name count")?;
    for _ in 0..count {
        let line = lines.expect_line("physical name")?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let dim: u8 = lines.field(&tokens, 0, "physical dimension")?;
        let tag: i64 = lines.field(&tokens, 1, "physical tag")?;
        let name = quoted(&line).ok_or_else(|| lines.error("physical name is not quoted"))?;
        builder.field_data.insert(name.to_string(), FieldTag { tag, dim });
    }
    lines.expect_end("PhysicalNames")
}

fn read_node_data<R: BufRead>(
    lines: &mut LineReader<R>,
    builder: &mut MeshBuilder,
) -> Result<(), MshError> {
    let string_count = lines.count("string tag count")?;
    let mut strings = Vec::with_capacity(string_count);
    for _ in 0..string_count {
        let line = lines.expect_line("string tag")?;
        strings.push(quoted(&line).unwrap_or(line.as_str()).to_string());
    }
    let name = strings
        .into_iter()
        .next()
        .unwrap_or_else(|| format!("data{}", builder.point_data.len()));

    let real_count = lines.count("real tag count")?;
    for _ in 0..real_count {
        lines.expect_line("real tag")?;
    }
    let int_count = lines.count("integer tag count")?;
    let mut ints = Vec::with_capacity(int_count);
    for _ in 0..int_count {
        ints.push(lines.header::<i64>("integer tag", 1)?[0]);
    }
    if ints.len() < 3 || ints[1] < 1 || ints[2] < 0 {
        return Err(lines.error("node data needs time step, component and entry counts"));
    }
    let (components, entries) = (ints[1] as usize, ints[2] as usize);

    let mut values = vec![vec![f64::NAN; components]; builder.points.len()];
    for _ in 0..entries {
        let line = lines.expect_line("node data entry")?;
        let (tag, rest) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| lines.error("node data entry without values"))?;
        let tag: usize = tag
            .parse()
            .map_err(|_| lines.error(format!("invalid node tag `{tag}`")))?;
        let entry: Vec<f64> = lines.parse_all(rest, "node value")?;
        if entry.len() != components {
            return Err(lines.error(format!(
                "expected {components} components, got {}",
                entry.len()
            )));
        }
        let index = builder.node(tag, lines.line())?;
        values[index] = entry;
    }
    lines.expect_end("NodeData")?;
    builder.point_data.insert(name, values);
    Ok(())
}

/// Text between the first and the last double quote.
fn quoted(line: &str) -> Option<&str> {
    let start = line.find('"')?;
    let end = line.rfind('"')?;
    (end > start).then(|| &line[start + 1..end])
}

// =============================================================================
// MESH BUILDER
// =============================================================================

/// Accumulates nodes and cells while sections are read.
#[derive(Debug, Default)]
pub(crate) struct MeshBuilder {
    points: Vec<DVec3>,
    node_index: HashMap<usize, usize>,
    cells: Vec<CellBlock>,
    physical: Vec<Vec<i64>>,
    geometrical: Vec<Vec<i64>>,
    point_data: BTreeMap<String, Vec<Vec<f64>>>,
    field_data: BTreeMap<String, FieldTag>,
}

impl MeshBuilder {
    pub(crate) fn reserve_nodes(&mut self, additional: usize) {
        self.points.reserve(additional);
        self.node_index.reserve(additional);
    }

    pub(crate) fn add_node(&mut self, tag: usize, position: DVec3, line: usize) -> Result<(), MshError> {
        if self.node_index.insert(tag, self.points.len()).is_some() {
            return Err(MshError::parse(line, format!("duplicate node tag {tag}")));
        }
        self.points.push(position);
        Ok(())
    }

    /// Index of the node declared with `tag`.
    pub(crate) fn node(&self, tag: usize, line: usize) -> Result<usize, MshError> {
        self.node_index
            .get(&tag)
            .copied()
            .ok_or(MshError::UnknownNode { tag, line })
    }

    /// Starts a new, empty cell block.
    pub(crate) fn begin_block(&mut self, cell_type: CellType) {
        self.cells.push(CellBlock::new(cell_type, Vec::new()));
        self.physical.push(Vec::new());
        self.geometrical.push(Vec::new());
    }

    /// Appends a cell to the current block, mapping node tags to indices.
    pub(crate) fn push_cell(
        &mut self,
        node_tags: &[usize],
        physical: i64,
        geometrical: i64,
        line: usize,
    ) -> Result<(), MshError> {
        let mut indices = Vec::with_capacity(node_tags.len());
        for &tag in node_tags {
            indices.push(self.node(tag, line)?);
        }
        let block = self
            .cells
            .last_mut()
            .ok_or_else(|| MshError::parse(line, "element outside of a block"))?;
        if indices.len() != block.cell_type.num_nodes() {
            return Err(MshError::parse(
                line,
                format!(
                    "{} needs {} nodes, got {}",
                    block.cell_type,
                    block.cell_type.num_nodes(),
                    indices.len()
                ),
            ));
        }
        block.connectivity.extend_from_slice(&indices);
        if let Some(tags) = self.physical.last_mut() {
            tags.push(physical);
        }
        if let Some(tags) = self.geometrical.last_mut() {
            tags.push(geometrical);
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Mesh {
        let mut cell_data = BTreeMap::new();
        cell_data.insert(PHYSICAL_TAG_KEY.to_string(), self.physical);
        cell_data.insert(GEOMETRICAL_TAG_KEY.to_string(), self.geometrical);
        Mesh {
            points: self.points,
            cells: self.cells,
            cell_data,
            point_data: self.point_data,
            field_data: self.field_data,
        }
    }
}
