//! # Mesh Data Structure
//!
//! Points plus cell blocks, with per-cell integer data (gmsh tags),
//! per-point data and named physical groups.

mod cleanup;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::cell::{CellBlock, CellType};

/// Cell data key holding the physical group tag of every cell.
pub const PHYSICAL_TAG_KEY: &str = "gmsh:physical";

/// Cell data key holding the elementary entity tag of every cell.
pub const GEOMETRICAL_TAG_KEY: &str = "gmsh:geometrical";

/// Tag and dimension of a named physical group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTag {
    pub tag: i64,
    pub dim: u8,
}

/// An unstructured mesh.
///
/// `cell_data` holds one vector per cell block for each key, so
/// `cell_data[key][i].len() == cells[i].len()`.
///
/// # Example
///
/// ```rust
/// use geomesh_mesh::{CellBlock, CellType, Mesh};
/// use glam::DVec3;
///
/// let mesh = Mesh::new(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///     vec![CellBlock::new(CellType::Triangle, vec![0, 1, 2])],
/// );
/// assert_eq!(mesh.num_cells(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub points: Vec<DVec3>,
    pub cells: Vec<CellBlock>,
    pub cell_data: BTreeMap<String, Vec<Vec<i64>>>,
    /// Per-point values, one component vector per point.
    pub point_data: BTreeMap<String, Vec<Vec<f64>>>,
    pub field_data: BTreeMap<String, FieldTag>,
}

impl Mesh {
    /// Creates a mesh without any data arrays.
    pub fn new(points: Vec<DVec3>, cells: Vec<CellBlock>) -> Self {
        Self {
            points,
            cells,
            ..Self::default()
        }
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Total number of cells over all blocks.
    pub fn num_cells(&self) -> usize {
        self.cells.iter().map(CellBlock::len).sum()
    }

    /// Axis-aligned bounds of the points, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    /// Iterates over the node lists of all cells of type `cell_type`.
    pub fn cells_of_type(&self, cell_type: CellType) -> impl Iterator<Item = &[usize]> + '_ {
        self.cells
            .iter()
            .filter(move |block| block.cell_type == cell_type)
            .flat_map(CellBlock::cells)
    }

    /// Concatenates the connectivity of blocks sharing a type.
    pub fn cells_dict(&self) -> BTreeMap<CellType, Vec<usize>> {
        let mut dict: BTreeMap<CellType, Vec<usize>> = BTreeMap::new();
        for block in &self.cells {
            dict.entry(block.cell_type)
                .or_default()
                .extend_from_slice(&block.connectivity);
        }
        dict
    }

    /// Concatenates cell data `name` of blocks sharing a type.
    pub fn cell_data_dict(&self, name: &str) -> Option<BTreeMap<CellType, Vec<i64>>> {
        let data = self.cell_data.get(name)?;
        let mut dict: BTreeMap<CellType, Vec<i64>> = BTreeMap::new();
        for (block, values) in self.cells.iter().zip(data) {
            dict.entry(block.cell_type)
                .or_default()
                .extend_from_slice(values);
        }
        Some(dict)
    }

    /// Highest topological dimension among the cells.
    pub fn max_dim(&self) -> Option<u8> {
        self.cells
            .iter()
            .filter(|b| !b.is_empty())
            .map(|b| b.cell_type.dim())
            .max()
    }

    /// Keeps the blocks for which `keep` returns true, with their cell data.
    pub(crate) fn retain_blocks(&mut self, mut keep: impl FnMut(&CellBlock) -> bool) -> usize {
        let mask: Vec<bool> = self.cells.iter().map(&mut keep).collect();
        let removed: usize = self
            .cells
            .iter()
            .zip(&mask)
            .filter(|(_, kept)| !**kept)
            .map(|(b, _)| b.len())
            .sum();

        let mut flags = mask.iter();
        self.cells.retain(|_| *flags.next().unwrap_or(&true));
        for data in self.cell_data.values_mut() {
            let mut flags = mask.iter();
            data.retain(|_| *flags.next().unwrap_or(&true));
        }
        removed
    }
}
