//! # Cell Types
//!
//! Gmsh element types with their node counts, dimensions and names.
//! Node order follows Gmsh: corner nodes come first for every type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Element type of a cell block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Vertex,
    Line,
    Line3,
    Triangle,
    Triangle6,
    Quad,
    Quad8,
    Quad9,
    Tetra,
    Tetra10,
    Hexahedron,
    Hexahedron20,
    Hexahedron27,
    Wedge,
    Wedge15,
    Wedge18,
    Pyramid,
    Pyramid13,
    Pyramid14,
}

impl CellType {
    /// Every supported cell type.
    pub const ALL: [CellType; 19] = [
        CellType::Vertex,
        CellType::Line,
        CellType::Line3,
        CellType::Triangle,
        CellType::Triangle6,
        CellType::Quad,
        CellType::Quad8,
        CellType::Quad9,
        CellType::Tetra,
        CellType::Tetra10,
        CellType::Hexahedron,
        CellType::Hexahedron20,
        CellType::Hexahedron27,
        CellType::Wedge,
        CellType::Wedge15,
        CellType::Wedge18,
        CellType::Pyramid,
        CellType::Pyramid13,
        CellType::Pyramid14,
    ];

    /// Maps a Gmsh element type code to a cell type.
    pub fn from_gmsh(code: u32) -> Option<Self> {
        let cell = match code {
            1 => CellType::Line,
            2 => CellType::Triangle,
            3 => CellType::Quad,
            4 => CellType::Tetra,
            5 => CellType::Hexahedron,
            6 => CellType::Wedge,
            7 => CellType::Pyramid,
            8 => CellType::Line3,
            9 => CellType::Triangle6,
            10 => CellType::Quad9,
            11 => CellType::Tetra10,
            12 => CellType::Hexahedron27,
            13 => CellType::Wedge18,
            14 => CellType::Pyramid14,
            15 => CellType::Vertex,
            16 => CellType::Quad8,
            17 => CellType::Hexahedron20,
            18 => CellType::Wedge15,
            19 => CellType::Pyramid13,
            _ => return None,
        };
        Some(cell)
    }

    /// Gmsh element type code.
    pub fn gmsh_code(self) -> u32 {
        match self {
            CellType::Line => 1,
            CellType::Triangle => 2,
            CellType::Quad => 3,
            CellType::Tetra => 4,
            CellType::Hexahedron => 5,
            CellType::Wedge => 6,
            CellType::Pyramid => 7,
            CellType::Line3 => 8,
            CellType::Triangle6 => 9,
            CellType::Quad9 => 10,
            CellType::Tetra10 => 11,
            CellType::Hexahedron27 => 12,
            CellType::Wedge18 => 13,
            CellType::Pyramid14 => 14,
            CellType::Vertex => 15,
            CellType::Quad8 => 16,
            CellType::Hexahedron20 => 17,
            CellType::Wedge15 => 18,
            CellType::Pyramid13 => 19,
        }
    }

    /// Nodes per cell.
    pub fn num_nodes(self) -> usize {
        match self {
            CellType::Vertex => 1,
            CellType::Line => 2,
            CellType::Line3 => 3,
            CellType::Triangle => 3,
            CellType::Triangle6 => 6,
            CellType::Quad => 4,
            CellType::Quad8 => 8,
            CellType::Quad9 => 9,
            CellType::Tetra => 4,
            CellType::Tetra10 => 10,
            CellType::Hexahedron => 8,
            CellType::Hexahedron20 => 20,
            CellType::Hexahedron27 => 27,
            CellType::Wedge => 6,
            CellType::Wedge15 => 15,
            CellType::Wedge18 => 18,
            CellType::Pyramid => 5,
            CellType::Pyramid13 => 13,
            CellType::Pyramid14 => 14,
        }
    }

    /// Topological dimension.
    pub fn dim(self) -> u8 {
        match self.linear() {
            CellType::Vertex => 0,
            CellType::Line => 1,
            CellType::Triangle | CellType::Quad => 2,
            _ => 3,
        }
    }

    /// The first-order type with the same corners.
    pub fn linear(self) -> CellType {
        match self {
            CellType::Line3 => CellType::Line,
            CellType::Triangle6 => CellType::Triangle,
            CellType::Quad8 | CellType::Quad9 => CellType::Quad,
            CellType::Tetra10 => CellType::Tetra,
            CellType::Hexahedron20 | CellType::Hexahedron27 => CellType::Hexahedron,
            CellType::Wedge15 | CellType::Wedge18 => CellType::Wedge,
            CellType::Pyramid13 | CellType::Pyramid14 => CellType::Pyramid,
            other => other,
        }
    }

    /// Number of corner nodes, i.e. nodes of the linear type.
    pub fn num_corners(self) -> usize {
        self.linear().num_nodes()
    }

    /// Name used by meshio-style tooling (`triangle`, `tetra10`, ...).
    pub fn name(self) -> &'static str {
        match self {
            CellType::Vertex => "vertex",
            CellType::Line => "line",
            CellType::Line3 => "line3",
            CellType::Triangle => "triangle",
            CellType::Triangle6 => "triangle6",
            CellType::Quad => "quad",
            CellType::Quad8 => "quad8",
            CellType::Quad9 => "quad9",
            CellType::Tetra => "tetra",
            CellType::Tetra10 => "tetra10",
            CellType::Hexahedron => "hexahedron",
            CellType::Hexahedron20 => "hexahedron20",
            CellType::Hexahedron27 => "hexahedron27",
            CellType::Wedge => "wedge",
            CellType::Wedge15 => "wedge15",
            CellType::Wedge18 => "wedge18",
            CellType::Pyramid => "pyramid",
            CellType::Pyramid13 => "pyramid13",
            CellType::Pyramid14 => "pyramid14",
        }
    }

    /// Looks a cell type up by [`CellType::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// CELL BLOCK
// =============================================================================

/// Cells of one type stored as flat, zero-based connectivity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBlock {
    pub cell_type: CellType,
    /// `cell_type.num_nodes()` point indices per cell.
    pub connectivity: Vec<usize>,
}

impl CellBlock {
    pub fn new(cell_type: CellType, connectivity: Vec<usize>) -> Self {
        debug_assert_eq!(connectivity.len() % cell_type.num_nodes(), 0);
        Self {
            cell_type,
            connectivity,
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.connectivity.len() / self.cell_type.num_nodes()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.connectivity.is_empty()
    }

    /// Iterates over the node lists of the cells.
    pub fn cells(&self) -> std::slice::ChunksExact<'_, usize> {
        self.connectivity.chunks_exact(self.cell_type.num_nodes())
    }
}
