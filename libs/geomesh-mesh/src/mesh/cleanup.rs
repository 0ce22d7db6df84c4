//! Post-processing applied after reading a generated mesh.

use config::constants::PLANAR_Z_TOLERANCE;
use tracing::debug;

use super::Mesh;
use crate::cell::CellType;

impl Mesh {
    /// Drops all cells of `cell_type`. Returns how many were removed.
    pub fn remove_cells_of_type(&mut self, cell_type: CellType) -> usize {
        let removed = self.retain_blocks(|block| block.cell_type != cell_type);
        debug!(cell_type = %cell_type, removed, "removed cells");
        removed
    }

    /// Keeps only the cells of the highest dimension present. Returns how
    /// many cells were removed.
    pub fn remove_lower_dimensional_cells(&mut self) -> usize {
        let Some(max_dim) = self.max_dim() else {
            return 0;
        };
        let removed = self.retain_blocks(|block| block.cell_type.dim() == max_dim);
        debug!(max_dim, removed, "removed lower-dimensional cells");
        removed
    }

    /// Drops points no cell refers to and renumbers the connectivity.
    /// Returns how many points were removed.
    pub fn remove_orphaned_nodes(&mut self) -> usize {
        let mut used = vec![false; self.points.len()];
        for block in &self.cells {
            for &node in &block.connectivity {
                if let Some(flag) = used.get_mut(node) {
                    *flag = true;
                }
            }
        }

        let mut new_index = vec![usize::MAX; self.points.len()];
        let mut next = 0;
        for (old, _) in used.iter().enumerate().filter(|(_, u)| **u) {
            new_index[old] = next;
            next += 1;
        }
        let removed = self.points.len() - next;
        if removed == 0 {
            return 0;
        }

        self.points = compact(std::mem::take(&mut self.points), &used);
        for values in self.point_data.values_mut() {
            *values = compact(std::mem::take(values), &used);
        }
        for block in &mut self.cells {
            for node in &mut block.connectivity {
                if let Some(&index) = new_index.get(*node) {
                    *node = index;
                }
            }
        }

        debug!(removed, remaining = next, "removed orphaned nodes");
        removed
    }

    /// Sets z to exactly zero if every point lies in the plane `z = 0`
    /// within tolerance. Returns whether the mesh was planar.
    pub fn prune_z_0(&mut self) -> bool {
        let planar = self
            .points
            .iter()
            .all(|p| p.z.abs() < PLANAR_Z_TOLERANCE);
        if planar {
            for p in &mut self.points {
                p.z = 0.0;
            }
            debug!(points = self.points.len(), "pruned z coordinate");
        }
        planar
    }
}

fn compact<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, &k)| k.then_some(item))
        .collect()
}
