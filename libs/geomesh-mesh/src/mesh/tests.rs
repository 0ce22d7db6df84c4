//! Tests for mesh accessors and clean-up helpers

use glam::DVec3;

use super::*;

/// Two triangles of a unit square, its four boundary lines, one vertex
/// cell and an unused point at index 4.
fn square_with_extras() -> Mesh {
    let points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(5.0, 5.0, 0.0),
    ];
    let cells = vec![
        CellBlock::new(CellType::Vertex, vec![0]),
        CellBlock::new(CellType::Line, vec![0, 1, 1, 2, 2, 3, 3, 0]),
        CellBlock::new(CellType::Triangle, vec![0, 1, 2]),
        CellBlock::new(CellType::Triangle, vec![0, 2, 3]),
    ];
    let mut mesh = Mesh::new(points, cells);
    mesh.cell_data.insert(
        PHYSICAL_TAG_KEY.to_string(),
        vec![vec![0], vec![2, 2, 2, 2], vec![1], vec![1]],
    );
    mesh.cell_data.insert(
        GEOMETRICAL_TAG_KEY.to_string(),
        vec![vec![1], vec![1, 2, 3, 4], vec![1], vec![2]],
    );
    mesh.point_data.insert(
        "u".to_string(),
        (0..5).map(|i| vec![f64::from(i)]).collect(),
    );
    mesh
}

#[test]
fn test_counts_and_bounds() {
    let mesh = square_with_extras();
    assert_eq!(mesh.num_points(), 5);
    assert_eq!(mesh.num_cells(), 7);
    assert_eq!(mesh.max_dim(), Some(2));
    let (lo, hi) = mesh.bounding_box().unwrap();
    assert_eq!(lo, DVec3::ZERO);
    assert_eq!(hi, DVec3::new(5.0, 5.0, 0.0));
    assert_eq!(Mesh::default().bounding_box(), None);
}

#[test]
fn test_cells_dict_concatenates_blocks() {
    let mesh = square_with_extras();
    let dict = mesh.cells_dict();
    assert_eq!(dict[&CellType::Triangle], vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(dict[&CellType::Line].len(), 8);

    let geometrical = mesh.cell_data_dict(GEOMETRICAL_TAG_KEY).unwrap();
    assert_eq!(geometrical[&CellType::Triangle], vec![1, 2]);
    assert!(mesh.cell_data_dict("missing").is_none());

    let triangles: Vec<&[usize]> = mesh.cells_of_type(CellType::Triangle).collect();
    assert_eq!(triangles, vec![&[0, 1, 2][..], &[0, 2, 3][..]]);
}

#[test]
fn test_remove_vertex_cells_keeps_data_aligned() {
    let mut mesh = square_with_extras();
    assert_eq!(mesh.remove_cells_of_type(CellType::Vertex), 1);
    assert_eq!(mesh.cells.len(), 3);
    assert_eq!(mesh.cell_data[PHYSICAL_TAG_KEY], vec![vec![2, 2, 2, 2], vec![1], vec![1]]);
    assert_eq!(mesh.remove_cells_of_type(CellType::Tetra), 0);
}

#[test]
fn test_remove_lower_dimensional_cells() {
    let mut mesh = square_with_extras();
    assert_eq!(mesh.remove_lower_dimensional_cells(), 5);
    assert!(mesh.cells.iter().all(|b| b.cell_type == CellType::Triangle));
    assert_eq!(mesh.cell_data[GEOMETRICAL_TAG_KEY], vec![vec![1], vec![2]]);
    assert_eq!(Mesh::default().remove_lower_dimensional_cells(), 0);
}

#[test]
fn test_remove_orphaned_nodes_renumbers() {
    let mut mesh = square_with_extras();
    mesh.points.swap(0, 4);
    for block in &mut mesh.cells {
        for node in &mut block.connectivity {
            if *node == 0 {
                *node = 4;
            }
        }
    }

    assert_eq!(mesh.remove_orphaned_nodes(), 1);
    assert_eq!(mesh.num_points(), 4);
    assert_eq!(mesh.points[0], DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(mesh.points[3], DVec3::ZERO);
    assert_eq!(mesh.cells[2].connectivity, vec![3, 0, 1]);
    assert_eq!(
        mesh.point_data["u"],
        vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]]
    );
    assert_eq!(mesh.remove_orphaned_nodes(), 0);
}

#[test]
fn test_prune_z_0() {
    let mut mesh = square_with_extras();
    mesh.points[1].z = 1e-14;
    assert!(mesh.prune_z_0());
    assert!(mesh.points.iter().all(|p| p.z == 0.0));

    mesh.points[2].z = 0.5;
    assert!(!mesh.prune_z_0());
    assert_eq!(mesh.points[2].z, 0.5);
}
