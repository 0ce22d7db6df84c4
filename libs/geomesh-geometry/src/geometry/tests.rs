//! Unit tests for the geometry builder

use std::f64::consts::PI;

use super::*;
use crate::entity::Field;

fn unit_square(geom: &mut BuiltInGeometry) -> CurveLoop {
    let p = [
        geom.add_point([0.0, 0.0, 0.0], Some(0.1)).unwrap(),
        geom.add_point([1.0, 0.0, 0.0], Some(0.1)).unwrap(),
        geom.add_point([1.0, 1.0, 0.0], Some(0.1)).unwrap(),
        geom.add_point([0.0, 1.0, 0.0], Some(0.1)).unwrap(),
    ];
    let lines: Vec<Curve> = (0..4)
        .map(|i| geom.add_line(&p[i], &p[(i + 1) % 4]).unwrap())
        .collect();
    geom.add_curve_loop(&lines).unwrap()
}

// =============================================================================
// ELEMENTARY ENTITIES
// =============================================================================

#[test]
fn test_point_statements() {
    let mut geom = BuiltInGeometry::new();
    let p = geom.add_point([1.0, 2.0, 3.0], Some(0.5)).unwrap();
    let q = geom.add_point([0.0, 0.0, 0.0], None).unwrap();

    assert_eq!(p.id(), "p0");
    assert_eq!(q.id(), "p1");
    let code = geom.code();
    assert!(code.contains("p0 = newp;\nPoint(p0) = {1.0, 2.0, 3.0, 0.5};"));
    assert!(code.contains("Point(p1) = {0.0, 0.0, 0.0};"));
}

#[test]
fn test_point_rejects_bad_input() {
    let mut geom = BuiltInGeometry::new();
    assert!(matches!(
        geom.add_point([f64::NAN, 0.0, 0.0], None),
        Err(GeometryError::NonFinite { .. })
    ));
    assert!(matches!(
        geom.add_point([0.0, 0.0, 0.0], Some(0.0)),
        Err(GeometryError::InvalidMeshSize { .. })
    ));
    assert_eq!(geom.statement_count(), 0);
}

#[test]
fn test_line_rejects_zero_length() {
    let mut geom = BuiltInGeometry::new();
    let a = geom.add_point([0.5, 0.5, 0.0], None).unwrap();
    let b = geom.add_point([0.5, 0.5, 0.0], None).unwrap();
    let before = geom.statement_count();
    assert!(matches!(
        geom.add_line(&a, &b),
        Err(GeometryError::DegenerateLength { .. })
    ));
    assert_eq!(geom.statement_count(), before);
}

#[test]
fn test_circle_arc_must_be_below_half_turn() {
    let mut geom = BuiltInGeometry::new();
    let c = geom.add_point([0.0, 0.0, 0.0], None).unwrap();
    let a = geom.add_point([1.0, 0.0, 0.0], None).unwrap();
    let b = geom.add_point([0.0, 1.0, 0.0], None).unwrap();
    let d = geom.add_point([-1.0, 0.0, 0.0], None).unwrap();

    let arc = geom.add_circle_arc(&a, &c, &b).unwrap();
    assert_eq!(arc.id(), "ca0");
    assert!(geom.code().contains("Circle(ca0) = {p1, p0, p2};"));
    assert!(matches!(
        geom.add_circle_arc(&a, &c, &d),
        Err(GeometryError::InvalidAngle { .. })
    ));
}

#[test]
fn test_ellipse_arc() {
    let mut geom = BuiltInGeometry::new();
    let c = geom.add_point([0.0, 0.0, 0.0], None).unwrap();
    let start = geom.add_point([2.0, 0.0, 0.0], None).unwrap();
    let major = geom.add_point([1.0, 0.0, 0.0], None).unwrap();
    let end = geom.add_point([0.0, 1.0, 0.0], None).unwrap();

    let arc = geom.add_ellipse_arc(&start, &c, &major, &end).unwrap();
    assert_eq!(arc.id(), "ea0");
    assert!(geom
        .code()
        .contains("ea0 = newl;\nEllipse(ea0) = {p1, p0, p2, p3};"));

    let before = geom.statement_count();
    assert!(matches!(
        geom.add_ellipse_arc(&start, &c, &c, &end),
        Err(GeometryError::DegenerateLength { .. })
    ));
    assert!(matches!(
        geom.add_ellipse_arc(&c, &c, &major, &end),
        Err(GeometryError::DegenerateLength { .. })
    ));
    assert_eq!(geom.statement_count(), before);
}

#[test]
fn test_curve_loop_with_reversed_curve() {
    let mut geom = BuiltInGeometry::new();
    let a = geom.add_point([0.0, 0.0, 0.0], None).unwrap();
    let b = geom.add_point([1.0, 0.0, 0.0], None).unwrap();
    let c = geom.add_point([0.0, 1.0, 0.0], None).unwrap();
    let ab = geom.add_line(&a, &b).unwrap();
    let bc = geom.add_line(&b, &c).unwrap();
    let ac = geom.add_line(&a, &c).unwrap();

    let lp = geom.add_curve_loop(&[ab, bc, ac.reversed()]).unwrap();
    assert_eq!(lp.curves().len(), 3);
    assert!(geom.code().contains("Curve Loop(ll0) = {l0, l1, -l2};"));
    assert!(matches!(
        geom.add_curve_loop(&[]),
        Err(GeometryError::OpenCurveLoop)
    ));
}

#[test]
fn test_spline_needs_two_points() {
    let mut geom = BuiltInGeometry::new();
    let a = geom.add_point([0.0, 0.0, 0.0], None).unwrap();
    let b = geom.add_point([1.0, 1.0, 0.0], None).unwrap();
    assert!(matches!(
        geom.add_spline(&[&a]),
        Err(GeometryError::TooFewPoints { min: 2, got: 1, .. })
    ));
    geom.add_bspline(&[&a, &b]).unwrap();
    assert!(geom.code().contains("BSpline(bs0) = {p0, p1};"));
}

#[test]
fn test_plane_surface_with_hole() {
    let mut geom = BuiltInGeometry::new();
    let outer = unit_square(&mut geom);
    let hole = geom
        .add_circle([0.5, 0.5, 0.0], 0.1, Some(0.05), None, &[], false)
        .unwrap();
    let surface = geom.add_plane_surface(&outer, &[&hole.curve_loop]).unwrap();

    assert_eq!(surface.id(), "s0");
    assert!(geom.code().contains("Plane Surface(s0) = {ll0, ll1};"));
}

#[test]
fn test_volume_from_surface_loop() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_surface(&lp).unwrap();
    let shell = geom.add_surface_loop(&[s]).unwrap();
    let vol = geom.add_volume(&shell, &[]).unwrap();

    assert_eq!(vol.id(), "vol0");
    let code = geom.code();
    assert!(code.contains("Surface(rs0) = {ll0};"));
    assert!(code.contains("Surface Loop(sl0) = {rs0};"));
    assert!(code.contains("Volume(vol0) = {sl0};"));
    assert!(geom.add_surface_loop(&[]).is_err());
}

// =============================================================================
// SCRIPT RENDERING
// =============================================================================

#[test]
fn test_code_layout() {
    let mut geom = OccGeometry::new();
    geom.set_mesh_size_min(0.05).unwrap();
    geom.set_mesh_size_max(0.1).unwrap();
    geom.set_mesh_size_max(0.05).unwrap();
    geom.add_comment("first\nsecond");
    geom.add_raw_code("Mesh.Algorithm = 6;");

    let code = geom.code();
    let lines: Vec<&str> = code.lines().collect();
    assert!(lines[0].starts_with("// Generated by geomesh-geometry"));
    assert_eq!(lines[1], "SetFactory(\"OpenCASCADE\");");
    assert_eq!(lines[2], "Mesh.CharacteristicLengthMin = 0.05;");
    assert_eq!(lines[3], "Mesh.CharacteristicLengthMax = 0.05;");
    assert_eq!(&lines[4..], ["// first", "// second", "Mesh.Algorithm = 6;"]);
    assert!(code.ends_with('\n'));
}

#[test]
fn test_builtin_has_no_factory_line() {
    let geom = BuiltInGeometry::default();
    assert!(!geom.code().contains("SetFactory"));
    assert_eq!(geom.kernel_name(), "built-in");
}

#[test]
fn test_string_option_is_quoted() {
    let mut geom = BuiltInGeometry::new();
    geom.set_string_option("General.DefaultFileName", "a\"b");
    assert!(geom
        .code()
        .contains("General.DefaultFileName = \"a\\\"b\";"));
}

// =============================================================================
// PHYSICAL GROUPS
// =============================================================================

#[test]
fn test_physical_groups_get_running_tags() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();

    let named = geom.add_physical([&s], Some("domain")).unwrap();
    let boundary = geom.add_physical(lp.curves().to_vec(), None).unwrap();

    assert_eq!(named.tag, 1);
    assert_eq!(named.dim, Dim::Surface);
    assert_eq!(boundary.tag, 2);
    assert_eq!(boundary.dim, Dim::Curve);
    let code = geom.code();
    assert!(code.contains("Physical Surface(\"domain\", 1) = {s0};"));
    assert!(code.contains("Physical Curve(2) = {l0, l1, l2, l3};"));
}

#[test]
fn test_physical_rejects_mixed_dimensions() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();
    let mixed = vec![Entity::from(&s), Entity::from(&lp.curves()[0])];
    assert!(matches!(
        geom.add_physical(mixed, None),
        Err(GeometryError::MixedDimensions { .. })
    ));
    assert!(matches!(
        geom.add_physical(Vec::<Entity>::new(), None),
        Err(GeometryError::EmptyOperands { .. })
    ));
}

// =============================================================================
// SHAPES
// =============================================================================

#[test]
fn test_circle_default_sections() {
    let mut geom = BuiltInGeometry::new();
    let circle = geom
        .add_circle([0.0, 0.0, 0.0], 0.1, Some(0.05), None, &[], true)
        .unwrap();

    assert_eq!(circle.points.len(), 3);
    assert_eq!(circle.arcs.len(), 3);
    assert!(circle.surface.is_some());
    for p in &circle.points {
        approx::assert_relative_eq!(p.coords().length(), 0.1, epsilon = 1e-12);
    }
    assert!(geom.code().contains("Curve Loop(ll0) = {ca0, ca1, ca2};"));
}

#[test]
fn test_circle_validation() {
    let mut geom = BuiltInGeometry::new();
    assert!(matches!(
        geom.add_circle([0.0; 3], 0.0, None, None, &[], false),
        Err(GeometryError::InvalidRadius { .. })
    ));
    assert!(matches!(
        geom.add_circle([0.0; 3], 1.0, None, Some(2), &[], false),
        Err(GeometryError::InvalidSections { min: 3, got: 2 })
    ));
    assert_eq!(geom.statement_count(), 0);
}

#[test]
fn test_polygon_with_circular_hole() {
    let mut geom = BuiltInGeometry::new();
    let circle = geom
        .add_circle([0.0, 0.0, 0.0], 0.1, Some(0.05), None, &[], false)
        .unwrap();
    let poly = geom
        .add_polygon(
            &[
                [0.0, 0.5, 0.0],
                [-0.1, 0.1, 0.0],
                [-0.5, 0.0, 0.0],
                [-0.1, -0.1, 0.0],
                [0.0, -0.5, 0.0],
                [0.1, -0.1, 0.0],
                [0.5, 0.0, 0.0],
                [0.1, 0.1, 0.0],
            ],
            Some(0.05),
            &[&circle.curve_loop],
            true,
        )
        .unwrap();

    assert_eq!(poly.points.len(), 8);
    assert_eq!(poly.lines.len(), 8);
    let surface = poly.surface.as_ref().unwrap();
    let code = geom.code();
    assert!(code.contains(&format!(
        "Plane Surface({}) = {{{}, {}}};",
        surface.id(),
        poly.curve_loop.id(),
        circle.curve_loop.id()
    )));
}

#[test]
fn test_polygon_validation_emits_nothing() {
    let mut geom = BuiltInGeometry::new();
    assert!(matches!(
        geom.add_polygon(&[[0.0; 3], [1.0, 0.0, 0.0]], None, &[], true),
        Err(GeometryError::TooFewPoints { min: 3, got: 2, .. })
    ));
    assert!(geom
        .add_polygon(
            &[[0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0; 3]],
            None,
            &[],
            true
        )
        .is_err());
    assert_eq!(geom.statement_count(), 0);
}

#[test]
fn test_rectangle_is_a_polygon() {
    let mut geom = BuiltInGeometry::new();
    let rect = geom
        .add_rectangle(0.0, 2.0, 0.0, 1.0, 0.0, Some(0.1), &[], true)
        .unwrap();
    assert_eq!(rect.points.len(), 4);
    assert_eq!(rect.points[2].coords().to_array(), [2.0, 1.0, 0.0]);
    assert!(geom
        .add_rectangle(1.0, 1.0, 0.0, 1.0, 0.0, None, &[], true)
        .is_err());
}

// =============================================================================
// EXTRUSIONS
// =============================================================================

#[test]
fn test_extrude_with_one_layer() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();

    let ex = geom
        .extrude(&s, [0.0, 0.0, 1.0], Some(&Layers::uniform(1)))
        .unwrap();

    assert!(geom
        .code()
        .contains("ex0[] = Extrude{0.0, 0.0, 1.0}{Surface{s0}; Layers{1};};"));
    assert_eq!(ex.top.reference(), "ex0[0]");
    assert_eq!(ex.top.dim(), Dim::Surface);
    assert_eq!(ex.extruded.reference(), "ex0[1]");
    assert_eq!(ex.extruded.dim(), Dim::Volume);
    assert_eq!(ex.lateral.unwrap().reference(), "ex0[{2:#ex0[]-1}]");
}

#[test]
fn test_extrude_graded_recombined_layers() {
    let mut geom = BuiltInGeometry::new();
    let p = geom.add_point([0.0, 0.0, 0.0], None).unwrap();
    let layers = Layers::graded(vec![2, 3], vec![0.25, 1.0]).recombined();

    let ex = geom.extrude(&p, [1.0, 0.0, 0.0], Some(&layers)).unwrap();

    assert!(geom
        .code()
        .contains("Extrude{1.0, 0.0, 0.0}{Point{p0}; Layers{{2, 3}, {0.25, 1.0}}; Recombine;};"));
    assert_eq!(ex.extruded.dim(), Dim::Curve);
    assert!(ex.lateral.is_none());
}

#[test]
fn test_extrude_rejects_bad_layers_and_volumes() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();
    let before = geom.statement_count();

    for layers in [
        Layers::uniform(0),
        Layers::graded(vec![1, 1], vec![]),
        Layers::graded(vec![1, 1], vec![0.5]),
        Layers::graded(vec![1, 1], vec![0.6, 0.4]),
        Layers::graded(vec![1, 1], vec![0.5, 0.9]),
    ] {
        assert!(matches!(
            geom.extrude(&s, [0.0, 0.0, 1.0], Some(&layers)),
            Err(GeometryError::InvalidLayers { .. })
        ));
    }
    assert!(geom.extrude(&s, [0.0, 0.0, 0.0], None).is_err());

    let ex = geom.extrude(&s, [0.0, 0.0, 1.0], None).unwrap();
    let before_volume = geom.statement_count();
    assert!(matches!(
        geom.extrude(&ex.extruded, [0.0, 0.0, 1.0], None),
        Err(GeometryError::UnsupportedDimension { .. })
    ));
    assert_eq!(before_volume, before + 1);
}

#[test]
fn test_revolve_angle_depends_on_kernel() {
    let mut builtin = BuiltInGeometry::new();
    let lp = unit_square(&mut builtin);
    let s = builtin.add_plane_surface(&lp, &[]).unwrap();
    assert!(matches!(
        builtin.revolve(&s, [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], PI, None),
        Err(GeometryError::InvalidAngle { .. })
    ));
    builtin
        .revolve(&s, [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], PI / 2.0, None)
        .unwrap();
    assert!(builtin.code().contains(&format!(
        "ex0[] = Extrude{{{{0.0, 1.0, 0.0}}, {{-1.0, 0.0, 0.0}}, {:?}}}{{Surface{{s0}};}};",
        PI / 2.0
    )));

    let mut occ = OccGeometry::new();
    let disk = occ.add_disk([2.0, 0.0, 0.0], 0.5, None).unwrap();
    occ.revolve(&disk, [0.0, 1.0, 0.0], [0.0, 0.0, 0.0], 2.0 * PI, None)
        .unwrap();
}

#[test]
fn test_twist_head() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();
    geom.twist(
        &s,
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
        [0.5, 0.5, 0.0],
        0.5,
        Some(&Layers::uniform(4)),
    )
    .unwrap();
    assert!(geom.code().contains(
        "Extrude{{0.0, 0.0, 1.0}, {0.0, 0.0, 1.0}, {0.5, 0.5, 0.0}, 0.5}{Surface{s0}; Layers{4};};"
    ));
}

// =============================================================================
// TRANSFORMATIONS AND MESHING CONTROLS
// =============================================================================

#[test]
fn test_transformations() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();

    geom.translate(&s, [1.0, 0.0, 0.0]).unwrap();
    geom.rotate(&s, [0.0, 0.0, 1.0], [0.0, 0.0, 0.0], 0.5).unwrap();
    geom.dilate(&s, [0.0, 0.0, 0.0], 2.0).unwrap();
    geom.mirror(&s, [1.0, 0.0, 0.0, 0.0]).unwrap();

    let code = geom.code();
    assert!(code.contains("Translate {1.0, 0.0, 0.0} { Surface{s0}; }"));
    assert!(code.contains("Rotate {{0.0, 0.0, 1.0}, {0.0, 0.0, 0.0}, 0.5} { Surface{s0}; }"));
    assert!(code.contains("Dilate {{0.0, 0.0, 0.0}, 2.0} { Surface{s0}; }"));
    assert!(code.contains("Symmetry {1.0, 0.0, 0.0, 0.0} { Surface{s0}; }"));

    assert!(geom.rotate(&s, [0.0; 3], [0.0; 3], 1.0).is_err());
    assert!(geom.dilate(&s, [0.0; 3], 0.0).is_err());
    assert!(geom.mirror(&s, [0.0, 0.0, 0.0, 1.0]).is_err());
}

#[test]
fn test_embedding() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();
    let inner = geom.add_point([0.5, 0.5, 0.0], Some(0.01)).unwrap();

    geom.in_surface(&inner, &s).unwrap();
    assert!(geom.code().contains("Point{p4} In Surface{s0};"));
    assert!(matches!(
        geom.in_surface(&s, &s),
        Err(GeometryError::UnsupportedDimension { .. })
    ));
}

#[test]
fn test_embedding_drops_orientation() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();
    let a = geom.add_point([0.25, 0.5, 0.0], None).unwrap();
    let b = geom.add_point([0.75, 0.5, 0.0], None).unwrap();
    let crack = geom.add_line(&a, &b).unwrap();

    geom.in_surface(crack.reversed(), &s).unwrap();
    let code = geom.code();
    assert!(code.contains("Curve{l4} In Surface{s0};"));
    assert!(!code.contains("-l4"));
}

#[test]
fn test_embedding_in_volume() {
    let mut geom = OccGeometry::new();
    let cube = geom.add_box([0.0; 3], [1.0, 1.0, 1.0]).unwrap();
    let p = geom.add_point([0.5, 0.5, 0.5], Some(0.01)).unwrap();
    let disk = geom.add_disk([0.5, 0.5, 0.5], 0.25, None).unwrap();

    geom.in_volume(&p, &cube).unwrap();
    geom.in_volume(&disk, &cube).unwrap();
    let code = geom.code();
    assert!(code.contains("Point{p0} In Volume{box0};"));
    assert!(code.contains("Surface{d0} In Volume{box0};"));
    assert!(matches!(
        geom.in_volume(&cube, &cube),
        Err(GeometryError::UnsupportedDimension { .. })
    ));
}

#[test]
fn test_transfinite_and_recombine() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let s = geom.add_plane_surface(&lp, &[]).unwrap();
    for curve in lp.curves() {
        geom.set_transfinite_curve(curve, 11, 1.0).unwrap();
    }
    geom.set_transfinite_surface(&s);
    geom.set_recombined_surface(&s);

    let code = geom.code();
    assert!(code.contains("Transfinite Curve{l0} = 11 Using Progression 1.0;"));
    assert!(code.contains("Transfinite Surface{s0};"));
    assert!(code.contains("Recombine Surface{s0};"));
    assert!(geom.set_transfinite_curve(&lp.curves()[0], 1, 1.0).is_err());
    assert!(geom.set_transfinite_curve(&lp.curves()[0], 5, -1.0).is_err());
}

// =============================================================================
// FIELDS
// =============================================================================

#[test]
fn test_boundary_layer_and_background_field() {
    let mut geom = BuiltInGeometry::new();
    let lp = unit_square(&mut geom);
    let layer = BoundaryLayer::new(0.01, 0.1, 0.05, 0.2)
        .with_curves(&lp.curves()[..2])
        .with_sampling(100);

    let threshold = geom.add_boundary_layer(&layer).unwrap();
    assert_eq!(threshold, Field { id: 2 });
    let background = geom.set_background_field(&[threshold]).unwrap();
    assert_eq!(background.id(), 3);

    let code = geom.code();
    for expected in [
        "Field[1] = Distance;",
        "Field[1].CurvesList = {l0, l1};",
        "Field[1].Sampling = 100;",
        "Field[2] = Threshold;",
        "Field[2].InField = 1;",
        "Field[2].SizeMin = 0.01;",
        "Field[2].DistMax = 0.2;",
        "Field[3] = Min;",
        "Field[3].FieldsList = {2};",
        "Background Field = 3;",
    ] {
        assert!(code.contains(expected), "missing `{expected}`");
    }
}

#[test]
fn test_boundary_layer_validation() {
    let mut geom = BuiltInGeometry::new();
    assert!(geom
        .add_boundary_layer(&BoundaryLayer::new(0.01, 0.1, 0.0, 1.0))
        .is_err());
    let p = geom.add_point([0.0; 3], None).unwrap();
    for layer in [
        BoundaryLayer::new(0.2, 0.1, 0.0, 1.0),
        BoundaryLayer::new(0.01, 0.1, 1.0, 0.5),
        BoundaryLayer::new(0.01, 0.1, 0.0, 1.0).with_sampling(0),
    ] {
        assert!(matches!(
            geom.add_boundary_layer(&layer.with_points(&[p.clone()])),
            Err(GeometryError::InvalidField { .. })
        ));
    }
    assert!(geom.set_background_field(&[]).is_err());
}

// =============================================================================
// OPENCASCADE
// =============================================================================

#[test]
fn test_tall_disk_is_turned_upright() {
    let mut geom = OccGeometry::new();
    let wide = geom.add_disk([0.0, 0.0, 0.0], 1.0, Some(0.5)).unwrap();
    let tall = geom.add_disk([1.0, 2.0, 0.0], 0.5, Some(1.0)).unwrap();

    let code = geom.code();
    assert!(code.contains("Disk(d0) = {0.0, 0.0, 0.0, 1.0, 0.5};"));
    assert!(code.contains("Disk(d1) = {1.0, 2.0, 0.0, 1.0, 0.5};"));
    let turns: Vec<&str> = code.lines().filter(|l| l.starts_with("Rotate")).collect();
    assert_eq!(
        turns,
        vec!["Rotate {{0.0, 0.0, 1.0}, {1.0, 2.0, 0.0}, 1.5707963267948966} { Surface{d1}; }"]
    );
    assert_eq!(wide.id(), "d0");
    assert_eq!(tall.id(), "d1");
}

#[test]
fn test_occ_primitives() {
    let mut geom = OccGeometry::new();
    let disk = geom.add_disk([0.0, 0.0, 0.0], 0.5, Some(1.0)).unwrap();
    let rect = geom
        .add_rectangle_occ([0.0, 0.0, 0.0], 2.0, 1.0, Some(0.1))
        .unwrap();
    let cube = geom.add_box([0.0; 3], [1.0, 2.0, 3.0]).unwrap();
    let ball = geom.add_ball([0.0; 3], 1.0).unwrap();
    geom.add_cylinder([0.0; 3], [0.0, 0.0, 2.0], 0.5).unwrap();
    geom.add_cone([0.0; 3], [0.0, 0.0, 1.0], 1.0, 0.0).unwrap();
    geom.add_torus([0.0; 3], 1.0, 0.25).unwrap();

    assert_eq!(disk.id(), "d0");
    assert_eq!(rect.id(), "rect0");
    assert_eq!(cube.id(), "box0");
    assert_eq!(ball.id(), "ball0");
    let code = geom.code();
    for expected in [
        "Disk(d0) = {0.0, 0.0, 0.0, 1.0, 0.5};",
        "Rectangle(rect0) = {0.0, 0.0, 0.0, 2.0, 1.0, 0.1};",
        "box0 = newv;",
        "Box(box0) = {0.0, 0.0, 0.0, 1.0, 2.0, 3.0};",
        "Sphere(ball0) = {0.0, 0.0, 0.0, 1.0};",
        "Cylinder(cyl0) = {0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.5};",
        "Cone(cone0) = {0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0};",
        "Torus(torus0) = {0.0, 0.0, 0.0, 1.0, 0.25};",
    ] {
        assert!(code.contains(expected), "missing `{expected}`");
    }
}

#[test]
fn test_occ_primitive_validation() {
    let mut geom = OccGeometry::new();
    assert!(geom.add_disk([0.0; 3], -1.0, None).is_err());
    assert!(geom.add_rectangle_occ([0.0; 3], 1.0, 1.0, Some(0.6)).is_err());
    assert!(geom.add_box([0.0; 3], [1.0, 0.0, 1.0]).is_err());
    assert!(geom.add_cylinder([0.0; 3], [0.0; 3], 1.0).is_err());
    assert!(geom.add_cone([0.0; 3], [0.0, 0.0, 1.0], 0.0, 0.0).is_err());
    assert!(geom.add_torus([0.0; 3], 1.0, 1.0).is_err());
    assert_eq!(geom.statement_count(), 0);
}

#[test]
fn test_boolean_difference() {
    let mut geom = OccGeometry::new();
    let poly = geom
        .add_polygon(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            &[],
            true,
        )
        .unwrap();
    let disk = geom.add_disk([0.0, 0.0, 0.0], 0.5, None).unwrap();
    let surface = poly.surface.unwrap();

    let diff = geom
        .boolean_difference([&surface], [&disk], true, true)
        .unwrap();

    assert_eq!(diff.reference(), "bo0[]");
    assert_eq!(diff.dim(), Dim::Surface);
    assert!(geom.code().contains(
        "bo0[] = BooleanDifference{ Surface{s0}; Delete; }{ Surface{d0}; Delete; };"
    ));
}

#[test]
fn test_boolean_union_splits_first_and_rest() {
    let mut geom = OccGeometry::new();
    let a = geom.add_box([0.0; 3], [1.0, 1.0, 1.0]).unwrap();
    let b = geom.add_box([0.5; 3], [1.0, 1.0, 1.0]).unwrap();
    let c = geom.add_ball([1.5; 3], 0.5).unwrap();

    let union = geom.boolean_union([&a, &b, &c], true, false).unwrap();
    geom.boolean_intersection([&a, &b], false, false).unwrap();
    geom.boolean_fragments([&a, &b], false, false).unwrap();

    assert_eq!(union.dim(), Dim::Volume);
    let code = geom.code();
    assert!(code.contains("bo0[] = BooleanUnion{ Volume{box0}; Delete; }{ Volume{box1, ball0}; };"));
    assert!(code.contains("bo1[] = BooleanIntersection{ Volume{box0}; }{ Volume{box1}; };"));
    assert!(code.contains("bo2[] = BooleanFragments{ Volume{box0}; }{ Volume{box1}; };"));
}

#[test]
fn test_boolean_operand_checks() {
    let mut geom = OccGeometry::new();
    let cube = geom.add_box([0.0; 3], [1.0, 1.0, 1.0]).unwrap();
    let disk = geom.add_disk([0.0; 3], 0.5, None).unwrap();
    let p = geom.add_point([0.0; 3], None).unwrap();
    let q = geom.add_point([1.0, 0.0, 0.0], None).unwrap();

    assert!(matches!(
        geom.boolean_union(Vec::<Entity>::new(), true, true),
        Err(GeometryError::EmptyOperands { .. })
    ));
    assert!(matches!(
        geom.boolean_union([&cube], true, true),
        Err(GeometryError::EmptyOperands { .. })
    ));
    assert!(matches!(
        geom.boolean_difference([Entity::from(&cube)], [Entity::from(&disk)], true, true),
        Err(GeometryError::MixedDimensions { .. })
    ));
    assert!(matches!(
        geom.boolean_union([&p, &q], true, true),
        Err(GeometryError::UnsupportedDimension { .. })
    ));
}

#[test]
fn test_boolean_result_feeds_physical_group() {
    let mut geom = OccGeometry::new();
    let cube = geom.add_box([0.0; 3], [1.0, 1.0, 1.0]).unwrap();
    let ball = geom.add_ball([1.0; 3], 0.5).unwrap();
    let diff = geom.boolean_difference([&cube], [&ball], true, true).unwrap();

    let group = geom.add_physical([diff], Some("body")).unwrap();
    assert_eq!(group.dim, Dim::Volume);
    assert!(geom.code().contains("Physical Volume(\"body\", 1) = {bo0[]};"));
}
