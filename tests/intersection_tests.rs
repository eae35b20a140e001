mod support;

use nalgebra::{Point3, Vector3};
use planeclip::{
    ClipPlane, PolyData,
    float_types::Real,
    polydata::cut::CutConfig,
    polydata::strip::StripConfig,
};
use support::{diagonal_plane, surface_area, unit_cube};

fn section(mesh: &PolyData, plane: &ClipPlane) -> (PolyData, PolyData) {
    let stripped = mesh
        .cut(plane, &CutConfig::default())
        .unwrap()
        .strip(&StripConfig::default());
    let surface = stripped.lines_as_polygons().triangulate();
    (stripped, surface)
}

#[test]
fn cube_section_is_a_filled_rectangle() {
    let plane = diagonal_plane();
    let (stripped, surface) = section(&unit_cube(), &plane);

    assert_eq!(surface.points, stripped.points);
    assert!(surface.num_polys() >= 2);
    assert!(surface.polys.iter().all(|t| t.len() == 3));
    // 1 wide along x, sqrt(2) across the diagonal
    let expected = (2.0 as Real).sqrt();
    assert!((surface_area(&surface) - expected).abs() < 1e-9);
}

#[test]
fn sphere_section_is_nearly_a_disk() {
    let sphere = PolyData::sphere(1.0, 32, 15);
    let plane = ClipPlane::new(Point3::origin(), Vector3::y()).unwrap();
    let (stripped, surface) = section(&sphere, &plane);

    assert_eq!(surface.points, stripped.points);
    let area = surface_area(&surface);
    let disk = planeclip::float_types::PI;
    assert!(area < disk && area > 0.9 * disk, "area {area}");
}

#[test]
fn section_triangles_share_one_orientation() {
    let sphere = PolyData::sphere(1.0, 24, 11);
    let plane = ClipPlane::new(Point3::new(0.0, 0.1, 0.0), Vector3::new(0.2, 1.0, 0.1)).unwrap();
    let (_, surface) = section(&sphere, &plane);

    let normals: Vec<Vector3<Real>> = (0..surface.num_polys())
        .map(|i| PolyData::newell_normal(surface.polygon_points(i)))
        .filter(|n| n.norm() > 1e-12)
        .collect();
    assert!(!normals.is_empty());
    let sign = normals[0].dot(&plane.normal()).signum();
    for n in &normals {
        // every triangle lies in the plane, facing the same way
        assert!((n.normalize().dot(&plane.normal()) * sign - 1.0).abs() < 1e-6);
    }
}

#[test]
fn triangulation_creates_no_points() {
    let sphere = PolyData::sphere(1.0, 16, 9);
    let plane = ClipPlane::new(Point3::origin(), Vector3::x()).unwrap();
    let (stripped, surface) = section(&sphere, &plane);
    assert_eq!(surface.num_points(), stripped.num_points());
    assert!(surface.validate().is_ok());
}

#[test]
fn fine_sphere_section_fills_the_disk() {
    let sphere = PolyData::sphere(1.0, 2500, 5);
    let plane = ClipPlane::new(Point3::origin(), Vector3::y()).unwrap();
    let (stripped, surface) = section(&sphere, &plane);

    assert_eq!(stripped.num_lines(), 1);
    // the section runs halfway between the rings at 72 and 108 degrees
    let radius = (0.4 * planeclip::float_types::PI).sin();
    let disk = planeclip::float_types::PI * radius * radius;
    let area = surface_area(&surface);
    assert!((area - disk).abs() < 1e-4 * disk, "area {area}, expected {disk}");
}
