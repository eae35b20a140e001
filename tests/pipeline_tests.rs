mod support;

use nalgebra::{Point3, Vector3};
use planeclip::{
    Pipeline, PipelineConfig, PipelineError, PolyData, Scene, SceneConfig,
    scene::{Color, Representation},
};
use support::{contains_exact, run_default, surface_area, unit_cube};

#[test]
fn unit_cube_default_plane() {
    let out = run_default(&unit_cube());

    assert!(out.clip.kept.num_polys() > 0);
    assert!(out.clip.clipped_output().num_polys() > 0);
    assert!(out.cut.num_points() > 0);
    assert_eq!(out.cut.num_points(), out.intersection_surface.num_points());

    assert_eq!(out.stats.source_points, 8);
    assert_eq!(out.stats.intersection_points, 6);
    assert_eq!(out.stats.clipped_points, out.clip.kept.num_points());
    assert_eq!(out.stats.remaining_points, out.clip.clipped_output().num_points());
}

#[test]
fn cut_points_are_on_plane_and_on_both_halves() {
    let out = run_default(&PolyData::sphere(3.0, 40, 21));
    let clipped = out.clip.clipped_output();
    assert!(out.cut.num_points() > 0);
    for p in &out.cut.points {
        assert!(out.plane.distance(p).abs() < 1e-9);
        assert!(contains_exact(&out.clip.kept.points, p));
        assert!(contains_exact(&clipped.points, p));
    }
}

#[test]
fn every_source_point_survives_in_a_half() {
    let sphere = PolyData::sphere(2.0, 30, 17);
    let out = run_default(&sphere);
    let clipped = out.clip.clipped_output();

    for p in &sphere.points {
        assert!(contains_exact(&out.clip.kept.points, p) || contains_exact(&clipped.points, p));
    }
    // anything else is a crossing point on the plane
    for p in out.clip.kept.points.iter().chain(&clipped.points) {
        if !contains_exact(&sphere.points, p) {
            assert!(out.plane.distance(p).abs() < 1e-9);
        }
    }
}

#[test]
fn intersection_surface_reuses_stripped_points() {
    let out = run_default(&PolyData::sphere(1.0, 24, 13));
    assert_eq!(out.intersection_surface.points, out.stripped.points);
    assert_eq!(out.stripped.points, out.cut.points);
}

#[test]
fn sampled_volume_contains_kept_half() {
    let out = run_default(&PolyData::sphere(1.0, 24, 13));
    let bounds = out.plane_volume.bounds();
    let eps = 1e-9;
    for p in &out.clip.kept.points {
        for axis in 0..3 {
            assert!(p[axis] >= bounds.mins[axis] - eps);
            assert!(p[axis] <= bounds.maxs[axis] + eps);
        }
    }
    assert_eq!(out.stats.kept_bounds, out.clip.kept.bounding_box());
}

#[test]
fn rerunning_gives_identical_results() {
    let sphere = PolyData::sphere(1.0, 20, 11);
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let first = pipeline.run(&sphere).unwrap();
    let second = pipeline.run(&sphere).unwrap();

    assert_eq!(first.clip.kept.points, second.clip.kept.points);
    assert_eq!(first.clip.kept.polys, second.clip.kept.polys);
    assert_eq!(first.cut.points, second.cut.points);
    assert_eq!(first.stripped.lines, second.stripped.lines);
    assert_eq!(first.intersection_surface.polys, second.intersection_surface.polys);
    assert_eq!(first.plane_volume, second.plane_volume);
    assert_eq!(first.plane_surface.points, second.plane_surface.points);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn inconsistent_winding_is_repaired_first() {
    let mut cube = unit_cube();
    cube.polys[3].reverse();
    let out = run_default(&cube);
    let normals = out.oriented.point_normals.as_ref().unwrap();
    let center = Point3::origin();
    for (p, n) in out.oriented.points.iter().zip(normals) {
        assert!(n.dot(&(p - center)) > 0.0);
    }
}

#[test]
fn broken_connectivity_is_rejected() {
    let mut cube = unit_cube();
    cube.polys.push(vec![0, 1, 42]);
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    assert!(matches!(
        pipeline.run(&cube),
        Err(PipelineError::InvalidConnectivity { index: 42, .. })
    ));
}

#[test]
fn custom_plane_and_values() {
    let config = PipelineConfig {
        plane_origin: Point3::new(0.0, 0.0, 0.1),
        plane_normal: Vector3::new(0.0, 0.0, 3.0),
        ..Default::default()
    };
    let pipeline = Pipeline::new(config).unwrap();
    let out = pipeline.run(&unit_cube()).unwrap();
    for p in &out.clip.kept.points {
        assert!(p.z >= 0.1 - 1e-12);
    }
    // the kept half is only 0.4 thick, so the 0.5 contour finds nothing
    assert_eq!(out.plane_surface.num_points(), 0);
}

#[test]
fn scene_shows_every_stage() {
    let out = run_default(&unit_cube());
    let scene = Scene::from_output(&out, &SceneConfig::default());

    let surface = scene.actor("surface").unwrap();
    assert_eq!(surface.color, Some(Color::RED));
    assert!(!surface.scalar_visibility);
    assert_eq!(surface.geometry.num_points(), out.clip.kept.num_points());

    let intersection = scene.actor("intersection").unwrap();
    assert_eq!(intersection.color, Some(Color::WHITE));
    assert_eq!(intersection.geometry.points, out.intersection_surface.points);

    let wireframe = scene.actor("wireframe").unwrap();
    assert_eq!(wireframe.representation, Representation::Wireframe);

    let plane = scene.actor("cutting plane").unwrap();
    assert_eq!(plane.edge_color, Some(Color::GREEN));

    assert_eq!(scene.legend.font_size, 20);
    assert_eq!(scene.legend.font_family, "Arial");
    assert_eq!(scene.legend.color, Color::YELLOW);
    assert!(scene.legend.text.starts_with("Red: Surface"));
}

#[test]
fn large_section_survives_the_pipeline() {
    let config = PipelineConfig {
        plane_normal: Vector3::y(),
        ..Default::default()
    };
    let pipeline = Pipeline::new(config).unwrap();
    let out = pipeline.run(&PolyData::sphere(1.0, 2500, 5)).unwrap();

    assert_eq!(out.cut.num_lines(), 5000);
    assert_eq!(out.stripped.num_lines(), 1);
    let radius = (0.4 * planeclip::float_types::PI).sin();
    let disk = planeclip::float_types::PI * radius * radius;
    let area = surface_area(&out.intersection_surface);
    assert!((area - disk).abs() < 1e-4 * disk, "area {area}, expected {disk}");
}
