//! Small closed surfaces, wound outward, for tests and demos.

use crate::float_types::{PI, Real, TAU};
use crate::polydata::PolyData;
use nalgebra::Point3;

impl PolyData {
    /// Axis-aligned box of edge lengths `size`, centered on `center`, as 12
    /// outward-facing triangles over 8 shared points.
    ///
    /// Point `i` sits at the corner selected by bits 0 (x), 1 (y) and 2 (z) of `i`.
    pub fn cuboid(center: Point3<Real>, size: [Real; 3]) -> PolyData {
        let half = [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0];
        let points = (0..8)
            .map(|i| {
                let pick = |bit: usize, axis: usize| {
                    if i & (1 << bit) != 0 {
                        half[axis]
                    } else {
                        -half[axis]
                    }
                };
                Point3::new(
                    center.x + pick(0, 0),
                    center.y + pick(1, 1),
                    center.z + pick(2, 2),
                )
            })
            .collect();

        // counter-clockwise seen from outside: -x, +x, -y, +y, -z, +z
        let faces = [
            [0, 4, 6, 2],
            [1, 3, 7, 5],
            [0, 1, 5, 4],
            [2, 6, 7, 3],
            [0, 2, 3, 1],
            [4, 5, 7, 6],
        ];
        let polys = faces
            .iter()
            .flat_map(|&[a, b, c, d]| [vec![a, b, c], vec![a, c, d]])
            .collect();

        PolyData::from_polygons(points, polys)
    }

    /// Cube of edge length `size` centered on `center`.
    pub fn cube(center: Point3<Real>, size: Real) -> PolyData {
        Self::cuboid(center, [size, size, size])
    }

    /// UV sphere around the origin with `segments` slices around the y axis and
    /// `stacks` bands from pole to pole. The poles are single shared points.
    /// Values below 3 segments or 2 stacks are raised to those minimums.
    pub fn sphere(radius: Real, segments: usize, stacks: usize) -> PolyData {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let mut points = vec![Point3::new(0.0, radius, 0.0)];
        for j in 1..stacks {
            let phi = j as Real / stacks as Real * PI;
            let (ring_radius, y) = (radius * phi.sin(), radius * phi.cos());
            for i in 0..segments {
                let theta = i as Real / segments as Real * TAU;
                points.push(Point3::new(
                    ring_radius * theta.cos(),
                    y,
                    ring_radius * theta.sin(),
                ));
            }
        }
        points.push(Point3::new(0.0, -radius, 0.0));

        let north = 0;
        let south = points.len() - 1;
        let ring = |j: usize, i: usize| 1 + (j - 1) * segments + i % segments;

        let mut polys = Vec::with_capacity(2 * segments * (stacks - 1));
        for i in 0..segments {
            polys.push(vec![north, ring(1, i + 1), ring(1, i)]);
        }
        for j in 1..stacks - 1 {
            for i in 0..segments {
                let (v1, v2) = (ring(j, i), ring(j, i + 1));
                let (v3, v4) = (ring(j + 1, i), ring(j + 1, i + 1));
                polys.push(vec![v1, v2, v3]);
                polys.push(vec![v2, v4, v3]);
            }
        }
        for i in 0..segments {
            polys.push(vec![ring(stacks - 1, i), ring(stacks - 1, i + 1), south]);
        }

        PolyData::from_polygons(points, polys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(mesh: &PolyData) {
        let center = mesh.bounding_box().center();
        for poly in 0..mesh.num_polys() {
            let normal = PolyData::newell_normal(mesh.polygon_points(poly));
            let first = mesh.points[mesh.polys[poly][0]];
            assert!(normal.dot(&(first - center)) > 0.0, "polygon {poly} faces inward");
        }
    }

    #[test]
    fn cube_is_closed_and_outward() {
        let cube = PolyData::cube(Point3::new(1.0, 2.0, 3.0), 2.0);
        assert_eq!(cube.num_points(), 8);
        assert_eq!(cube.num_polys(), 12);
        assert!(cube.validate().is_ok());
        assert_outward(&cube);
        let bb = cube.bounding_box();
        assert_eq!(bb.mins, Point3::new(0.0, 1.0, 2.0));
        assert_eq!(bb.maxs, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn sphere_is_outward() {
        let sphere = PolyData::sphere(1.0, 16, 8);
        assert_eq!(sphere.num_points(), 2 + 16 * 7);
        assert_eq!(sphere.num_polys(), 2 * 16 * 7);
        assert!(sphere.validate().is_ok());
        assert_outward(&sphere);
    }
}
