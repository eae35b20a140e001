//! Triangulation of polygon cells, and reinterpreting polylines as polygons.

use crate::float_types::Real;
use crate::plane::ClipPlane;
use crate::polydata::PolyData;
use crate::polydata::crossing::dedup_loop;
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use log::debug;
use nalgebra::{Point3, Vector3};

impl PolyData {
    /// A polygonal surface whose points are this dataset's points and whose
    /// polygons are this dataset's line cells, copied verbatim: each polyline
    /// becomes the boundary loop of one polygon. No points are created, moved or
    /// renumbered.
    pub fn lines_as_polygons(&self) -> PolyData {
        PolyData {
            points: self.points.clone(),
            polys: self.lines.clone(),
            point_normals: self.point_normals.clone(),
            scalars: self.scalars.clone(),
            ..Default::default()
        }
    }

    /// Replace every polygon by triangles over the same point array.
    ///
    /// Repeated consecutive indices (including a closing point equal to the
    /// first) are dropped first. Larger polygons are projected onto their own
    /// plane and ear-cut, so non-convex loops triangulate correctly; if
    /// ear-cutting does not cover the polygon a fan is used instead. Triangles
    /// keep the winding of their source polygon. Degenerate polygons (fewer than
    /// three distinct points, or zero area) are dropped. Points lying on a
    /// straight stretch of the boundary may end up in no triangle. Lines pass
    /// through.
    pub fn triangulate(&self) -> PolyData {
        let mut triangles = Vec::with_capacity(self.polys.len());
        let mut dropped = 0usize;

        for poly in &self.polys {
            let mut indices = poly.clone();
            dedup_loop(&mut indices);
            if indices.len() < 3 {
                dropped += 1;
                continue;
            }
            if indices.len() == 3 {
                triangles.push(indices);
                continue;
            }

            let normal =
                PolyData::newell_normal(indices.iter().map(|&i| self.points[i]));
            if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
                dropped += 1;
                continue;
            }

            let tris = self
                .earcut_loop(&indices, &normal)
                .unwrap_or_else(|| fan(&indices));
            for mut tri in tris {
                let a = self.points[tri[0]];
                let b = self.points[tri[1]];
                let c = self.points[tri[2]];
                if (b - a).cross(&(c - a)).dot(&normal) < 0.0 {
                    tri.swap(1, 2);
                }
                triangles.push(tri.to_vec());
            }
        }

        if dropped > 0 {
            debug!("triangulate: dropped {dropped} degenerate polygons");
        }

        PolyData {
            points: self.points.clone(),
            polys: triangles,
            lines: self.lines.clone(),
            point_normals: self.point_normals.clone(),
            scalars: self.scalars.clone(),
            ..Default::default()
        }
    }

    /// Ear-cut one polygon loop in its own plane. Returns `None` when the
    /// triangles do not cover the polygon's area, as happens for
    /// self-intersecting loops.
    fn earcut_loop(&self, indices: &[usize], normal: &Vector3<Real>) -> Option<Vec<[usize; 3]>> {
        let plane = ClipPlane::new(self.points[indices[0]], *normal).ok()?;
        let (to_xy, _) = plane.to_xy_transform();

        let coords: Vec<Coord<Real>> = indices
            .iter()
            .map(|&i| {
                let p: Point3<Real> = to_xy.transform_point(&self.points[i]);
                Coord { x: p.x, y: p.y }
            })
            .collect();
        let polygon = GeoPolygon::new(LineString::new(coords), vec![]);
        let triangulation = polygon.earcut_triangles_raw();

        // Indices past the loop can only be the ring's closing coordinate
        let n = indices.len();
        let tris: Vec<[usize; 3]> = triangulation
            .triangle_indices
            .chunks_exact(3)
            .map(|t| [indices[t[0] % n], indices[t[1] % n], indices[t[2] % n]])
            .filter(|t| t[0] != t[1] && t[1] != t[2] && t[0] != t[2])
            .collect();

        // Ear-cutting skips collinear points, so judge coverage by area, not count
        let area = normal.norm() / 2.0;
        let covered: Real = tris
            .iter()
            .map(|t| {
                let (a, b, c) = (self.points[t[0]], self.points[t[1]], self.points[t[2]]);
                (b - a).cross(&(c - a)).norm() / 2.0
            })
            .sum();
        (!tris.is_empty() && (covered - area).abs() <= area * 1e-6).then_some(tris)
    }
}

/// Fan triangulation around the loop's first point
fn fan(indices: &[usize]) -> Vec<[usize; 3]> {
    (1..indices.len() - 1)
        .map(|i| [indices[0], indices[i], indices[i + 1]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concave_loop_is_ear_cut() {
        // L-shape in the plane z = 1
        let points = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(2.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 2.0, 1.0),
            Point3::new(0.0, 2.0, 1.0),
        ];
        let data = PolyData::from_lines(points, vec![vec![0, 1, 2, 3, 4, 5, 0]]);
        let surface = data.lines_as_polygons().triangulate();
        assert_eq!(surface.num_points(), 6);
        assert_eq!(surface.num_polys(), 4);

        // total area of the L is 3
        let area: Real = surface
            .polys
            .iter()
            .map(|t| {
                let a = surface.points[t[0]];
                let b = surface.points[t[1]];
                let c = surface.points[t[2]];
                (b - a).cross(&(c - a)).norm() / 2.0
            })
            .sum();
        assert!((area - 3.0).abs() < 1e-9);

        // winding follows the loop (counter-clockwise seen from +z)
        for t in &surface.polys {
            let a = surface.points[t[0]];
            let b = surface.points[t[1]];
            let c = surface.points[t[2]];
            assert!((b - a).cross(&(c - a)).z > 0.0);
        }
    }

    #[test]
    fn lines_become_polygons_verbatim() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let data = PolyData::from_lines(points.clone(), vec![vec![0, 1, 2, 0]]);
        let surface = data.lines_as_polygons();
        assert_eq!(surface.points, points);
        assert_eq!(surface.polys, vec![vec![0, 1, 2, 0]]);
        assert!(surface.lines.is_empty());
    }

    #[test]
    fn degenerate_polygons_are_dropped() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        ];
        let data = PolyData::from_polygons(points, vec![vec![0, 1, 0], vec![0, 1, 2, 3]]);
        assert_eq!(data.triangulate().num_polys(), 0);
    }
}
