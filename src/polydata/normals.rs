//! Normal estimation for polygonal datasets.

use crate::float_types::Real;
use crate::polydata::PolyData;
use hashbrown::HashMap;
use log::debug;
use nalgebra::Vector3;
use std::collections::VecDeque;

/// Options for [`PolyData::compute_normals`]. The defaults compute point normals
/// only and make polygon winding consistent first.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalsConfig {
    /// Attach one normal per point
    pub compute_point_normals: bool,
    /// Attach one normal per polygon
    pub compute_cell_normals: bool,
    /// Reorder polygon winding so neighbours agree across shared edges
    pub consistency: bool,
    /// Reverse all polygons and normals at the end
    pub flip_normals: bool,
}

impl Default for NormalsConfig {
    fn default() -> Self {
        NormalsConfig {
            compute_point_normals: true,
            compute_cell_normals: false,
            consistency: true,
            flip_normals: false,
        }
    }
}

impl PolyData {
    /// Return a copy of this dataset with normals attached.
    ///
    /// Polygon normals come from Newell's method, so they follow each polygon's
    /// winding. A point normal is the normalized sum of the unit normals of the
    /// polygons using that point. Points and their order are never changed;
    /// with `consistency` enabled the winding of some polygons may be reversed.
    pub fn compute_normals(&self, config: &NormalsConfig) -> PolyData {
        let mut out = PolyData {
            points: self.points.clone(),
            polys: self.polys.clone(),
            lines: self.lines.clone(),
            scalars: self.scalars.clone(),
            ..Default::default()
        };

        if config.consistency {
            let flipped = out.make_winding_consistent();
            debug!("normals: reversed winding of {flipped} polygons");
        }
        if config.flip_normals {
            for poly in &mut out.polys {
                poly.reverse();
            }
        }

        let face_normals: Vec<Vector3<Real>> = (0..out.polys.len())
            .map(|i| {
                let n = PolyData::newell_normal(out.polygon_points(i));
                if n.norm_squared() > Real::EPSILON * Real::EPSILON {
                    n.normalize()
                } else {
                    Vector3::zeros()
                }
            })
            .collect();

        if config.compute_point_normals {
            // Reset all point normals, then accumulate face normals at each point
            let mut point_normals = vec![Vector3::zeros(); out.points.len()];
            for (poly, face_normal) in out.polys.iter().zip(&face_normals) {
                for &idx in poly {
                    point_normals[idx] += face_normal;
                }
            }
            for normal in &mut point_normals {
                if normal.norm_squared() > Real::EPSILON * Real::EPSILON {
                    *normal = normal.normalize();
                }
            }
            out.point_normals = Some(point_normals);
        }

        if config.compute_cell_normals {
            out.cell_normals = Some(face_normals);
        }

        out
    }

    /// Reverse polygons until every manifold edge is traversed in opposite
    /// directions by its two polygons. Each connected patch keeps the winding of
    /// its lowest-numbered polygon. Returns how many polygons were reversed.
    fn make_winding_consistent(&mut self) -> usize {
        // undirected edge -> polygons using it
        let mut edge_polys: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for poly in 0..self.polys.len() {
            for (a, b) in self.polygon_edges(poly) {
                if a != b {
                    edge_polys.entry((a.min(b), a.max(b))).or_default().push(poly);
                }
            }
        }

        let mut visited = vec![false; self.polys.len()];
        let mut flipped = 0;
        let mut queue = VecDeque::new();

        for seed in 0..self.polys.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            queue.push_back(seed);

            while let Some(current) = queue.pop_front() {
                let edges: Vec<(usize, usize)> = self.polygon_edges(current).collect();
                for (a, b) in edges {
                    if a == b {
                        continue;
                    }
                    let Some(neighbours) = edge_polys.get(&(a.min(b), a.max(b))) else {
                        continue;
                    };
                    // Only manifold edges propagate orientation
                    if neighbours.len() != 2 {
                        continue;
                    }
                    for &other in neighbours {
                        if other == current || visited[other] {
                            continue;
                        }
                        // A consistent neighbour walks the shared edge b -> a
                        let same_direction =
                            self.polygon_edges(other).any(|(c, d)| c == a && d == b);
                        if same_direction {
                            self.polys[other].reverse();
                            flipped += 1;
                        }
                        visited[other] = true;
                        queue.push_back(other);
                    }
                }
            }
        }

        flipped
    }
}
