//! `PolyData`: points plus polygon and polyline connectivity, with optional
//! per-point and per-cell attributes.

use crate::errors::PipelineError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// Shared crossing-point bookkeeping for the clipper and the cutter
pub mod crossing;

/// Point and polygon normal estimation
pub mod normals;

/// Plane/implicit-function clipping into kept and clipped halves
pub mod clip;

/// Level-set extraction into line segments
pub mod cut;

/// Joining line segments into maximal polylines
pub mod strip;

/// Polygon triangulation and line-to-polygon reinterpretation
pub mod triangulate;

/// Simple closed test and demo surfaces
pub mod shapes;

/// A polygonal dataset: an ordered point array referenced by polygon and
/// polyline cells.
///
/// Attribute arrays are optional; when present they hold exactly one entry per
/// point (`point_normals`, `scalars`) or per polygon (`cell_normals`).
#[derive(Debug, Clone, Default)]
pub struct PolyData {
    /// Point coordinates
    pub points: Vec<Point3<Real>>,

    /// Polygon cells, each a loop of point indices
    pub polys: Vec<Vec<usize>>,

    /// Polyline cells, each an open (or explicitly closed) chain of point indices
    pub lines: Vec<Vec<usize>>,

    /// Per-point unit normals
    pub point_normals: Option<Vec<Vector3<Real>>>,

    /// Per-polygon unit normals
    pub cell_normals: Option<Vec<Vector3<Real>>>,

    /// Per-point scalar values (clip or cut function values)
    pub scalars: Option<Vec<Real>>,

    /// Lazily-computed axis-aligned bounding box of the points
    pub bounding_box: OnceLock<Aabb>,
}

impl PolyData {
    /// An empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from points and polygon cells.
    pub fn from_polygons(points: Vec<Point3<Real>>, polys: Vec<Vec<usize>>) -> Self {
        PolyData {
            points,
            polys,
            ..Default::default()
        }
    }

    /// Build a dataset from points and polyline cells.
    pub fn from_lines(points: Vec<Point3<Real>>, lines: Vec<Vec<usize>>) -> Self {
        PolyData {
            points,
            lines,
            ..Default::default()
        }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_polys(&self) -> usize {
        self.polys.len()
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// True when there are neither polygons nor lines
    pub fn is_empty(&self) -> bool {
        self.polys.is_empty() && self.lines.is_empty()
    }

    /// Axis aligned bounding box of the points (cached after first call).
    ///
    /// An empty dataset yields an inverted box (`mins > maxs`); use
    /// [`PolyData::bounds`] when emptiness must be reported.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for p in &self.points {
                mins.x = mins.x.min(p.x);
                mins.y = mins.y.min(p.y);
                mins.z = mins.z.min(p.z);
                maxs.x = maxs.x.max(p.x);
                maxs.y = maxs.y.max(p.y);
                maxs.z = maxs.z.max(p.z);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Bounding box, or an error naming this dataset when it has no points.
    pub fn bounds(&self, name: &str) -> Result<Aabb, PipelineError> {
        if self.points.is_empty() {
            return Err(PipelineError::EmptyBounds(name.to_string()));
        }
        Ok(self.bounding_box())
    }

    /// Check that every polygon and line references existing points, and that
    /// attribute arrays have one entry per point (normals and scalars) or per
    /// polygon (cell normals).
    pub fn validate(&self) -> Result<(), PipelineError> {
        let len = self.points.len();
        for (cell, indices) in self.polys.iter().chain(self.lines.iter()).enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                return Err(PipelineError::InvalidConnectivity { cell, index, len });
            }
        }

        let attributes = [
            ("point normals", self.point_normals.as_ref().map(Vec::len), len),
            ("scalars", self.scalars.as_ref().map(Vec::len), len),
            ("cell normals", self.cell_normals.as_ref().map(Vec::len), self.polys.len()),
        ];
        for (name, actual, expected) in attributes {
            match actual {
                Some(len) if len != expected => {
                    return Err(PipelineError::AttributeLength { name, len, expected });
                },
                _ => {},
            }
        }
        Ok(())
    }

    /// Return an iterator over paired indices each forming an edge of polygon `poly`
    pub fn polygon_edges(&self, poly: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let indices = &self.polys[poly];
        indices
            .iter()
            .zip(indices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }

    /// Points of polygon `poly`, in loop order
    pub fn polygon_points(&self, poly: usize) -> impl Iterator<Item = Point3<Real>> + Clone + '_ {
        self.polys[poly].iter().map(|&i| self.points[i])
    }

    /// Unnormalized polygon normal by Newell's method. Its length is twice the
    /// polygon's area, so it is zero for degenerate polygons.
    pub fn newell_normal(points: impl Iterator<Item = Point3<Real>> + Clone) -> Vector3<Real> {
        points
            .clone()
            .zip(points.cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (curr, next)| {
                acc + Vector3::new(
                    (curr.y - next.y) * (curr.z + next.z),
                    (curr.z - next.z) * (curr.x + next.x),
                    (curr.x - next.x) * (curr.y + next.y),
                )
            })
    }

    /// Copy of this dataset holding only the points referenced by some cell,
    /// renumbered in first-use order. Attributes follow their points.
    pub fn compacted(&self) -> PolyData {
        let mut remap = vec![usize::MAX; self.points.len()];
        let mut order = Vec::new();
        let mut renumber = |cells: &[Vec<usize>]| -> Vec<Vec<usize>> {
            cells
                .iter()
                .map(|cell| {
                    cell.iter()
                        .map(|&i| {
                            if remap[i] == usize::MAX {
                                remap[i] = order.len();
                                order.push(i);
                            }
                            remap[i]
                        })
                        .collect()
                })
                .collect()
        };
        let polys = renumber(&self.polys);
        let lines = renumber(&self.lines);

        PolyData {
            points: order.iter().map(|&i| self.points[i]).collect(),
            polys,
            lines,
            point_normals: self
                .point_normals
                .as_ref()
                .map(|n| order.iter().map(|&i| n[i]).collect()),
            cell_normals: self.cell_normals.clone(),
            scalars: self
                .scalars
                .as_ref()
                .map(|s| order.iter().map(|&i| s[i]).collect()),
            bounding_box: OnceLock::new(),
        }
    }
}
