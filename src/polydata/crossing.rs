//! Crossing points where a sampled scalar field passes a threshold along mesh edges.
//!
//! The clipper and the cutter both go through [`edge_crossing`] and
//! [`PointBuilder`], so for the same input, values and threshold they produce
//! bit-identical coordinates for every point on the threshold boundary.

use crate::float_types::Real;
use crate::polydata::PolyData;
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

/// Which side of the threshold a value falls on. Values equal to the
/// threshold count as `Above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

impl Side {
    #[inline]
    pub fn of(value: Real, threshold: Real) -> Self {
        if value >= threshold {
            Side::Above
        } else {
            Side::Below
        }
    }
}

/// Identity of an output point.
///
/// Edges are canonical (smaller index first), so the crossing on a shared edge
/// is created once no matter which neighbouring polygon reaches it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKey {
    /// An input point carried over unchanged
    Input(usize),
    /// The crossing point on the input edge `(lo, hi)`, `lo < hi`
    Edge(usize, usize),
}

/// Locate the threshold crossing on the edge `a`–`b`, whose endpoints lie on
/// opposite sides. A crossing that falls exactly on an endpoint resolves to that
/// endpoint instead of a new point.
pub fn edge_crossing(a: usize, b: usize, values: &[Real], threshold: Real) -> PointKey {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let t = crossing_parameter(lo, hi, values, threshold);
    if t <= 0.0 {
        PointKey::Input(lo)
    } else if t >= 1.0 {
        PointKey::Input(hi)
    } else {
        PointKey::Edge(lo, hi)
    }
}

#[inline]
fn crossing_parameter(lo: usize, hi: usize, values: &[Real], threshold: Real) -> Real {
    let denom = values[hi] - values[lo];
    if denom == 0.0 {
        0.0
    } else {
        (threshold - values[lo]) / denom
    }
}

/// Accumulates the point array of one output dataset, creating each keyed point
/// (and its interpolated attributes) at most once per threshold level.
pub struct PointBuilder<'a> {
    input: &'a PolyData,
    values: &'a [Real],
    with_scalars: bool,
    index: HashMap<(usize, PointKey), usize>,
    points: Vec<Point3<Real>>,
    normals: Vec<Vector3<Real>>,
    scalars: Vec<Real>,
}

impl<'a> PointBuilder<'a> {
    /// `values` holds the field value of every input point.
    pub fn new(input: &'a PolyData, values: &'a [Real], with_scalars: bool) -> Self {
        PointBuilder {
            input,
            values,
            with_scalars,
            index: HashMap::new(),
            points: Vec::new(),
            normals: Vec::new(),
            scalars: Vec::new(),
        }
    }

    /// Index of the point identified by `key` at threshold `threshold`
    /// (`level` distinguishes thresholds), creating it on first use.
    pub fn insert(&mut self, key: PointKey, threshold: Real, level: usize) -> usize {
        if let Some(&idx) = self.index.get(&(level, key)) {
            return idx;
        }

        let input = self.input;
        let input_normals = input.point_normals.as_deref();
        let (pos, normal, value) = match key {
            PointKey::Input(i) => (
                input.points[i],
                input_normals.map(|n| n[i]),
                self.values[i],
            ),
            PointKey::Edge(lo, hi) => {
                let t = crossing_parameter(lo, hi, self.values, threshold);
                let p0 = input.points[lo];
                let p1 = input.points[hi];
                let normal = input_normals.map(|n| {
                    let lerped = n[lo] + (n[hi] - n[lo]) * t;
                    if lerped.norm_squared() > Real::EPSILON * Real::EPSILON {
                        lerped.normalize()
                    } else {
                        lerped
                    }
                });
                let value = self.values[lo] + (self.values[hi] - self.values[lo]) * t;
                (p0 + (p1 - p0) * t, normal, value)
            },
        };

        let idx = self.points.len();
        self.points.push(pos);
        if let Some(n) = normal {
            self.normals.push(n);
        }
        if self.with_scalars {
            self.scalars.push(value);
        }
        self.index.insert((level, key), idx);
        idx
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Assemble the output dataset from the built points and the given cells.
    pub fn finish(self, polys: Vec<Vec<usize>>, lines: Vec<Vec<usize>>) -> PolyData {
        let point_normals = self.input.point_normals.as_ref().map(|_| self.normals);
        let scalars = self.with_scalars.then_some(self.scalars);
        PolyData {
            points: self.points,
            polys,
            lines,
            point_normals,
            scalars,
            ..Default::default()
        }
    }
}

/// Remove consecutive repeated indices from a closed loop, including a repeat
/// across the wrap-around.
pub fn dedup_loop(indices: &mut Vec<usize>) {
    indices.dedup();
    while indices.len() > 1 && indices.first() == indices.last() {
        indices.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_is_symmetric_in_edge_direction() {
        let values = [-1.0, 3.0];
        assert_eq!(edge_crossing(0, 1, &values, 0.0), PointKey::Edge(0, 1));
        assert_eq!(edge_crossing(1, 0, &values, 0.0), PointKey::Edge(0, 1));
    }

    #[test]
    fn crossing_at_endpoint_reuses_the_endpoint() {
        let values = [0.0, -2.0];
        assert_eq!(edge_crossing(1, 0, &values, 0.0), PointKey::Input(0));
        let values = [-2.0, 0.0];
        assert_eq!(edge_crossing(0, 1, &values, 0.0), PointKey::Input(1));
    }

    #[test]
    fn builder_interpolates_once() {
        let input = PolyData::from_polygons(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0)],
            Vec::new(),
        );
        let values = [-1.0, 3.0];
        let mut builder = PointBuilder::new(&input, &values, true);
        let a = builder.insert(PointKey::Edge(0, 1), 0.0, 0);
        let b = builder.insert(PointKey::Edge(0, 1), 0.0, 0);
        assert_eq!(a, b);
        assert_eq!(builder.len(), 1);
        let out = builder.finish(Vec::new(), Vec::new());
        assert!((out.points[0].x - 1.0).abs() < 1e-12);
        assert!(out.scalars.unwrap()[0].abs() < 1e-12);
        assert!(out.point_normals.is_none());
    }

    #[test]
    fn dedup_loop_handles_wraparound() {
        let mut loop_indices = vec![3, 3, 4, 5, 3];
        dedup_loop(&mut loop_indices);
        assert_eq!(loop_indices, vec![3, 4, 5]);
    }
}
