//! Iso-surface extraction from a sampled volume with Surface Nets

use crate::float_types::{Real, real_to_f32};
use crate::polydata::PolyData;
use crate::sample::ScalarVolume;
use crate::sample::grid::GridShape;
use fast_surface_nets::{SurfaceNetsBuffer, surface_nets};
use log::debug;
use nalgebra::{Point3, Vector3};

/// Options for [`ScalarVolume::contour`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContourConfig {
    /// Iso-values to extract, one surface per value
    pub values: Vec<Real>,
    /// Attach unit normals (from the sampled field) to the output points
    pub compute_normals: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        ContourConfig {
            values: vec![0.5],
            compute_normals: false,
        }
    }
}

impl ScalarVolume {
    /// Extract the surfaces where the sampled values equal each of
    /// `config.values`, as triangles in world coordinates.
    ///
    /// The output's scalars hold, for every point, the iso-value it was
    /// extracted at. A value outside the sampled range yields no geometry.
    ///
    /// Surface Nets places each vertex inside a grid cell and emits no faces
    /// for the outermost band of cells, so the surface stops short of the
    /// volume's bounds by up to about one cell.
    pub fn contour(&self, config: &ContourConfig) -> PolyData {
        let mut out = PolyData::new();
        let mut scalars = Vec::new();
        let mut normals = Vec::new();

        // Dimensions were validated when the volume was sampled
        let Ok(shape) = GridShape::new(self.dimensions) else {
            return out;
        };
        let max = [shape.nx - 1, shape.ny - 1, shape.nz - 1];

        for &iso in &config.values {
            let field: Vec<f32> = self
                .values
                .iter()
                .map(|&v| {
                    if v.is_finite() {
                        real_to_f32(v - iso)
                    } else {
                        1e10_f32
                    }
                })
                .collect();

            let mut buffer = SurfaceNetsBuffer::default();
            surface_nets(&field, &shape, [0, 0, 0], max, &mut buffer);

            let offset = out.points.len();
            out.points.extend(buffer.positions.iter().map(|p| {
                Point3::new(
                    self.origin.x + p[0] as Real * self.spacing.x,
                    self.origin.y + p[1] as Real * self.spacing.y,
                    self.origin.z + p[2] as Real * self.spacing.z,
                )
            }));
            out.polys.extend(buffer.indices.chunks_exact(3).map(|tri| {
                tri.iter().map(|&i| offset + i as usize).collect::<Vec<_>>()
            }));
            scalars.extend(std::iter::repeat_n(iso, buffer.positions.len()));

            if config.compute_normals {
                normals.extend(buffer.normals.iter().map(|n| {
                    let n = Vector3::new(n[0] as Real, n[1] as Real, n[2] as Real);
                    if n.norm_squared() > 0.0 && n.iter().all(|c| c.is_finite()) {
                        n.normalize()
                    } else {
                        Vector3::zeros()
                    }
                }));
            }

            debug!(
                "contour: iso {iso} -> {} points / {} triangles",
                buffer.positions.len(),
                buffer.indices.len() / 3
            );
        }

        out.scalars = Some(scalars);
        if config.compute_normals {
            out.point_normals = Some(normals);
        }
        out
    }
}
