use crate::errors::PipelineError;
use crate::float_types::{Real, real_from_f32, real_to_f32};
use crate::polydata::PolyData;
use hashbrown::HashMap;
use log::{debug, warn};
use nalgebra::{Point3, Vector3};
use std::io::Cursor;
use std::path::Path;

/// Read a triangulated surface from binary or ASCII STL data.
///
/// Vertices with bit-identical coordinates are merged into one point, so
/// neighbouring triangles share their edges. Triangles that collapse after
/// merging (two corners at the same point) are dropped.
pub fn read_stl(stl_data: &[u8]) -> Result<PolyData, PipelineError> {
    let mut cursor = Cursor::new(stl_data);
    let stl_reader =
        stl_io::create_stl_reader(&mut cursor).map_err(|e| PipelineError::Stl(e.to_string()))?;

    let mut points = Vec::new();
    let mut polys = Vec::new();
    let mut merged: HashMap<[u32; 3], usize> = HashMap::new();
    let mut degenerate = 0usize;
    let mut facets = 0usize;

    for tri_result in stl_reader {
        let tri = tri_result.map_err(|e| PipelineError::Stl(e.to_string()))?;
        facets += 1;

        let indices: Vec<usize> = tri
            .vertices
            .iter()
            .map(|v| {
                // adding zero folds -0.0 into 0.0 so both merge
                let coords = [v[0] + 0.0, v[1] + 0.0, v[2] + 0.0];
                let key = coords.map(f32::to_bits);
                *merged.entry(key).or_insert_with(|| {
                    points.push(Point3::new(
                        real_from_f32(coords[0]),
                        real_from_f32(coords[1]),
                        real_from_f32(coords[2]),
                    ));
                    points.len() - 1
                })
            })
            .collect();

        if indices[0] == indices[1] || indices[1] == indices[2] || indices[0] == indices[2] {
            degenerate += 1;
            continue;
        }
        polys.push(indices);
    }

    if degenerate > 0 {
        warn!("stl: dropped {degenerate} degenerate triangles");
    }
    debug!(
        "stl: {facets} facets -> {} points / {} triangles",
        points.len(),
        polys.len()
    );

    Ok(PolyData::from_polygons(points, polys))
}

/// Read an STL file from disk. See [`read_stl`].
pub fn read_stl_file(path: impl AsRef<Path>) -> Result<PolyData, PipelineError> {
    let bytes = std::fs::read(path.as_ref())?;
    read_stl(&bytes)
}

/// Polygons of `mesh` as fan triangles with a unit facet normal each.
/// Degenerate triangles get a zero normal.
fn facets(mesh: &PolyData) -> Vec<(Vector3<Real>, [Point3<Real>; 3])> {
    let mut out = Vec::new();
    for poly in &mesh.polys {
        for i in 1..poly.len().saturating_sub(1) {
            let tri = [
                mesh.points[poly[0]],
                mesh.points[poly[i]],
                mesh.points[poly[i + 1]],
            ];
            let n = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
            let n = n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros);
            out.push((n, tri));
        }
    }
    out
}

/// Export to ASCII STL
/// Convert the polygons of `mesh` to an **ASCII STL** string with the given `name`.
/// Polygons with more than three points are split into fans.
///
/// ```rust
/// # use planeclip::polydata::PolyData;
/// # use nalgebra::Point3;
/// let mesh = PolyData::cube(Point3::origin(), 1.0);
/// let text = planeclip::io::to_stl_ascii(&mesh, "my_solid");
/// assert!(text.starts_with("solid my_solid"));
/// ```
pub fn to_stl_ascii(mesh: &PolyData, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    for (n, tri) in facets(mesh) {
        out.push_str(&format!(
            "  facet normal {:.6} {:.6} {:.6}\n",
            n.x, n.y, n.z
        ));
        out.push_str("    outer loop\n");
        for p in &tri {
            out.push_str(&format!(
                "      vertex {:.6} {:.6} {:.6}\n",
                p.x, p.y, p.z
            ));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// The resulting `Vec<u8>` can then be written to a file or handled in memory.
pub fn to_stl_binary(mesh: &PolyData) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let triangles: Vec<Triangle> = facets(mesh)
        .into_iter()
        .map(|(n, tri)| Triangle {
            normal: Normal::new([real_to_f32(n.x), real_to_f32(n.y), real_to_f32(n.z)]),
            vertices: tri
                .map(|p| Vertex::new([real_to_f32(p.x), real_to_f32(p.y), real_to_f32(p.z)])),
        })
        .collect();

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Write the polygons of `mesh` to `path` as binary STL.
pub fn write_stl_binary(mesh: &PolyData, path: impl AsRef<Path>) -> Result<(), PipelineError> {
    let bytes = to_stl_binary(mesh)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

impl PolyData {
    /// See [`read_stl`]
    pub fn from_stl(stl_data: &[u8]) -> Result<PolyData, PipelineError> {
        read_stl(stl_data)
    }

    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }
}
