//! STL (stereolithography) format support.
//!
//! STL only knows triangles, so polygon faces are fan-triangulated on save
//! and come back as triangles on load. Vertices shared between triangles
//! are merged when loading; the vertex set is what the insphere needs.

use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{InsphereError, Result};
use crate::polyhedron::Polyhedron;
use crate::render::SceneGroup;

/// Load a polyhedron from an STL file.
///
/// Automatically detects binary vs ASCII format.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Polyhedron> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| InsphereError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    read(&mut file).map_err(|e| match e {
        InsphereError::LoadError { message, .. } => InsphereError::LoadError {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

/// Read a polyhedron from STL data.
pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Polyhedron> {
    let stl = stl_io::read_stl(reader).map_err(|e| InsphereError::LoadError {
        path: "<reader>".into(),
        message: e.to_string(),
    })?;

    // STL stores vertices per-triangle, so we need to deduplicate
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();

    const EPSILON: f64 = 1e-10;

    fn find_or_add_vertex(vertices: &mut Vec<Point3<f64>>, p: Point3<f64>) -> usize {
        for (i, v) in vertices.iter().enumerate() {
            if (v - p).norm() < EPSILON {
                return i;
            }
        }
        let idx = vertices.len();
        vertices.push(p);
        idx
    }

    for tri in &stl.faces {
        let mut face = Vec::with_capacity(3);
        for &vi in &tri.vertices {
            let vtx = &stl.vertices[vi];
            let p = Point3::new(vtx[0] as f64, vtx[1] as f64, vtx[2] as f64);
            face.push(find_or_add_vertex(&mut vertices, p));
        }

        // Skip degenerate triangles
        if face[0] != face[1] && face[1] != face[2] && face[0] != face[2] {
            faces.push(face);
        }
    }

    if faces.is_empty() {
        return Err(InsphereError::LoadError {
            path: "<reader>".into(),
            message: "STL data contains no valid triangles".to_string(),
        });
    }

    Ok(Polyhedron::new(vertices, faces))
}

/// Write scene groups as binary STL. Colors are dropped.
pub fn write<W: Write>(writer: &mut W, groups: &[SceneGroup]) -> Result<()> {
    let to_vertex = |p: &Point3<f64>| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let mut triangles: Vec<stl_io::Triangle> = Vec::new();
    for group in groups {
        for face in &group.faces {
            for i in 1..face.len().saturating_sub(1) {
                let p0 = &group.vertices[face[0]];
                let p1 = &group.vertices[face[i]];
                let p2 = &group.vertices[face[i + 1]];

                // Compute normal
                let n = (p1 - p0)
                    .cross(&(p2 - p0))
                    .try_normalize(f64::EPSILON)
                    .unwrap_or_default();

                triangles.push(stl_io::Triangle {
                    normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                    vertices: [to_vertex(p0), to_vertex(p1), to_vertex(p2)],
                });
            }
        }
    }

    stl_io::write_stl(writer, triangles.iter())?;
    Ok(())
}

/// Save scene groups to a binary STL file.
pub fn save<P: AsRef<Path>>(groups: &[SceneGroup], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, groups).map_err(|e| InsphereError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    writer.flush()?;
    Ok(())
}
