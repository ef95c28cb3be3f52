//! Wavefront OBJ format support.
//!
//! Loading keeps polygon faces as they are (no triangulation) and merges all
//! objects in the file into one polyhedron. Every `v` record is kept at full
//! `f64` precision, including points no face refers to. Saving writes one `o` object per
//! scene group, with the group color as the common `v x y z r g b`
//! vertex-color extension.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Read, Write};
use std::path::Path;

use nalgebra::Point3;

use super::group_offsets;
use crate::error::{InsphereError, Result};
use crate::polyhedron::Polyhedron;
use crate::render::SceneGroup;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load a polyhedron from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use insphere::io::obj;
///
/// let poly = obj::load("cube.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Polyhedron> {
    let path = path.as_ref();
    let load_error = |message: String| InsphereError::LoadError {
        path: path.to_path_buf(),
        message,
    };
    let text = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    from_text(&text).map_err(load_error)
}

/// Read a polyhedron from OBJ text. Material libraries are ignored.
///
/// Every `v` record becomes a vertex, in file order, whether or not a face
/// uses it.
pub fn read<R: BufRead>(reader: &mut R) -> Result<Polyhedron> {
    let load_error = |message: String| InsphereError::LoadError {
        path: "<reader>".into(),
        message,
    };
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| load_error(e.to_string()))?;
    from_text(&text).map_err(load_error)
}

fn from_text(text: &str) -> std::result::Result<Polyhedron, String> {
    let vertices = positions(text)?;
    if vertices.is_empty() {
        return Err("OBJ file contains no vertices".to_string());
    }

    let (models, _materials) = tobj::load_obj_buf(&mut text.as_bytes(), &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| e.to_string())?;

    let faces = faces(&models, &vertices)?;
    Ok(Polyhedron::new(vertices, faces))
}

/// All `v` records in file order.
fn positions(text: &str) -> std::result::Result<Vec<Point3<f64>>, String> {
    let mut vertices = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let mut words = line.split_whitespace();
        if words.next() != Some("v") {
            continue;
        }
        let mut coord = || -> std::result::Result<f64, String> {
            words
                .next()
                .ok_or_else(|| format!("line {}: vertex needs three coordinates", n + 1))?
                .parse::<f64>()
                .map_err(|e| format!("line {}: {}", n + 1, e))
        };
        vertices.push(Point3::new(coord()?, coord()?, coord()?));
    }
    Ok(vertices)
}

/// Faces of every model, indexing into the full vertex list.
///
/// tobj renumbers positions per model and drops the ones no face uses, so
/// each exported position is matched back to its `v` record by value.
/// Duplicate positions resolve to the first record.
fn faces(
    models: &[tobj::Model],
    vertices: &[Point3<f64>],
) -> std::result::Result<Vec<Vec<usize>>, String> {
    let key = |x: f64, y: f64, z: f64| [x.to_bits(), y.to_bits(), z.to_bits()];
    let mut lookup: HashMap<[u64; 3], usize> = HashMap::with_capacity(vertices.len());
    for (i, v) in vertices.iter().enumerate() {
        lookup.entry(key(v.x, v.y, v.z)).or_insert(i);
    }

    let mut faces: Vec<Vec<usize>> = Vec::new();
    for model in models {
        let mesh = &model.mesh;
        let remap = mesh
            .positions
            .chunks_exact(3)
            .map(|p| {
                lookup
                    .get(&key(p[0], p[1], p[2]))
                    .copied()
                    .ok_or_else(|| format!("model '{}' uses an unknown vertex", model.name))
            })
            .collect::<std::result::Result<Vec<usize>, String>>()?;

        let indices = mesh
            .indices
            .iter()
            .map(|&i| {
                remap.get(i as usize).copied().ok_or_else(|| {
                    format!("model '{}' has face index {} out of range", model.name, i)
                })
            })
            .collect::<std::result::Result<Vec<usize>, String>>()?;

        if mesh.face_arities.is_empty() {
            // All faces are triangles.
            faces.extend(indices.chunks_exact(3).map(|f| f.to_vec()));
        } else {
            let mut start = 0;
            for &arity in &mesh.face_arities {
                let end = start + arity as usize;
                if end > indices.len() {
                    return Err(format!("model '{}' has truncated face data", model.name));
                }
                faces.push(indices[start..end].to_vec());
                start = end;
            }
        }
    }

    Ok(faces)
}

/// Write scene groups as OBJ text.
pub fn write<W: Write>(writer: &mut W, groups: &[SceneGroup]) -> Result<()> {
    writeln!(writer, "# Generated by insphere")?;

    for (group, offset) in groups.iter().zip(group_offsets(groups)) {
        let [r, g, b, a] = group.color.map(|c| c as f64 / 255.0);
        writeln!(writer, "o {}", group.name)?;
        writeln!(writer, "# opacity {}", a)?;
        for v in &group.vertices {
            writeln!(writer, "v {} {} {} {} {} {}", v.x, v.y, v.z, r, g, b)?;
        }
        for face in &group.faces {
            write!(writer, "f")?;
            for &i in face {
                // OBJ indices are 1-based.
                write!(writer, " {}", offset + i + 1)?;
            }
            writeln!(writer)?;
        }
    }

    Ok(())
}

/// Save scene groups to an OBJ file.
pub fn save<P: AsRef<Path>>(groups: &[SceneGroup], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, groups)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid::SolidKind;
    use std::io::Cursor;

    fn group_of(poly: &Polyhedron, name: &'static str) -> SceneGroup {
        SceneGroup {
            name,
            color: [255, 0, 0, 128],
            vertices: poly.vertices().to_vec(),
            faces: poly.faces().to_vec(),
        }
    }

    #[test]
    fn test_read_polygons() {
        let text = "\
v 1 1 1
v 1 1 -1
v 1 -1 1
v 1 -1 -1
v -1 1 1
v -1 1 -1
v -1 -1 1
v -1 -1 -1
f 1 3 4 2
f 5 6 8 7
f 1 2 6 5
f 3 7 8 4
f 1 5 7 3
f 2 4 8 6
";
        let poly = read(&mut Cursor::new(text)).unwrap();
        assert_eq!(poly.num_vertices(), 8);
        assert_eq!(poly.num_faces(), 6);
        assert_eq!(poly.faces()[0], vec![0, 2, 3, 1]);
        assert!(poly.faces().iter().all(|f| f.len() == 4));
    }

    #[test]
    fn test_read_vertices_only() {
        let text = "\
v 1 0 0
v -1 0 0
v 0 1 0
v 0 -1 0
v 0 0 1
v 0 0 -1
";
        let poly = read(&mut Cursor::new(text)).unwrap();
        assert_eq!(poly.num_vertices(), 6);
        assert_eq!(poly.num_faces(), 0);
        assert_eq!(poly.solid_kind().unwrap(), SolidKind::Octahedron);
    }

    #[test]
    fn test_read_keeps_vertices_no_face_uses() {
        let text = "\
v 1 0 0
v -1 0 0
v 0 1 0
v 0 -1 0
v 0 0 1
v 0 0 -1
f 1 3 5
";
        let poly = read(&mut Cursor::new(text)).unwrap();
        assert_eq!(poly.num_vertices(), 6);
        assert_eq!(poly.vertices()[1], Point3::new(-1.0, 0.0, 0.0));
        assert_eq!(poly.faces(), &[vec![0, 2, 4]]);
    }

    #[test]
    fn test_read_full_precision() {
        let tetra = Polyhedron::platonic(SolidKind::Tetrahedron, 1.0);
        let mut out = Vec::new();
        write(&mut out, &[group_of(&tetra, "tetrahedron")]).unwrap();

        let poly = read(&mut Cursor::new(out)).unwrap();
        assert_eq!(poly.vertices(), tetra.vertices());
        assert_eq!(poly.faces(), tetra.faces());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = load("no/such/dir/solid.obj").unwrap_err();
        assert!(
            matches!(err, InsphereError::LoadError { ref path, .. } if path.ends_with("solid.obj")),
            "{:?}",
            err
        );
    }

    #[test]
    fn test_read_empty() {
        assert!(matches!(
            read(&mut Cursor::new("# nothing here\n")),
            Err(InsphereError::LoadError { .. })
        ));
    }

    #[test]
    fn test_write_offsets_groups() {
        let tetra = Polyhedron::platonic(SolidKind::Tetrahedron, 1.0);
        let groups = vec![group_of(&tetra, "first"), group_of(&tetra, "second")];

        let mut out = Vec::new();
        write(&mut out, &groups).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("o first"));
        assert!(text.contains("o second"));
        assert!(text.contains("# opacity"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 8);

        // Second group's faces index past the first group's vertices.
        let max_index = text
            .lines()
            .filter(|l| l.starts_with("f "))
            .flat_map(|l| l.split_whitespace().skip(1))
            .map(|i| i.parse::<usize>().unwrap())
            .max()
            .unwrap();
        assert_eq!(max_index, 8);
    }

    #[test]
    fn test_write_then_read_keeps_pentagons() {
        let dodeca = Polyhedron::platonic(SolidKind::Dodecahedron, 1.0);
        let mut out = Vec::new();
        write(&mut out, &[group_of(&dodeca, "dodecahedron")]).unwrap();

        let poly = read(&mut Cursor::new(out)).unwrap();
        assert_eq!(poly.num_vertices(), 20);
        assert_eq!(poly.faces(), dodeca.faces());
    }
}
