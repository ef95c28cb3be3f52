//! PLY (Stanford polygon) format support.
//!
//! Faces are stored as polygon lists, so pentagons and squares survive a
//! save/load cycle. Scenes are written as ASCII with per-vertex RGBA colors,
//! which is how transparency reaches viewers such as MeshLab.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use super::group_offsets;
use crate::error::{InsphereError, Result};
use crate::polyhedron::Polyhedron;
use crate::render::SceneGroup;

/// Load a polyhedron from a PLY file.
///
/// # Example
///
/// ```no_run
/// use insphere::io::ply;
///
/// let poly = ply::load("icosahedron.ply").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Polyhedron> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| InsphereError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut reader = BufReader::new(file);
    read(&mut reader).map_err(|e| match e {
        InsphereError::LoadError { message, .. } => InsphereError::LoadError {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

/// Read a polyhedron from PLY data (ASCII or binary).
pub fn read<R: BufRead>(reader: &mut R) -> Result<Polyhedron> {
    let load_error = |message: String| InsphereError::LoadError {
        path: "<reader>".into(),
        message,
    };

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| load_error(e.to_string()))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| load_error("PLY file has no vertex element".to_string()))?;

    let mut vertices: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    for vertex in vertex_element {
        let coord = |name: &str| {
            get_float_property(vertex, name)
                .ok_or_else(|| load_error(format!("vertex missing {} coordinate", name)))
        };
        vertices.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    // A point cloud is still a valid vertex set; faces only matter for rendering.
    let mut faces: Vec<Vec<usize>> = Vec::new();
    if let Some(face_element) = ply.payload.get("face") {
        faces.reserve(face_element.len());
        for face in face_element {
            let indices = get_list_property(face, "vertex_indices")
                .or_else(|| get_list_property(face, "vertex_index"))
                .ok_or_else(|| load_error("face missing vertex_indices property".to_string()))?;
            faces.push(indices);
        }
    } else {
        debug!("PLY data has no face element");
    }

    if vertices.is_empty() {
        return Err(load_error("PLY file contains no vertices".to_string()));
    }

    Ok(Polyhedron::new(vertices, faces))
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

/// Write scene groups as ASCII PLY with per-vertex RGBA colors.
pub fn write<W: Write>(writer: &mut W, groups: &[SceneGroup]) -> Result<()> {
    let num_vertices: usize = groups.iter().map(|g| g.vertices.len()).sum();
    let num_faces: usize = groups.iter().map(|g| g.faces.len()).sum();

    // Header
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by insphere")?;
    for g in groups {
        writeln!(
            writer,
            "comment group {} vertices={} faces={}",
            g.name,
            g.vertices.len(),
            g.faces.len()
        )?;
    }
    writeln!(writer, "element vertex {}", num_vertices)?;
    writeln!(writer, "property double x")?;
    writeln!(writer, "property double y")?;
    writeln!(writer, "property double z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "property uchar alpha")?;
    writeln!(writer, "element face {}", num_faces)?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for g in groups {
        let [r, gr, b, a] = g.color;
        for v in &g.vertices {
            writeln!(writer, "{} {} {} {} {} {} {}", v.x, v.y, v.z, r, gr, b, a)?;
        }
    }

    for (g, offset) in groups.iter().zip(group_offsets(groups)) {
        for face in &g.faces {
            write!(writer, "{}", face.len())?;
            for &i in face {
                write!(writer, " {}", offset + i)?;
            }
            writeln!(writer)?;
        }
    }

    Ok(())
}

/// Save scene groups to a PLY file.
pub fn save<P: AsRef<Path>>(groups: &[SceneGroup], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, groups)?;
    writer.flush()?;
    Ok(())
}
