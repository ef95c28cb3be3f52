//! Polyhedron and scene file I/O.
//!
//! This module loads polyhedra from mesh files and saves rendered scenes
//! (polyhedron, insphere surface and center marker) for external viewers.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | Polygon faces, one object per scene group |
//! | PLY | `.ply` | ✓ | ✓ | Polygon faces, per-vertex RGBA colors |
//! | STL | `.stl` | ✓ | ✓ | Triangles only, no colors |
//!
//! # Usage
//!
//! ```no_run
//! use insphere::io;
//! use insphere::prelude::*;
//!
//! let poly = io::load("dodecahedron.obj").unwrap();
//! let sphere = compute_polyhedron(&poly, &InsphereOptions::default()).unwrap();
//! let scene = Scene::new(&poly, &sphere).unwrap();
//! io::save_scene(&scene, &RenderStyle::default(), "scene.ply").unwrap();
//! ```

pub mod obj;
pub mod ply;
pub mod stl;

use std::path::Path;

use log::info;

use crate::error::{InsphereError, Result};
use crate::polyhedron::Polyhedron;
use crate::render::{RenderStyle, Scene, SceneGroup};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// PLY (Stanford polygon) format.
    Ply,
    /// STL (stereolithography) format.
    Stl,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "ply" => Some(Format::Ply),
            "stl" => Some(Format::Stl),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    fn require<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        Format::from_path(path).ok_or_else(|| InsphereError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

/// Load a polyhedron from a file with automatic format detection.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Polyhedron> {
    let path = path.as_ref();
    let poly = match Format::require(path)? {
        Format::Obj => obj::load(path)?,
        Format::Ply => ply::load(path)?,
        Format::Stl => stl::load(path)?,
    };
    info!(
        "Loaded {}: {} vertices, {} faces",
        path.display(),
        poly.num_vertices(),
        poly.num_faces()
    );
    Ok(poly)
}

/// Save a polyhedron alone, with automatic format detection.
pub fn save_polyhedron<P: AsRef<Path>>(polyhedron: &Polyhedron, path: P) -> Result<()> {
    let path = path.as_ref();
    polyhedron.validate_faces()?;
    let group = SceneGroup {
        name: "polyhedron",
        color: RenderStyle::default().polyhedron_color,
        vertices: polyhedron.vertices().to_vec(),
        faces: polyhedron.faces().to_vec(),
    };
    save_groups(std::slice::from_ref(&group), path)?;
    info!("Saved {}", path.display());
    Ok(())
}

/// Save a scene with automatic format detection.
pub fn save_scene<P: AsRef<Path>>(scene: &Scene<'_>, style: &RenderStyle, path: P) -> Result<()> {
    let path = path.as_ref();
    let groups = scene.groups(style);
    save_groups(&groups, path)?;
    info!(
        "Saved scene to {} ({} sphere samples)",
        path.display(),
        scene.mesh().len()
    );
    Ok(())
}

fn save_groups(groups: &[SceneGroup], path: &Path) -> Result<()> {
    match Format::require(path)? {
        Format::Obj => obj::save(groups, path),
        Format::Ply => ply::save(groups, path),
        Format::Stl => stl::save(groups, path),
    }
}

/// Starting vertex index of each group once all groups share one vertex list.
fn group_offsets(groups: &[SceneGroup]) -> Vec<usize> {
    groups
        .iter()
        .scan(0, |offset, g| {
            let start = *offset;
            *offset += g.vertices.len();
            Some(start)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insphere::{compute_polyhedron, InsphereOptions};
    use crate::solid::SolidKind;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_extension("OBJ"), Some(Format::Obj));
        assert_eq!(Format::from_path("a/b/scene.ply"), Some(Format::Ply));
        assert_eq!(Format::from_path("solid.stl"), Some(Format::Stl));
        assert_eq!(Format::from_path("mesh.gltf"), None);
        assert_eq!(Format::from_path("noext"), None);
    }

    #[test]
    fn test_unsupported_format() {
        let err = load("model.xyz").unwrap_err();
        assert!(matches!(err, InsphereError::UnsupportedFormat { ref extension } if extension == "xyz"));

        let poly = Polyhedron::platonic(SolidKind::Cube, 1.0);
        let err = save_polyhedron(&poly, "cube").unwrap_err();
        assert!(matches!(err, InsphereError::UnsupportedFormat { ref extension } if extension == "(none)"));
    }

    #[test]
    fn test_file_round_trip_all_formats() {
        let dir = std::env::temp_dir();
        for ext in ["obj", "ply", "stl"] {
            let path = dir.join(format!("insphere_io_test_{}.{}", std::process::id(), ext));
            let poly = Polyhedron::platonic(SolidKind::Icosahedron, 1.0);
            save_polyhedron(&poly, &path).unwrap();

            let loaded = load(&path).unwrap();
            assert_eq!(loaded.num_vertices(), 12, "{}", ext);

            let a = compute_polyhedron(&poly, &InsphereOptions::default().without_mesh()).unwrap();
            let b =
                compute_polyhedron(&loaded, &InsphereOptions::default().without_mesh()).unwrap();
            // STL stores f32 coordinates; OBJ and PLY keep f64.
            let tolerance = if ext == "stl" { 1e-5 } else { 1e-12 };
            assert!((a.radius - b.radius).abs() < tolerance, "{}", ext);

            std::fs::remove_file(&path).ok();
        }
    }

    #[test]
    fn test_save_scene_file() {
        let poly = Polyhedron::platonic(SolidKind::Dodecahedron, 1.0);
        let sphere = compute_polyhedron(&poly, &InsphereOptions::default().with_sample_count(6))
            .unwrap();
        let scene = Scene::new(&poly, &sphere).unwrap();

        let path = std::env::temp_dir().join(format!("insphere_scene_{}.ply", std::process::id()));
        save_scene(&scene, &RenderStyle::default(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(&format!("element vertex {}", 20 + 49 + 6)));
        std::fs::remove_file(&path).ok();
    }
}
