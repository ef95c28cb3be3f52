//! Rendering collaborators.
//!
//! The numeric core never draws anything. A [`Renderer`] receives a
//! [`Scene`] (the polyhedron, its insphere and the sampled sphere surface)
//! and does whatever presentation it likes. [`SceneExporter`] is the
//! bundled renderer: it writes the scene as a mesh file that any 3D viewer
//! can open, with the polyhedron and sphere semi-transparent and a small
//! marker at the center.
//!
//! Closures also act as renderers:
//!
//! ```
//! use insphere::prelude::*;
//!
//! let cube = Polyhedron::platonic(SolidKind::Cube, 1.0);
//! let mut seen = None;
//! let mut renderer = |scene: &Scene<'_>| -> insphere::Result<()> {
//!     seen = Some(scene.radius());
//!     Ok(())
//! };
//! let sphere = compute_and_render(&cube, &InsphereOptions::default(), &mut renderer).unwrap();
//! assert_eq!(seen, Some(sphere.radius));
//! ```

use std::path::{Path, PathBuf};

use nalgebra::Point3;

use crate::error::{InsphereError, Result};
use crate::insphere::{compute_polyhedron, Insphere, InsphereOptions};
use crate::polyhedron::Polyhedron;
use crate::solid::SolidKind;
use crate::sphere::SphereMesh;

/// RGBA color, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Presentation settings for exported scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Color of the polyhedron faces.
    pub polyhedron_color: Rgba,
    /// Color of the insphere surface.
    pub sphere_color: Rgba,
    /// Color of the center marker.
    pub marker_color: Rgba,
    /// Half-diagonal of the center marker; `0` omits the marker.
    pub marker_size: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            polyhedron_color: [128, 128, 128, 77],
            sphere_color: [220, 40, 40, 128],
            marker_color: [0, 0, 0, 255],
            marker_size: 0.02,
        }
    }
}

impl RenderStyle {
    /// Set the polyhedron color.
    pub fn with_polyhedron_color(mut self, color: Rgba) -> Self {
        self.polyhedron_color = color;
        self
    }

    /// Set the insphere color.
    pub fn with_sphere_color(mut self, color: Rgba) -> Self {
        self.sphere_color = color;
        self
    }

    /// Set the center marker color.
    pub fn with_marker_color(mut self, color: Rgba) -> Self {
        self.marker_color = color;
        self
    }

    /// Set the center marker size.
    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }
}

/// Everything a renderer needs: the polyhedron and its sampled insphere.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    polyhedron: &'a Polyhedron,
    insphere: &'a Insphere,
    mesh: &'a SphereMesh,
}

impl<'a> Scene<'a> {
    /// Pair a polyhedron with its insphere.
    ///
    /// # Errors
    ///
    /// Fails if the insphere was computed without a mesh or the faces are invalid.
    pub fn new(polyhedron: &'a Polyhedron, insphere: &'a Insphere) -> Result<Self> {
        let mesh = insphere.mesh.as_ref().ok_or_else(|| {
            InsphereError::invalid_param("want_mesh", false, "rendering needs a sampled sphere")
        })?;
        polyhedron.validate_faces()?;
        Ok(Self {
            polyhedron,
            insphere,
            mesh,
        })
    }

    /// Sphere center.
    pub fn center(&self) -> Point3<f64> {
        self.insphere.center
    }

    /// Sphere radius.
    pub fn radius(&self) -> f64 {
        self.insphere.radius
    }

    /// Sampled sphere surface.
    pub fn mesh(&self) -> &'a SphereMesh {
        self.mesh
    }

    /// Polyhedron vertices.
    pub fn vertices(&self) -> &'a [Point3<f64>] {
        self.polyhedron.vertices()
    }

    /// Polyhedron faces.
    pub fn faces(&self) -> &'a [Vec<usize>] {
        self.polyhedron.faces()
    }

    /// The polyhedron being rendered.
    pub fn polyhedron(&self) -> &'a Polyhedron {
        self.polyhedron
    }

    /// The computed insphere.
    pub fn insphere(&self) -> &'a Insphere {
        self.insphere
    }

    /// Flatten the scene into colored face-vertex groups.
    ///
    /// Groups are, in order: `polyhedron`, `insphere`, and `center` unless
    /// the marker size is zero. Sphere faces are triangles; polyhedron faces
    /// keep their polygon size.
    pub fn groups(&self, style: &RenderStyle) -> Vec<SceneGroup> {
        let mut groups = vec![
            SceneGroup {
                name: "polyhedron",
                color: style.polyhedron_color,
                vertices: self.vertices().to_vec(),
                faces: self.faces().to_vec(),
            },
            SceneGroup {
                name: "insphere",
                color: style.sphere_color,
                vertices: self.mesh.points().to_vec(),
                faces: self.mesh.triangles().iter().map(|t| t.to_vec()).collect(),
            },
        ];

        if style.marker_size > 0.0 {
            let marker = Polyhedron::platonic(SolidKind::Octahedron, style.marker_size)
                .translated(&self.center().coords);
            let (vertices, faces) = marker.into_parts();
            groups.push(SceneGroup {
                name: "center",
                color: style.marker_color,
                vertices,
                faces,
            });
        }

        groups
    }
}

/// A named, single-colored part of a flattened scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGroup {
    /// Group name.
    pub name: &'static str,
    /// Fill color.
    pub color: Rgba,
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Faces indexing into `vertices`.
    pub faces: Vec<Vec<usize>>,
}

/// Consumes a computed scene.
pub trait Renderer {
    /// Render one scene.
    fn render(&mut self, scene: &Scene<'_>) -> Result<()>;
}

impl<F> Renderer for F
where
    F: FnMut(&Scene<'_>) -> Result<()>,
{
    fn render(&mut self, scene: &Scene<'_>) -> Result<()> {
        self(scene)
    }
}

/// Writes scenes to a mesh file; the format follows the file extension.
#[derive(Debug, Clone)]
pub struct SceneExporter {
    path: PathBuf,
    style: RenderStyle,
}

impl SceneExporter {
    /// Export to `path` with the default style.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            style: RenderStyle::default(),
        }
    }

    /// Use a custom style.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Style in use.
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }
}

impl Renderer for SceneExporter {
    fn render(&mut self, scene: &Scene<'_>) -> Result<()> {
        crate::io::save_scene(scene, &self.style, &self.path)
    }
}

/// Compute a polyhedron's insphere and hand the result to `renderer`.
///
/// The sphere mesh is always sampled, whatever `options.want_mesh` says.
pub fn compute_and_render<R: Renderer + ?Sized>(
    polyhedron: &Polyhedron,
    options: &InsphereOptions,
    renderer: &mut R,
) -> Result<Insphere> {
    let options = options.clone().with_mesh(true);
    let insphere = compute_polyhedron(polyhedron, &options)?;
    let scene = Scene::new(polyhedron, &insphere)?;
    renderer.render(&scene)?;
    Ok(insphere)
}
