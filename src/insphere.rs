//! Inscribed sphere computation.
//!
//! The insphere of a regular solid is centered at the vertex centroid. Its
//! radius follows from the circumradius `R` and the face radius `r0`:
//!
//! ```text
//! r = √(R² - r0²)
//! ```
//!
//! where `r0` is derived from `R` through the closed-form relations in
//! [`SolidKind`]. Only the vertex count is used to pick the solid; the
//! vertices are trusted to lie on a common sphere.
//!
//! # Example
//!
//! ```
//! use insphere::insphere::{compute, InsphereOptions};
//! use nalgebra::Point3;
//!
//! let mut vertices = Vec::new();
//! for x in [-1.0, 1.0] {
//!     for y in [-1.0, 1.0] {
//!         for z in [-1.0, 1.0] {
//!             vertices.push(Point3::new(x, y, z));
//!         }
//!     }
//! }
//!
//! let options = InsphereOptions::default().with_sample_count(16);
//! let sphere = compute(&vertices, &[], &options).unwrap();
//! assert!((sphere.radius - 1.0).abs() < 1e-12);
//! assert_eq!(sphere.mesh.unwrap().len(), 17 * 17);
//! ```

use log::debug;
use nalgebra::Point3;

use crate::error::{InsphereError, Result};
use crate::polyhedron::{centroid, scaled_norm, Polyhedron};
use crate::solid::SolidKind;
use crate::sphere::SphereMesh;

/// Smallest accepted sphere sampling resolution.
pub const MIN_SAMPLE_COUNT: usize = 3;

/// Default sphere sampling resolution.
pub const DEFAULT_SAMPLE_COUNT: usize = 60;

/// Options for insphere computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsphereOptions {
    /// Angular steps per sphere parameter; the mesh has
    /// `(sample_count + 1)²` points.
    pub sample_count: usize,

    /// Whether to sample the sphere surface.
    pub want_mesh: bool,
}

impl Default for InsphereOptions {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            want_mesh: true,
        }
    }
}

impl InsphereOptions {
    /// Set the sampling resolution.
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set whether to sample the sphere surface.
    pub fn with_mesh(mut self, want_mesh: bool) -> Self {
        self.want_mesh = want_mesh;
        self
    }

    /// Skip sphere sampling.
    pub fn without_mesh(mut self) -> Self {
        self.want_mesh = false;
        self
    }

    /// Check option values.
    pub fn validate(&self) -> Result<()> {
        if self.sample_count < MIN_SAMPLE_COUNT {
            return Err(InsphereError::invalid_param(
                "sample_count",
                self.sample_count,
                "must be at least 3",
            ));
        }
        Ok(())
    }
}

/// The inscribed sphere of a regular solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Insphere {
    /// Sphere center (centroid of the vertices).
    pub center: Point3<f64>,
    /// Sphere radius.
    pub radius: f64,
    /// Sampled surface, if requested.
    pub mesh: Option<SphereMesh>,
    /// Solid detected from the vertex count.
    pub solid: SolidKind,
    /// Distance from the center to the first vertex.
    pub circumradius: f64,
    /// Edge length derived from the circumradius.
    pub edge_length: f64,
    /// Radius of the circle through a face's corners.
    pub face_radius: f64,
}

/// Compute the insphere of a regular solid.
///
/// `faces` does not take part in the computation; it is accepted so callers
/// can pass the same inputs they hand to a renderer.
///
/// # Errors
///
/// - [`InsphereError::InvalidParameter`] if `options.sample_count < 3`
/// - [`InsphereError::InvalidPolyhedron`] if the vertex count is not 4, 6, 8, 12 or 20
/// - [`InsphereError::DegenerateGeometry`] if `R² < r0²` or the result is not finite
///
/// Coordinates up to about `1e306` in magnitude are supported; beyond that
/// the centroid itself overflows.
pub fn compute(
    vertices: &[Point3<f64>],
    _faces: &[Vec<usize>],
    options: &InsphereOptions,
) -> Result<Insphere> {
    options.validate()?;

    let solid = SolidKind::from_vertex_count(vertices.len())?;
    let center = centroid(vertices).ok_or(InsphereError::InvalidPolyhedron { vertices: 0 })?;
    let circumradius = scaled_norm(&(vertices[0] - center));

    let edge_length = solid.edge_length(circumradius);
    let face_radius = solid.face_radius(edge_length);

    // R² - r0² taken relative to R² so large solids do not overflow.
    let ratio = if circumradius > 0.0 {
        face_radius / circumradius
    } else {
        0.0
    };
    let radicand = 1.0 - ratio * ratio;
    if radicand.is_nan()
        || radicand < 0.0
        || !circumradius.is_finite()
        || !center.coords.iter().all(|c| c.is_finite())
    {
        return Err(InsphereError::DegenerateGeometry {
            circumradius,
            face_radius,
        });
    }
    let radius = circumradius * radicand.sqrt();

    debug!(
        "{}: R = {:.6}, a = {:.6}, r0 = {:.6}, r = {:.6}",
        solid, circumradius, edge_length, face_radius, radius
    );

    let mesh = options
        .want_mesh
        .then(|| SphereMesh::sample(center, radius, options.sample_count));

    Ok(Insphere {
        center,
        radius,
        mesh,
        solid,
        circumradius,
        edge_length,
        face_radius,
    })
}

/// Compute the insphere with default options.
pub fn compute_default(vertices: &[Point3<f64>], faces: &[Vec<usize>]) -> Result<Insphere> {
    compute(vertices, faces, &InsphereOptions::default())
}

/// Compute the insphere of a [`Polyhedron`].
pub fn compute_polyhedron(polyhedron: &Polyhedron, options: &InsphereOptions) -> Result<Insphere> {
    compute(polyhedron.vertices(), polyhedron.faces(), options)
}
