//! # Insphere
//!
//! Inscribed spheres of the five Platonic solids.
//!
//! Given the vertices of a regular polyhedron, insphere finds the center and
//! radius of the largest sphere touching every face, using closed-form
//! relations between circumradius, edge length and face size. The sphere can
//! be sampled as a latitude/longitude grid and handed, together with the
//! polyhedron, to a [`render::Renderer`] for visualization.
//!
//! ## Features
//!
//! - **Closed-form solver**: one formula pair per solid, selected by vertex count
//! - **Sphere sampling**: `(k+1) × (k+1)` grids with outward-wound triangles
//! - **Canonical solids**: all five Platonic solids at any circumradius
//! - **Scene export**: OBJ, PLY (with RGBA colors) and STL
//!
//! ## Quick Start
//!
//! ```
//! use insphere::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(-1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, -1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(0.0, 0.0, -1.0),
//! ];
//!
//! let sphere = compute(&vertices, &[], &InsphereOptions::default()).unwrap();
//! assert_eq!(sphere.solid, SolidKind::Octahedron);
//! assert!((sphere.radius - 3.0_f64.sqrt() / 3.0).abs() < 1e-12);
//! assert_eq!(sphere.mesh.unwrap().len(), 61 * 61);
//! ```
//!
//! ## Rendering
//!
//! ```no_run
//! use insphere::prelude::*;
//!
//! let dodeca = Polyhedron::platonic(SolidKind::Dodecahedron, 1.0);
//! let mut exporter = SceneExporter::new("dodecahedron.ply");
//! let sphere = compute_and_render(&dodeca, &InsphereOptions::default(), &mut exporter).unwrap();
//! println!("radius = {}", sphere.radius);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod insphere;
pub mod io;
pub mod polyhedron;
pub mod render;
pub mod solid;
pub mod sphere;

pub use error::{InsphereError, Result};

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use insphere::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{InsphereError, Result};
    pub use crate::insphere::{
        compute, compute_default, compute_polyhedron, Insphere, InsphereOptions,
    };
    pub use crate::polyhedron::Polyhedron;
    pub use crate::render::{compute_and_render, RenderStyle, Renderer, Scene, SceneExporter};
    pub use crate::solid::SolidKind;
    pub use crate::sphere::SphereMesh;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
