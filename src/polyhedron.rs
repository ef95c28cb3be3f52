//! Polyhedra as vertex positions plus polygonal faces.
//!
//! A [`Polyhedron`] is a plain face-vertex list. Faces are 0-based index
//! polygons of any size; nothing here requires the solid to be regular.
//! [`Polyhedron::platonic`] builds the five regular solids centered at the
//! origin with outward-wound faces.

use std::cmp::Ordering;

use nalgebra::{Point3, Vector3};

use crate::error::{InsphereError, Result};
use crate::solid::{SolidKind, PHI};

/// A polyhedron given by its vertices and polygonal faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    vertices: Vec<Point3<f64>>,
    faces: Vec<Vec<usize>>,
}

impl Polyhedron {
    /// Create a polyhedron from vertices and faces.
    ///
    /// Faces are not validated; see [`Polyhedron::validate_faces`].
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Self {
        Self { vertices, faces }
    }

    /// Build a regular solid with the given circumradius, centered at the origin.
    ///
    /// # Example
    ///
    /// ```
    /// use insphere::polyhedron::Polyhedron;
    /// use insphere::solid::SolidKind;
    ///
    /// let cube = Polyhedron::platonic(SolidKind::Cube, 1.0);
    /// assert_eq!(cube.num_vertices(), 8);
    /// assert_eq!(cube.num_faces(), 6);
    /// ```
    pub fn platonic(kind: SolidKind, circumradius: f64) -> Self {
        let directions = unit_vertices(kind);
        let normals: Vec<Vector3<f64>> = match kind {
            // Self-dual: each face lies opposite a vertex.
            SolidKind::Tetrahedron => directions.iter().map(|d| -d).collect(),
            _ => unit_vertices(kind.dual()),
        };

        let faces = normals
            .iter()
            .map(|n| face_around_normal(&directions, n))
            .collect();

        let vertices = directions
            .iter()
            .map(|d| Point3::from(d * circumradius))
            .collect();

        Self { vertices, faces }
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Faces as 0-based vertex index polygons.
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Consume the polyhedron, returning its vertices and faces.
    pub fn into_parts(self) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
        (self.vertices, self.faces)
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Classify the polyhedron by its vertex count.
    pub fn solid_kind(&self) -> Result<SolidKind> {
        SolidKind::from_vertex_count(self.vertices.len())
    }

    /// Arithmetic mean of the vertices, or `None` if there are none.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        centroid(&self.vertices)
    }

    /// Distance from the centroid to the first vertex.
    pub fn circumradius(&self) -> Option<f64> {
        let center = self.centroid()?;
        Some(scaled_norm(&(self.vertices[0] - center)))
    }

    /// Check that every face has at least three distinct, in-range indices.
    pub fn validate_faces(&self) -> Result<()> {
        let n = self.vertices.len();
        for (fi, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(InsphereError::invalid_face(
                    fi,
                    format!("has {} vertices, need at least 3", face.len()),
                ));
            }
            for (k, &vi) in face.iter().enumerate() {
                if vi >= n {
                    return Err(InsphereError::invalid_face(
                        fi,
                        format!("index {} out of range for {} vertices", vi, n),
                    ));
                }
                if face[..k].contains(&vi) {
                    return Err(InsphereError::invalid_face(
                        fi,
                        format!("repeats vertex {}", vi),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Outward normal of a face (Newell's method), unnormalized.
    ///
    /// # Panics
    ///
    /// Panics if `face` is out of range or the face refers to a missing
    /// vertex. Call [`Polyhedron::validate_faces`] first on loaded data.
    pub fn face_normal(&self, face: usize) -> Vector3<f64> {
        let indices = &self.faces[face];
        let mut normal = Vector3::zeros();
        for (k, &i) in indices.iter().enumerate() {
            let p = self.vertices[i];
            let q = self.vertices[indices[(k + 1) % indices.len()]];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        normal
    }

    /// Fan-triangulate every face.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.faces
            .iter()
            .flat_map(|face| {
                (1..face.len().saturating_sub(1)).map(move |i| [face[0], face[i], face[i + 1]])
            })
            .collect()
    }

    /// A copy moved by `offset`.
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p + offset).collect(),
            faces: self.faces.clone(),
        }
    }

    /// A copy scaled by `factor` about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| Point3::from(p.coords * factor)).collect(),
            faces: self.faces.clone(),
        }
    }
}

/// Arithmetic mean of a point set, or `None` if it is empty.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc: Vector3<f64>, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Euclidean length that does not overflow when the squared components would.
pub(crate) fn scaled_norm(v: &Vector3<f64>) -> f64 {
    let scale = v.amax();
    if scale > 0.0 && scale.is_finite() {
        scale * (v / scale).norm()
    } else {
        v.norm()
    }
}

/// Vertex directions of a regular solid on the unit sphere.
fn unit_vertices(kind: SolidKind) -> Vec<Vector3<f64>> {
    let raw: Vec<Vector3<f64>> = match kind {
        SolidKind::Tetrahedron => vec![
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(1.0, -1.0, -1.0),
            Vector3::new(-1.0, 1.0, -1.0),
            Vector3::new(-1.0, -1.0, 1.0),
        ],
        SolidKind::Octahedron => vec![
            Vector3::x(),
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
        ],
        SolidKind::Cube => cube_corners(),
        SolidKind::Icosahedron => {
            let mut v = Vec::with_capacity(12);
            for a in [-PHI, PHI] {
                for b in [-1.0, 1.0] {
                    v.push(Vector3::new(0.0, a, b));
                    v.push(Vector3::new(a, b, 0.0));
                    v.push(Vector3::new(b, 0.0, a));
                }
            }
            v
        }
        SolidKind::Dodecahedron => {
            let mut v = cube_corners();
            let inv = 1.0 / PHI;
            for a in [-inv, inv] {
                for b in [-PHI, PHI] {
                    v.push(Vector3::new(0.0, a, b));
                    v.push(Vector3::new(a, b, 0.0));
                    v.push(Vector3::new(b, 0.0, a));
                }
            }
            v
        }
    };
    raw.into_iter().map(|v| v.normalize()).collect()
}

fn cube_corners() -> Vec<Vector3<f64>> {
    let mut v = Vec::with_capacity(20);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                v.push(Vector3::new(x, y, z));
            }
        }
    }
    v
}

/// Vertices farthest along `normal`, ordered counter-clockwise around it.
fn face_around_normal(directions: &[Vector3<f64>], normal: &Vector3<f64>) -> Vec<usize> {
    const EPSILON: f64 = 1e-9;

    let n = normal.normalize();
    let max = directions
        .iter()
        .map(|d| d.dot(&n))
        .fold(f64::NEG_INFINITY, f64::max);

    let mut face: Vec<usize> = (0..directions.len())
        .filter(|&i| directions[i].dot(&n) > max - EPSILON)
        .collect();

    let center = n * max;
    let u = (directions[face[0]] - center).normalize();
    let v = n.cross(&u);
    let angle = |i: usize| {
        let d = directions[i] - center;
        d.dot(&v).atan2(d.dot(&u))
    };
    face.sort_by(|&a, &b| angle(a).partial_cmp(&angle(b)).unwrap_or(Ordering::Equal));
    face
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_platonic_counts() {
        for kind in SolidKind::ALL {
            let poly = Polyhedron::platonic(kind, 1.0);
            assert_eq!(poly.num_vertices(), kind.vertex_count(), "{}", kind);
            assert_eq!(poly.num_faces(), kind.face_count(), "{}", kind);
            for face in poly.faces() {
                assert_eq!(face.len(), kind.face_sides(), "{}", kind);
            }
            assert!(poly.validate_faces().is_ok());
            assert_eq!(poly.solid_kind().unwrap(), kind);
        }
    }

    #[test]
    fn test_platonic_on_circumsphere() {
        for kind in SolidKind::ALL {
            let poly = Polyhedron::platonic(kind, 2.5);
            let c = poly.centroid().unwrap();
            assert_relative_eq!(c.coords.norm(), 0.0, epsilon = 1e-12);
            for p in poly.vertices() {
                assert_relative_eq!(p.coords.norm(), 2.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_platonic_edges_congruent() {
        for kind in SolidKind::ALL {
            let poly = Polyhedron::platonic(kind, 1.0);
            let a = kind.edge_length(1.0);
            for face in poly.faces() {
                for k in 0..face.len() {
                    let p = poly.vertices()[face[k]];
                    let q = poly.vertices()[face[(k + 1) % face.len()]];
                    assert_relative_eq!((p - q).norm(), a, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_platonic_faces_outward() {
        for kind in SolidKind::ALL {
            let poly = Polyhedron::platonic(kind, 1.0);
            for (fi, face) in poly.faces().iter().enumerate() {
                let fc = centroid(
                    &face.iter().map(|&i| poly.vertices()[i]).collect::<Vec<_>>(),
                )
                .unwrap();
                assert!(poly.face_normal(fi).dot(&fc.coords) > 0.0, "{} face {}", kind, fi);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_face_normal_out_of_range() {
        let tetra = Polyhedron::platonic(SolidKind::Tetrahedron, 1.0);
        tetra.face_normal(4);
    }

    #[test]
    fn test_scaled_norm_large_coordinates() {
        let v: Vector3<f64> = Vector3::new(1.8e154, 1.8e154, 1.8e154);
        assert!(v.norm().is_infinite());
        assert_relative_eq!(scaled_norm(&v), 1.8e154 * 3.0_f64.sqrt(), max_relative = 1e-12);
        assert_eq!(scaled_norm(&Vector3::zeros()), 0.0);
        assert_relative_eq!(scaled_norm(&Vector3::new(3.0, -4.0, 0.0)), 5.0);
    }

    #[test]
    fn test_centroid_empty() {
        let poly = Polyhedron::new(Vec::new(), Vec::new());
        assert!(poly.centroid().is_none());
        assert!(poly.circumradius().is_none());
    }

    #[test]
    fn test_validate_faces() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];

        let poly = Polyhedron::new(vertices.clone(), vec![vec![0, 1]]);
        assert!(matches!(poly.validate_faces(), Err(InsphereError::InvalidFace { face: 0, .. })));

        let poly = Polyhedron::new(vertices.clone(), vec![vec![0, 1, 2], vec![0, 1, 3]]);
        assert!(matches!(poly.validate_faces(), Err(InsphereError::InvalidFace { face: 1, .. })));

        let poly = Polyhedron::new(vertices, vec![vec![0, 1, 1]]);
        assert!(poly.validate_faces().is_err());
    }

    #[test]
    fn test_fan_triangulation() {
        let cube = Polyhedron::platonic(SolidKind::Cube, 1.0);
        assert_eq!(cube.triangles().len(), 12);

        let dodeca = Polyhedron::platonic(SolidKind::Dodecahedron, 1.0);
        assert_eq!(dodeca.triangles().len(), 36);
    }

    #[test]
    fn test_translate_and_scale() {
        let poly = Polyhedron::platonic(SolidKind::Octahedron, 1.0);
        let moved = poly.translated(&Vector3::new(1.0, 2.0, 3.0));
        let c = moved.centroid().unwrap();
        assert_relative_eq!(c, Point3::new(1.0, 2.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(moved.circumradius().unwrap(), 1.0, epsilon = 1e-12);

        let big = poly.scaled(3.0);
        assert_relative_eq!(big.circumradius().unwrap(), 3.0, epsilon = 1e-12);
        assert_eq!(big.faces(), poly.faces());
    }
}
