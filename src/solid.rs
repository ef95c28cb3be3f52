//! Platonic solid classification and closed-form relations.
//!
//! A regular polyhedron is identified purely by its vertex count:
//!
//! | Vertices | Solid | Edge length `a(R)` | Face radius `r0(a)` |
//! |----------|-------|--------------------|---------------------|
//! | 4 | tetrahedron | `2√2·R/√3` | `a/√3` |
//! | 6 | octahedron | `√2·R` | `a/√3` |
//! | 8 | cube | `2R/√3` | `a/√2` |
//! | 12 | icosahedron | `2R/√(2+φ)` | `a/√3` |
//! | 20 | dodecahedron | `2R/(√3·φ)` | `a/(2·sin(π/5))` |
//!
//! `R` is the circumradius and `φ` the golden ratio. The face radius is the
//! distance from a face's center to its corners, so the distance from the
//! solid's center to the face plane is `√(R² - r0²)`.

use std::f64::consts::{PI, SQRT_2};
use std::fmt;
use std::str::FromStr;

use crate::error::{InsphereError, Result};

/// The golden ratio `(1 + √5) / 2`.
pub const PHI: f64 = 1.618_033_988_749_895;

/// The five convex regular polyhedra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidKind {
    /// 4 vertices, 4 triangular faces.
    Tetrahedron,
    /// 6 vertices, 8 triangular faces.
    Octahedron,
    /// 8 vertices, 6 square faces.
    Cube,
    /// 12 vertices, 20 triangular faces.
    Icosahedron,
    /// 20 vertices, 12 pentagonal faces.
    Dodecahedron,
}

impl SolidKind {
    /// All solids, ordered by vertex count.
    pub const ALL: [SolidKind; 5] = [
        SolidKind::Tetrahedron,
        SolidKind::Octahedron,
        SolidKind::Cube,
        SolidKind::Icosahedron,
        SolidKind::Dodecahedron,
    ];

    /// Classify a polyhedron by its number of vertices.
    ///
    /// # Example
    ///
    /// ```
    /// use insphere::solid::SolidKind;
    ///
    /// assert_eq!(SolidKind::from_vertex_count(8).unwrap(), SolidKind::Cube);
    /// assert!(SolidKind::from_vertex_count(5).is_err());
    /// ```
    pub fn from_vertex_count(vertices: usize) -> Result<SolidKind> {
        match vertices {
            4 => Ok(SolidKind::Tetrahedron),
            6 => Ok(SolidKind::Octahedron),
            8 => Ok(SolidKind::Cube),
            12 => Ok(SolidKind::Icosahedron),
            20 => Ok(SolidKind::Dodecahedron),
            _ => Err(InsphereError::InvalidPolyhedron { vertices }),
        }
    }

    /// Lowercase name of the solid.
    pub fn name(self) -> &'static str {
        match self {
            SolidKind::Tetrahedron => "tetrahedron",
            SolidKind::Octahedron => "octahedron",
            SolidKind::Cube => "cube",
            SolidKind::Icosahedron => "icosahedron",
            SolidKind::Dodecahedron => "dodecahedron",
        }
    }

    /// Number of vertices.
    pub fn vertex_count(self) -> usize {
        match self {
            SolidKind::Tetrahedron => 4,
            SolidKind::Octahedron => 6,
            SolidKind::Cube => 8,
            SolidKind::Icosahedron => 12,
            SolidKind::Dodecahedron => 20,
        }
    }

    /// Number of faces.
    pub fn face_count(self) -> usize {
        match self {
            SolidKind::Tetrahedron => 4,
            SolidKind::Octahedron => 8,
            SolidKind::Cube => 6,
            SolidKind::Icosahedron => 20,
            SolidKind::Dodecahedron => 12,
        }
    }

    /// Number of edges.
    pub fn edge_count(self) -> usize {
        match self {
            SolidKind::Tetrahedron => 6,
            SolidKind::Octahedron | SolidKind::Cube => 12,
            SolidKind::Icosahedron | SolidKind::Dodecahedron => 30,
        }
    }

    /// Number of sides of each face.
    pub fn face_sides(self) -> usize {
        match self {
            SolidKind::Cube => 4,
            SolidKind::Dodecahedron => 5,
            _ => 3,
        }
    }

    /// The dual solid (vertices and faces swap roles).
    pub fn dual(self) -> SolidKind {
        match self {
            SolidKind::Tetrahedron => SolidKind::Tetrahedron,
            SolidKind::Octahedron => SolidKind::Cube,
            SolidKind::Cube => SolidKind::Octahedron,
            SolidKind::Icosahedron => SolidKind::Dodecahedron,
            SolidKind::Dodecahedron => SolidKind::Icosahedron,
        }
    }

    /// Edge length of the solid with the given circumradius.
    pub fn edge_length(self, circumradius: f64) -> f64 {
        let r = circumradius;
        match self {
            SolidKind::Tetrahedron => 2.0 * SQRT_2 * r / 3.0_f64.sqrt(),
            SolidKind::Octahedron => SQRT_2 * r,
            SolidKind::Cube => 2.0 * r / 3.0_f64.sqrt(),
            SolidKind::Icosahedron => 2.0 * r / (2.0 + PHI).sqrt(),
            SolidKind::Dodecahedron => 2.0 * r / (3.0_f64.sqrt() * PHI),
        }
    }

    /// Radius of the circle through the corners of a face with the given edge length.
    pub fn face_radius(self, edge_length: f64) -> f64 {
        let a = edge_length;
        match self {
            SolidKind::Tetrahedron | SolidKind::Octahedron | SolidKind::Icosahedron => {
                a / 3.0_f64.sqrt()
            }
            SolidKind::Cube => a / SQRT_2,
            SolidKind::Dodecahedron => a / (2.0 * (0.2 * PI).sin()),
        }
    }
}

impl fmt::Display for SolidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolidKind {
    type Err = InsphereError;

    fn from_str(s: &str) -> Result<SolidKind> {
        match s.trim().to_lowercase().as_str() {
            "tetrahedron" | "tetra" => Ok(SolidKind::Tetrahedron),
            "octahedron" | "octa" => Ok(SolidKind::Octahedron),
            "cube" | "hexahedron" => Ok(SolidKind::Cube),
            "icosahedron" | "icosa" => Ok(SolidKind::Icosahedron),
            "dodecahedron" | "dodeca" => Ok(SolidKind::Dodecahedron),
            _ => Err(InsphereError::UnknownSolid(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phi() {
        assert_relative_eq!(PHI, (1.0 + 5.0_f64.sqrt()) / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_vertex_count_table() {
        for kind in SolidKind::ALL {
            assert_eq!(SolidKind::from_vertex_count(kind.vertex_count()).unwrap(), kind);
        }
        assert_eq!(SolidKind::from_vertex_count(6).unwrap(), SolidKind::Octahedron);
        assert_eq!(SolidKind::from_vertex_count(8).unwrap(), SolidKind::Cube);
        assert_eq!(SolidKind::from_vertex_count(12).unwrap(), SolidKind::Icosahedron);
        assert_eq!(SolidKind::from_vertex_count(20).unwrap(), SolidKind::Dodecahedron);
    }

    #[test]
    fn test_invalid_vertex_counts() {
        for n in [0, 1, 2, 3, 5, 7, 9, 10, 16, 21, 100] {
            let err = SolidKind::from_vertex_count(n).unwrap_err();
            assert!(matches!(err, InsphereError::InvalidPolyhedron { vertices } if vertices == n));
        }
    }

    #[test]
    fn test_euler_characteristic() {
        for kind in SolidKind::ALL {
            let chi = kind.vertex_count() as i64 - kind.edge_count() as i64
                + kind.face_count() as i64;
            assert_eq!(chi, 2, "{}", kind);
            assert_eq!(kind.face_count() * kind.face_sides(), 2 * kind.edge_count());
        }
    }

    #[test]
    fn test_duals_swap_counts() {
        for kind in SolidKind::ALL {
            let dual = kind.dual();
            assert_eq!(kind.vertex_count(), dual.face_count());
            assert_eq!(kind.face_count(), dual.vertex_count());
            assert_eq!(dual.dual(), kind);
        }
    }

    #[test]
    fn test_edge_lengths() {
        // Cube with corners at (±1, ±1, ±1): R = √3, a = 2
        assert_relative_eq!(SolidKind::Cube.edge_length(3.0_f64.sqrt()), 2.0, epsilon = 1e-12);
        // Octahedron at ±e_i: R = 1, a = √2
        assert_relative_eq!(SolidKind::Octahedron.edge_length(1.0), SQRT_2, epsilon = 1e-12);
        // Unit-edge icosahedron has R = sin(2π/5)
        let r = (2.0 * PI / 5.0).sin();
        assert_relative_eq!(SolidKind::Icosahedron.edge_length(r), 1.0, epsilon = 1e-12);
        // Unit-edge dodecahedron has R = √3·φ/2
        let r = 3.0_f64.sqrt() * PHI / 2.0;
        assert_relative_eq!(SolidKind::Dodecahedron.edge_length(r), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_face_radius_below_circumradius() {
        for kind in SolidKind::ALL {
            let a = kind.edge_length(1.0);
            let r0 = kind.face_radius(a);
            assert!(r0 > 0.0 && r0 < 1.0, "{}: r0 = {}", kind, r0);
        }
    }

    #[test]
    fn test_pentagon_face_radius() {
        // A regular pentagon with unit side has circumradius ≈ 0.850651
        assert_relative_eq!(
            SolidKind::Dodecahedron.face_radius(1.0),
            0.850_650_808_352_039_9,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_parse_and_display() {
        for kind in SolidKind::ALL {
            assert_eq!(kind.to_string().parse::<SolidKind>().unwrap(), kind);
        }
        assert_eq!("Tetra".parse::<SolidKind>().unwrap(), SolidKind::Tetrahedron);
        assert_eq!(" hexahedron ".parse::<SolidKind>().unwrap(), SolidKind::Cube);
        assert!(matches!(
            "prism".parse::<SolidKind>(),
            Err(InsphereError::UnknownSolid(_))
        ));
    }
}
