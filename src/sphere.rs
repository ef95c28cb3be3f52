//! Latitude/longitude sampling of a sphere surface.
//!
//! The grid has `resolution + 1` rows and columns. Row `i` sits at polar
//! angle `θ = π·i/resolution`, column `j` at azimuth `φ = 2π·j/resolution`,
//! so the first and last columns coincide and the first and last rows
//! collapse onto the poles.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

/// A sampled sphere surface stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    resolution: usize,
    points: Vec<Point3<f64>>,
}

impl SphereMesh {
    /// Sample a sphere of `radius` around `center` with `resolution` steps per angle.
    ///
    /// # Example
    ///
    /// ```
    /// use insphere::sphere::SphereMesh;
    /// use nalgebra::Point3;
    ///
    /// let mesh = SphereMesh::sample(Point3::origin(), 2.0, 4);
    /// assert_eq!(mesh.rows(), 5);
    /// assert_eq!(mesh.len(), 25);
    /// ```
    pub fn sample(center: Point3<f64>, radius: f64, resolution: usize) -> Self {
        let n = resolution + 1;
        let mut points = Vec::with_capacity(n * n);

        // A zero resolution degenerates to the north pole.
        let step = if resolution == 0 { 0.0 } else { 1.0 / resolution as f64 };

        for i in 0..n {
            let theta = PI * i as f64 * step;
            let (sin_t, cos_t) = theta.sin_cos();
            for j in 0..n {
                let phi = TAU * j as f64 * step;
                let (sin_p, cos_p) = phi.sin_cos();
                let dir = Vector3::new(sin_t * cos_p, sin_t * sin_p, cos_t);
                points.push(center + dir * radius);
            }
        }

        Self { resolution, points }
    }

    /// Number of angular steps per parameter.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of grid rows (polar samples).
    pub fn rows(&self) -> usize {
        self.resolution + 1
    }

    /// Number of grid columns (azimuth samples).
    pub fn cols(&self) -> usize {
        self.resolution + 1
    }

    /// Total number of sampled points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the mesh holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `row`, `col`, if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<&Point3<f64>> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.points.get(row * self.cols() + col)
    }

    /// All points in row-major order.
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Iterate over grid rows.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Point3<f64>]> {
        self.points.chunks(self.cols())
    }

    /// Triangulate the grid, indexing into [`SphereMesh::points`].
    ///
    /// Each cell yields two triangles wound outward; the collapsed
    /// triangle at each pole is skipped.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let cols = self.cols();
        let last = self.resolution.saturating_sub(1);
        let mut tris = Vec::with_capacity(2 * self.resolution * self.resolution);

        for i in 0..self.resolution {
            for j in 0..self.resolution {
                let p00 = i * cols + j;
                let p01 = p00 + 1;
                let p10 = p00 + cols;
                let p11 = p10 + 1;

                if i != 0 {
                    tris.push([p00, p10, p01]);
                }
                if i != last {
                    tris.push([p01, p10, p11]);
                }
            }
        }

        tris
    }
}
