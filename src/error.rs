//! Error types for insphere.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`InsphereError`].
pub type Result<T> = std::result::Result<T, InsphereError>;

/// Errors that can occur while computing or exporting an insphere.
#[derive(Error, Debug)]
pub enum InsphereError {
    /// The vertex count does not belong to any Platonic solid.
    #[error("{vertices} vertices do not describe a Platonic solid (expected 4, 6, 8, 12 or 20)")]
    InvalidPolyhedron {
        /// The number of vertices supplied.
        vertices: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// The radius radicand `R^2 - r0^2` is negative or not finite.
    #[error("degenerate geometry: circumradius {circumradius} cannot enclose face radius {face_radius}")]
    DegenerateGeometry {
        /// Distance from the center to the first vertex.
        circumradius: f64,
        /// Radius of the circle through a face's corners.
        face_radius: f64,
    },

    /// A face is unusable for rendering.
    #[error("face {face} is invalid: {reason}")]
    InvalidFace {
        /// The face index.
        face: usize,
        /// Description of the problem.
        reason: String,
    },

    /// A solid name could not be parsed.
    #[error("unknown solid: {0}")]
    UnknownSolid(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a polyhedron from file.
    #[error("failed to load polyhedron from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving to file.
    #[error("failed to save to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}

impl InsphereError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        InsphereError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create an invalid face error.
    pub fn invalid_face(face: usize, reason: impl Into<String>) -> Self {
        InsphereError::InvalidFace {
            face,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = InsphereError::InvalidPolyhedron { vertices: 5 };
        assert!(err.to_string().contains("5 vertices"));

        let err = InsphereError::invalid_param("sample_count", 2, "must be at least 3");
        assert_eq!(
            err.to_string(),
            "invalid parameter: sample_count = 2 (must be at least 3)"
        );

        let err = InsphereError::invalid_face(3, "index 9 out of range");
        assert_eq!(err.to_string(), "face 3 is invalid: index 9 out of range");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: InsphereError = io.into();
        assert!(matches!(err, InsphereError::Io(_)));
    }
}
