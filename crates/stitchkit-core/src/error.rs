//! Error handling for StitchKit
//!
//! Provides the error types for all layers of the workspace:
//! - Geometry errors (insufficient input, dangling references, backend failures)
//! - Document errors (rejected edits)
//!
//! Geometry queries recover from their errors locally; the types exist so the
//! recovery paths can log a precise reason. Document edits return them to the
//! caller.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised inside the geometry pipeline. The engine never propagates these to
/// the user; it falls back to the unmodified input, an empty result, or
/// `None`, and logs the error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer points than the operation needs
    #[error("{operation} needs at least {required} points, got {actual}")]
    InsufficientGeometry {
        /// The operation that was attempted.
        operation: &'static str,
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// A range or shape index that no longer exists
    #[error("Missing {kind} reference at index {index}")]
    MissingReference {
        /// What kind of entity was referenced ("edge range", "shape").
        kind: &'static str,
        /// The dangling index.
        index: usize,
    },

    /// Zero or near-zero path length
    #[error("Degenerate length in {operation}")]
    DegenerateLength {
        /// The operation that would have divided by the length.
        operation: &'static str,
    },

    /// The polygon library failed or panicked
    #[error("Polygon backend failure: {0}")]
    Backend(String),
}

/// Document error type
///
/// Represents an edit rejected by the pattern document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// Node index out of range
    #[error("Node index {index} out of range (document has {count} nodes)")]
    NodeIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of nodes.
        count: usize,
    },

    /// Shape index out of range
    #[error("Shape index {index} out of range (document has {count} shapes)")]
    ShapeIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of shapes.
        count: usize,
    },

    /// Edge range index out of range
    #[error("Edge range index {index} out of range (document has {count} ranges)")]
    RangeIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of ranges.
        count: usize,
    },

    /// Range bounds outside [0, 1] or not ordered
    #[error("Invalid edge range [{start}, {end}]")]
    InvalidRange {
        /// Start fraction.
        start: f64,
        /// End fraction.
        end: f64,
    },

    /// The holster transform is locked
    #[error("Holster transform is locked")]
    TransformLocked,

    /// Removing a node would leave too few to define an outline
    #[error("Outline needs at least {required} nodes")]
    NotEnoughNodes {
        /// Minimum number of nodes for the current outline mode.
        required: usize,
    },

    /// Bezier split parameter outside (0, 1)
    #[error("Split parameter {t} must lie strictly between 0 and 1")]
    InvalidSplitParameter {
        /// The rejected parameter.
        t: f64,
    },
}

/// Main error type for StitchKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a document error
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
