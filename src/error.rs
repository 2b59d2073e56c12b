//! Error types for GML conversion
//!
//! Every error is fatal: a conversion either returns a complete geometry or
//! one of these.

use thiserror::Error;

/// Result type for GML conversion
pub type Result<T> = std::result::Result<T, GmlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GmlError {
    /// Top-level element is not a geometry root (or a ring element was
    /// asked for where none is allowed)
    #[error("unsupported GML geometry kind '{tag}'")]
    UnsupportedGeometryKind { tag: String },

    /// A ring, curve or point carries no posList, pos or Point>pos
    #[error("no coordinates found in <{tag}>")]
    MissingCoordinates { tag: String },

    /// Token count not a multiple of the stride, a non-numeric token, or a
    /// transform that changed the tuple arity
    #[error("malformed coordinates in <{tag}>: {reason}")]
    MalformedCoordinateList { tag: String, reason: String },

    #[error("degenerate ring in <{tag}>: {distinct} distinct vertices, at least 3 required")]
    DegenerateRing { tag: String, distinct: usize },

    #[error("<{tag}> has no exterior ring")]
    MissingExteriorRing { tag: String },

    #[error("<{tag}> contains no polygons")]
    EmptySurfaceCollection { tag: String },

    #[error("nesting below <{tag}> exceeds the depth limit of {limit}")]
    RecursionLimitExceeded { tag: String, limit: usize },
}

impl GmlError {
    /// Variant name, for callers that report or count failures by kind
    pub fn kind(&self) -> &'static str {
        match self {
            GmlError::UnsupportedGeometryKind { .. } => "UnsupportedGeometryKind",
            GmlError::MissingCoordinates { .. } => "MissingCoordinates",
            GmlError::MalformedCoordinateList { .. } => "MalformedCoordinateList",
            GmlError::DegenerateRing { .. } => "DegenerateRing",
            GmlError::MissingExteriorRing { .. } => "MissingExteriorRing",
            GmlError::EmptySurfaceCollection { .. } => "EmptySurfaceCollection",
            GmlError::RecursionLimitExceeded { .. } => "RecursionLimitExceeded",
        }
    }

    pub(crate) fn malformed(tag: &str, reason: impl Into<String>) -> Self {
        GmlError::MalformedCoordinateList {
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }
}
