//! Per-call conversion settings
//!
//! Nothing here is global: every conversion carries its own context, so
//! concurrent calls with different strides never interfere.

use crate::error::{GmlError, Result};
use crate::geojson::Position;

/// Caller-supplied per-coordinate function. Receives one tuple's components
/// and must return the same number of components.
pub type TransformFn = dyn Fn(Vec<f64>) -> Vec<f64> + Send + Sync;

pub const DEFAULT_STRIDE: usize = 2;

/// Composite surfaces nested deeper than this fail instead of overflowing
/// the stack
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Components per tuple where no `srsDimension` says otherwise
    pub stride: usize,
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            stride: DEFAULT_STRIDE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Immutable state threaded through the recursive descent
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    transform: Option<&'a TransformFn>,
    pub stride: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> ParseContext<'a> {
    pub fn new(transform: Option<&'a TransformFn>, options: &ParseOptions, root_tag: &str) -> Result<Self> {
        if options.stride == 0 {
            return Err(GmlError::malformed(root_tag, "stride must be a positive integer"));
        }
        Ok(ParseContext {
            transform,
            stride: options.stride,
            depth: 0,
            max_depth: options.max_depth,
        })
    }

    /// Context for the children of a surface member
    pub fn descend(&self, tag: &str) -> Result<Self> {
        if self.depth >= self.max_depth {
            return Err(GmlError::RecursionLimitExceeded {
                tag: tag.to_string(),
                limit: self.max_depth,
            });
        }
        Ok(ParseContext {
            depth: self.depth + 1,
            ..*self
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run the transform over one freshly parsed tuple
    pub fn apply(&self, position: Position, tag: &str) -> Result<Position> {
        let Some(transform) = self.transform else {
            return Ok(position);
        };
        let arity = position.len();
        let transformed = transform(position);
        if transformed.len() != arity {
            return Err(GmlError::malformed(
                tag,
                format!("transform returned {} components for a {}-component tuple", transformed.len(), arity),
            ));
        }
        if transformed.iter().any(|v| !v.is_finite()) {
            return Err(GmlError::malformed(tag, "transform returned a non-finite component"));
        }
        Ok(transformed)
    }
}

impl std::fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseContext")
            .field("transform", &self.transform.is_some())
            .field("stride", &self.stride)
            .field("depth", &self.depth)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
