// File: crates/strata-core/src/error.rs
// Summary: Error taxonomy for validation, renderer selection, hooks, renderers and surfaces.

use thiserror::Error;

/// Malformed or inconsistent input series.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error(
        "series cannot have differing numbers of points: {expected} vs {found} (series {index}); \
         see SeriesCollection::zero_fill()"
    )]
    DifferingPointCounts {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("x and y of the first point of series {index} should be numbers, got x={x} y={y}")]
    NonNumericPoint { index: usize, x: f64, y: f64 },
    #[error("point {point} of series {index} has a non-numeric x (y={y}) and cannot be zero-filled")]
    NonNumericX { index: usize, point: usize, y: f64 },
}

/// Everything the graph controller can fail with.
///
/// Hook, renderer and surface failures are carried transparently: their
/// `Display` and `source()` are the ones the collaborator produced.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("couldn't find renderer {0}")]
    UnknownRenderer(String),
    #[error("unknown stack offset {0:?}; expected zero, expand, silhouette or wiggle")]
    UnknownOffset(String),
    #[error("unknown interpolation {0:?}; expected linear, step-after or cardinal")]
    UnknownInterpolation(String),
    #[error(transparent)]
    Hook(anyhow::Error),
    #[error(transparent)]
    Renderer(anyhow::Error),
    #[error(transparent)]
    Surface(anyhow::Error),
}

impl GraphError {
    /// True for errors raised by a registered data or after hook.
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }
}
