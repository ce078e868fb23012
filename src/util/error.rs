//! Error types for regionbench.

use thiserror::Error;

/// Result alias for regionbench operations.
pub type RegionResult<T> = std::result::Result<T, RegionError>;

/// Errors that can occur when building images or running region algorithms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// Width or height is zero, or the pixel buffer would exceed `isize::MAX` bytes.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The pixel buffer could not be allocated.
    #[error("cannot allocate a {width}x{height} image")]
    AllocationFailed { width: usize, height: usize },
    /// Pattern edge length must be positive.
    #[error("invalid pattern edge {edge}")]
    InvalidEdge { edge: usize },
    /// A fill seed lies outside the image.
    #[error("seed ({x}, {y}) outside {width}x{height} image")]
    SeedOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// No free colour slot is left in the lookup table.
    #[error("colour lookup table full ({capacity} entries)")]
    LutExhausted { capacity: usize },
    /// Loading an image from disk failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
