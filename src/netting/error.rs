//! Error type shared by the netting detector.

use thiserror::Error;

/// Everything that can stop a scan from starting.
///
/// Cancellation and empty scan rectangles are not errors; they produce a
/// valid [`Classification`](super::Classification).
#[derive(Debug, Error)]
pub enum NettingError {
    #[error("{name} must be within {min}..={max}, got {value}")]
    ParameterOutOfRange {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("buffer size mismatch: expected {expected} pixels, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    #[error(
        "region {left},{top} {width}x{height} exceeds image bounds {image_width}x{image_height}"
    )]
    RegionOutOfBounds {
        left: usize,
        top: usize,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    },

    #[error("unsupported channel count {0}, expected 1, 3 or 4")]
    UnsupportedChannels(usize),

    #[error("invalid parameter file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),
}
