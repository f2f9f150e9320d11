//! Error types for configuration and the demo I/O surfaces.
//!
//! Per-frame simulation never fails; only construction and file access do.

use thiserror::Error;

/// Invalid configuration rejected before a simulation is built
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("band count must be > 0")]
    ZeroBands,

    #[error("substeps must be > 0")]
    ZeroSubsteps,

    #[error("ripple radius must be > 0")]
    ZeroRippleRadius,

    #[error("FFT size must be a power of 2, got {0}")]
    FftSize(usize),

    #[error("density bounds must satisfy 0 < min <= max <= 1, got ({min}, {max})")]
    DensityBounds { min: f32, max: f32 },

    #[error("{name} out of range: {value}")]
    OutOfRange { name: &'static str, value: f32 },
}

/// Top-level error type
#[derive(Debug, Error)]
pub enum WaterError {
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WaterResult<T> = Result<T, WaterError>;
