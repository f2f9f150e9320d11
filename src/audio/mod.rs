//! Spectrum input: band extraction, FFT analysis and frame sources.

mod bands;
mod fft;
mod source;

// Re-export public types
pub use bands::{BandExtractor, BandState};
pub use fft::{hann_table, SpectrumAnalyzer};
pub use source::{SpectrumSource, SyntheticSpectrumSource, WavSpectrumSource};
