//! Command-line argument parsing for the headless demo.

use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use crate::audio::{SpectrumSource, SyntheticSpectrumSource, WavSpectrumSource};
use crate::error::WaterResult;
use crate::params::{AnalyzerConfig, QualityTier, WaterParams};
use crate::water::FrameInput;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ripplegrid")]
#[command(about = "Spectrum-driven mass-spring water surface", long_about = None)]
pub struct Args {
    /// Canvas width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "800")]
    pub width: f32,

    /// Canvas height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "400")]
    pub height: f32,

    /// Number of spectrum bars (requested lattice columns)
    #[arg(long, value_name = "COUNT", default_value = "48")]
    pub bars: usize,

    /// Gap between spectrum bars (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "2")]
    pub bar_spacing: f32,

    /// Frames to simulate
    #[arg(long, value_name = "FRAMES", default_value = "600")]
    pub frames: usize,

    /// Simulated frame rate
    #[arg(long, value_name = "FPS", default_value = "60")]
    pub fps: f32,

    /// Quality preset: low, medium (default), high
    #[arg(long, value_name = "TIER", default_value = "medium")]
    pub quality: String,

    /// Drive the surface from a WAV file instead of the synthetic spectrum
    #[arg(long, value_name = "PATH")]
    pub wav: Option<PathBuf>,

    /// Seed for the synthetic spectrum
    #[arg(long, value_name = "SEED", default_value = "42")]
    pub seed: u32,

    /// Write a PNG of the final lattice
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    /// Parse quality tier from command-line arguments
    pub fn parse_quality(&self) -> QualityTier {
        match self.quality.to_lowercase().as_str() {
            "low" => QualityTier::Low,
            "medium" => QualityTier::Medium,
            "high" => QualityTier::High,
            other => {
                warn!("Unknown quality tier '{}', using medium", other);
                QualityTier::Medium
            }
        }
    }

    pub fn water_params(&self) -> WaterParams {
        let tier = self.parse_quality();
        info!("Quality: {:?}", tier);
        WaterParams::for_tier(tier)
    }

    /// Frame delta derived from the requested frame rate
    pub fn frame_dt_s(&self) -> f32 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            1.0 / 60.0
        }
    }

    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            width: self.width,
            height: self.height,
            bar_spacing: self.bar_spacing,
            bar_count: self.bars,
            dt_s: self.frame_dt_s(),
        }
    }

    /// Create the spectrum source selected on the command line
    pub fn create_source(&self) -> WaterResult<Box<dyn SpectrumSource>> {
        let config = AnalyzerConfig::default();
        match &self.wav {
            Some(path) => {
                let source = WavSpectrumSource::open(path, config)?;
                info!(
                    "Spectrum: {} ({:.1}s)",
                    path.display(),
                    source.duration_s()
                );
                Ok(Box::new(source))
            }
            None => {
                info!("Spectrum: synthetic (seed {})", self.seed);
                Ok(Box::new(SyntheticSpectrumSource::new(
                    self.seed,
                    config.spectrum_len(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let args = Args::parse_from(["ripplegrid"]);
        assert_eq!(args.parse_quality(), QualityTier::Medium);
        assert_eq!(args.frame_input().bar_count, 48);
        assert!((args.frame_dt_s() - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn test_unknown_quality_falls_back() {
        let args = Args::parse_from(["ripplegrid", "--quality", "ultra"]);
        assert_eq!(args.parse_quality(), QualityTier::Medium);

        let args = Args::parse_from(["ripplegrid", "--quality", "HIGH"]);
        assert_eq!(args.parse_quality(), QualityTier::High);
    }
}
