//! Ripplegrid library - Spectrum-driven mass-spring water surface

pub mod audio;
pub mod cli;
pub mod error;
pub mod grid;
pub mod lod;
pub mod params;
pub mod physics;
pub mod snapshot;
pub mod water;
