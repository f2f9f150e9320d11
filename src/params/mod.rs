//! Parameter definitions with physical units and documented semantics.
//!
//! All tunables are extracted here with:
//! - Units (pixels, seconds, px/s, per-micro-step factors)
//! - Documented ranges and meanings
//! - Validation before a simulation is constructed

mod audio;
mod grid;
mod lod;
mod physics;
mod quality;

// Re-export all types
pub use audio::{AnalyzerConfig, BandParams};
pub use grid::GridParams;
pub use lod::LodParams;
pub use physics::{ForceMapping, PhysicsParams, RippleParams};
pub use quality::{QualityTier, WaterParams};
