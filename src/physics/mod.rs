//! Lattice dynamics: spectrum forces, ripple impulses and the fixed-step integrator.
//!
//! Forces and ripples only ever add to node velocities; the integrator is
//! the sole stage that turns velocity into motion.

mod force;
mod integrator;
mod ripple;

// Re-export public types
pub use force::{band_for_column, ForceField};
pub use integrator::{PhysicsIntegrator, StepReport};
pub use ripple::{RippleEvent, RipplePropagator};
