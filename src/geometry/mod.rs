mod triangle;

pub use triangle::{SweepHit, Triangle3};

/// Cutoff below which a ray direction counts as parallel to a triangle's
/// plane and the cast is rejected
pub const RAY_PARALLEL_EPSILON: f32 = 1.0e-8;

/// Cutoff on the sweep direction's approach to a triangle's front face;
/// sphere casts at or above it are rejected
pub const SWEEP_FACING_EPSILON: f32 = 1.0e-3;
