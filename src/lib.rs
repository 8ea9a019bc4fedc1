pub mod math;
pub mod geometry;

/// Re-export common types for easier usage
pub use crate::math::{Matrix4, Quaternion, Vector2, Vector3, Vector4};
pub use crate::geometry::{SweepHit, Triangle3};

/// Error types for the math library
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum MathError {
        #[error("expected a slice of {expected} elements, got {actual}")]
        InvalidSliceLength { expected: usize, actual: usize },
    }
}

/// Result type for fallible math operations
pub type Result<T> = std::result::Result<T, error::MathError>;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
