//! Error types for line and hook construction.

use thiserror::Error;

/// Errors raised when a line or hook cannot be built.
///
/// Commands issued in the wrong state are not errors; they return `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrappleError {
    /// A line needs an anchor point and a hook point.
    #[error("line needs at least 2 points, got {count}")]
    InsufficientPoints { count: usize },
    /// The time for the line to reach full length must be positive.
    #[error("line time to full length must be positive")]
    InvalidTimeToFullLength,
    /// Speeds, accelerations and lengths must be finite and non-negative.
    #[error("{field} must be finite and non-negative")]
    NegativeSpeed { field: &'static str },
    /// The anchor position is NaN or infinite.
    #[error("anchor position must be finite")]
    NonFiniteAnchor,
    /// The fire target coincides with the fire origin, so there is no direction.
    #[error("fire target coincides with its origin")]
    DegenerateAim,
}
