//! Error types for the simulation crate.

use thiserror::Error;

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the clock and decay models.
#[derive(Debug, Error)]
pub enum SimError {
    /// A rest duration must be a positive number of hours.
    #[error("invalid rest duration: {0} hours")]
    InvalidDuration(f64),
}
