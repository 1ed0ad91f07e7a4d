//! Error types for audiocomp-core.

use thiserror::Error;

/// Error type shared by every audiocomp crate.
///
/// Both variants are usage errors: nothing here is transient, so callers
/// should fix the offending argument rather than retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed signal or processing argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration value outside its documented domain.
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN and infinities.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

/// Accept only finite values strictly greater than zero.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be greater than zero",
        })
    }
}

/// Accept only finite values greater than or equal to `min`.
pub fn ensure_at_least(
    name: &'static str,
    value: f64,
    min: f64,
    reason: &'static str,
) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if value >= min {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}
