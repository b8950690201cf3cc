//! Lander-specific error types.
//!
//! The per-frame simulation never fails: every odd value it meets (absent
//! velocity, an already-collected star, a second fuel cut-off) is recovered
//! locally by clamping or ignoring.  Errors only exist at the configuration
//! boundary, where a bad `assets/lander.toml` must be rejected before it can
//! reach the simulation.
//!
//! ## Usage
//!
//! ```rust
//! use orbital_lander::error::{validate_positive, SimResult};
//!
//! fn check(capacity: f64) -> SimResult<()> {
//!     validate_positive("fuel_capacity", capacity)?;
//!     Ok(())
//! }
//! # assert!(check(100.0).is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the lander simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A tuning value is outside the range the simulation can work with.
    UnsafeConstant {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// The speed history must retain at least one sample.
    EmptySpeedHistory,

    /// `assets/lander.toml` exists but is not valid TOML for [`crate::config::LanderConfig`].
    ConfigParse {
        /// Path of the file that failed to parse.
        path: String,
        /// Parser message.
        message: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::EmptySpeedHistory => {
                write!(f, "speed_history_capacity must be at least 1")
            }
            SimError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error if the speed history would hold no samples.
pub fn validate_history_capacity(capacity: usize) -> SimResult<()> {
    if capacity == 0 {
        Err(SimError::EmptySpeedHistory)
    } else {
        Ok(())
    }
}
