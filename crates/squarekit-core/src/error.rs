//! Error handling for SquareKit
//!
//! Provides the parameter error shared by the configuration and generator
//! crates.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Parameter error type
///
/// Represents a print, shape, or extrusion value that cannot produce a
/// meaningful toolpath.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Value must be strictly positive
    #[error("Parameter '{name}' must be > 0 (got {value})")]
    NotPositive {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Value must not be negative
    #[error("Parameter '{name}' must be >= 0 (got {value})")]
    Negative {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Value is NaN or infinite
    #[error("Parameter '{name}' must be finite")]
    NotFinite {
        /// The parameter name.
        name: String,
    },
}
