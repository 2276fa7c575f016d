//! Error types for the settings crate.
//!
//! This module provides structured error types for configuration loading,
//! saving, and validation.

use squarekit_core::ParameterError;
use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The configuration file could not be saved.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// I/O error during file operations.
    #[error("I/O error")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML parse error")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialize error")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// A configuration error occurred.
    #[error("Config error")]
    Config(#[from] ConfigError),

    /// A print or shape parameter is invalid.
    #[error("Invalid parameter")]
    Parameter(#[from] ParameterError),
}

/// Errors related to configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A multiplier or count makes the print meaningless.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
