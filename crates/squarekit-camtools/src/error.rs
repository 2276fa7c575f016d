//! Error types for the CAM tools crate.
//!
//! Generation itself cannot fail; every error here comes from the two files
//! the document assembler touches or from a rejected configuration.

use squarekit_settings::SettingsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing a G-code document.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The prelude file could not be opened for reading.
    #[error("Cannot open prelude file {}", .path.display())]
    PreludeUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be opened for writing.
    #[error("Cannot open output file {}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to an already opened output failed.
    #[error("Failed to write G-code")]
    WriteFailed(#[from] io::Error),

    /// The configuration was rejected.
    #[error("Invalid configuration")]
    Settings(#[from] SettingsError),
}

impl CamToolError {
    /// Check if this error happened while opening one of the two files
    pub fn is_open_failure(&self) -> bool {
        matches!(
            self,
            CamToolError::PreludeUnreadable { .. } | CamToolError::OutputUnwritable { .. }
        )
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
