//! SquareKit Settings Crate
//!
//! Holds the immutable print configuration: machine and material parameters,
//! shape dimensions, extrusion multipliers, purge and parking moves, and
//! output options.

pub mod config;
pub mod error;

pub use config::{
    Config, ExtrusionSettings, LayerCountMode, OutputSettings, ParkingSettings, PrintSettings,
    PurgeSettings, ShapeSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
