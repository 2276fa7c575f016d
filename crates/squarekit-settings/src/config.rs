//! Configuration for SquareKit
//!
//! The whole print is driven by one immutable [`Config`], built once at
//! startup and passed by reference to every generator. The defaults reproduce
//! the reference test print: a 36 mm square, 5 mm tall, centred at
//! (100, 100), printed with a 0.4 mm nozzle and 1.75 mm filament.
//!
//! Configuration is organized into logical sections:
//! - Print settings (nozzle, layer, filament, feed rates)
//! - Shape settings (center, height, side length, layer count rounding)
//! - Extrusion multipliers
//! - Purge zigzag and parking moves
//! - Output files and number formatting
//!
//! Files may be JSON or TOML; missing sections fall back to the defaults.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use squarekit_core::{NumberFormat, ParameterError, Point};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "squarekit.toml";

/// Machine and material parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Nozzle diameter, used as the bead width (mm)
    pub nozzle_diameter: f64,
    /// Layer thickness (mm)
    pub layer_thickness: f64,
    /// Filament diameter (mm)
    pub filament_diameter: f64,
    /// Feed rate for G0 rapid moves (mm/min)
    pub rapid_feed: u32,
    /// Feed rate for G1 extruding moves (mm/min)
    pub extrude_feed: u32,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            nozzle_diameter: 0.4,
            layer_thickness: 0.2,
            filament_diameter: 1.75,
            rapid_feed: 3000,
            extrude_feed: 1200,
        }
    }
}

/// How a height that is not a multiple of the layer thickness is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerCountMode {
    /// Drop the fractional last layer
    Truncate,
    /// Round to the nearest whole layer
    Round,
}

impl Default for LayerCountMode {
    fn default() -> Self {
        Self::Truncate
    }
}

impl std::fmt::Display for LayerCountMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncate => write!(f, "truncate"),
            Self::Round => write!(f, "round"),
        }
    }
}

/// Square prism dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSettings {
    /// Target height of the prism (mm)
    pub height: f64,
    /// Side length of the square (mm)
    pub side_length: f64,
    /// Layer count rounding
    pub layer_count_mode: LayerCountMode,
    /// Center of the square on the bed (mm)
    pub center: Point,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            height: 5.0,
            side_length: 36.0,
            layer_count_mode: LayerCountMode::Truncate,
            center: Point::new(100.0, 100.0),
        }
    }
}

impl ShapeSettings {
    /// Number of layers needed to reach `height`.
    ///
    /// With [`LayerCountMode::Truncate`] a fractional last layer is dropped,
    /// so the printed part can come out up to one layer short.
    pub fn layer_count(&self, layer_thickness: f64) -> u32 {
        let layers = self.height / layer_thickness;
        match self.layer_count_mode {
            LayerCountMode::Truncate => layers.floor() as u32,
            LayerCountMode::Round => layers.round() as u32,
        }
    }
}

/// Extrusion multipliers applied on top of the raw filament length.
///
/// Both values were tuned for a 0.4 mm nozzle with 1.75 mm filament and
/// should be treated as presets for that pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionSettings {
    /// Purge legs are laid down as a double-width bead
    pub purge_flow_multiplier: f64,
    /// Square walls are laid down 20% wider than the nozzle
    pub wall_flow_multiplier: f64,
}

impl Default for ExtrusionSettings {
    fn default() -> Self {
        Self {
            purge_flow_multiplier: 2.0,
            wall_flow_multiplier: 1.2,
        }
    }
}

/// Zigzag used to prime the nozzle before the part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeSettings {
    /// Length of each zigzag leg along X and Y (mm)
    pub leg_length: f64,
    /// Number of up/down-right pairs
    pub repetitions: u32,
    /// Where the zigzag starts (mm)
    pub start: Point,
}

impl Default for PurgeSettings {
    fn default() -> Self {
        Self {
            leg_length: 10.0,
            repetitions: 8,
            start: Point::new(10.0, 10.0),
        }
    }
}

/// Parking move at the end of the print
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingSettings {
    /// Z height used while travelling to the park position (mm)
    pub safe_z: f64,
    /// Z height lowered to once parked (mm)
    pub final_z: f64,
    /// Off-bed park position (mm)
    pub position: Point,
}

impl Default for ParkingSettings {
    fn default() -> Self {
        Self {
            safe_z: 20.0,
            final_z: 0.0,
            position: Point::new(-33.0, -10.0),
        }
    }
}

/// Input/output files and text formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Prelude copied verbatim to the head of the output
    pub prelude_path: PathBuf,
    /// Generated G-code file
    pub output_path: PathBuf,
    /// Number formatting style
    pub number_format: NumberFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            prelude_path: PathBuf::from("params.gcode"),
            output_path: PathBuf::from("square.gcode"),
            number_format: NumberFormat::Compat,
        }
    }
}

/// Complete print configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Machine and material parameters
    pub print: PrintSettings,
    /// Prism dimensions
    pub shape: ShapeSettings,
    /// Flow multipliers
    pub extrusion: ExtrusionSettings,
    /// Priming zigzag
    pub purge: PurgeSettings,
    /// End-of-print parking
    pub parking: ParkingSettings,
    /// Files and formatting
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived number of layers for this configuration
    pub fn layer_count(&self) -> u32 {
        self.shape.layer_count(self.print.layer_thickness)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                )
                .into())
            }
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load config from `path` if it exists, otherwise use the defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            info!("Using configuration file {}", path.display());
            Self::load_from_file(path)
        } else {
            debug!("No {} found, using built-in defaults", path.display());
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                )
                .into())
            }
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// Rejects values that would make the extrusion math divide by zero or
    /// collapse the square onto a point.
    pub fn validate(&self) -> SettingsResult<()> {
        let p = &self.print;
        positive("print.nozzle_diameter", p.nozzle_diameter)?;
        positive("print.layer_thickness", p.layer_thickness)?;
        positive("print.filament_diameter", p.filament_diameter)?;
        positive("print.rapid_feed", p.rapid_feed as f64)?;
        positive("print.extrude_feed", p.extrude_feed as f64)?;

        let s = &self.shape;
        non_negative("shape.height", s.height)?;
        positive("shape.side_length", s.side_length)?;
        finite("shape.center.x", s.center.x)?;
        finite("shape.center.y", s.center.y)?;

        let e = &self.extrusion;
        non_negative("extrusion.purge_flow_multiplier", e.purge_flow_multiplier)?;
        non_negative("extrusion.wall_flow_multiplier", e.wall_flow_multiplier)?;

        positive("purge.leg_length", self.purge.leg_length)?;
        finite("purge.start.x", self.purge.start.x)?;
        finite("purge.start.y", self.purge.start.y)?;
        if self.purge.repetitions == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "purge.repetitions".to_string(),
                value: self.purge.repetitions.to_string(),
            }
            .into());
        }

        finite("parking.safe_z", self.parking.safe_z)?;
        finite("parking.final_z", self.parking.final_z)?;
        finite("parking.position.x", self.parking.position.x)?;
        finite("parking.position.y", self.parking.position.y)?;

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn finite(name: &str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NotFinite {
            name: name.to_string(),
        })
    }
}

fn positive(name: &str, value: f64) -> Result<(), ParameterError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive {
            name: name.to_string(),
            value,
        })
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), ParameterError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::Negative {
            name: name.to_string(),
            value,
        })
    }
}
