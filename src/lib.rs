//! # SquareKit
//!
//! Generates G-code for a hollow square prism test print on an FDM printer:
//! a priming zigzag near the bed origin, then a stack of square walls around
//! a center point, then a parking move.
//!
//! ## Architecture
//!
//! SquareKit is organized as a workspace with multiple crates:
//!
//! 1. **squarekit-core** - Points, errors, G-code number formatting
//! 2. **squarekit-settings** - Print configuration, JSON/TOML files, validation
//! 3. **squarekit-camtools** - Extrusion math, purge and layer generators, document assembly
//! 4. **squarekit** - Binary that reads `params.gcode` and writes `square.gcode`

use anyhow::Context;
use std::path::Path;
use tracing::info;

pub use squarekit_camtools::{
    CamToolError, DocumentAssembler, ExtrusionCalculator, GcodeWriter, Instruction, PrintStats,
    PurgeGenerator, SquareLayerGenerator,
};
pub use squarekit_core::{format_number, NumberFormat, Point};
pub use squarekit_settings::{config::DEFAULT_CONFIG_FILE, Config, LayerCountMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so generated files and stdout stay clean
/// - RUST_LOG environment variable support
/// - Info level by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Generate the print using `squarekit.toml` from the working directory when
/// present, the built-in defaults otherwise
pub fn run() -> anyhow::Result<PrintStats> {
    let config = Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
        .context("Failed to load configuration")?;
    run_with_config(config)
}

/// Generate the print described by `config`
pub fn run_with_config(config: Config) -> anyhow::Result<PrintStats> {
    info!("SquareKit {} (built {})", VERSION, BUILD_DATE);
    info!(
        "Square {} mm at {}, {} mm tall, {} layers of {} mm",
        config.shape.side_length,
        config.shape.center,
        config.shape.height,
        config.layer_count(),
        config.print.layer_thickness
    );

    let assembler = DocumentAssembler::new(config)?;
    let stats = assembler.assemble_files()?;
    Ok(stats)
}
