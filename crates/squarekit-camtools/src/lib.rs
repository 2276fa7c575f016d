//! # SquareKit CAM Tools
//!
//! Toolpath generation for the hollow square prism test print.
//!
//! ## Generators
//!
//! - **Extrusion**: filament length needed to lay a bead along a segment
//! - **Purge**: priming zigzag near the bed origin
//! - **Square**: stacked closed-loop square layers
//!
//! ## Output
//!
//! - **Motion**: G-code instruction records and the text writer
//! - **Document**: prelude passthrough, purge, layers, and parking in one file
//! - **Stats**: per-run summary of moves and filament used

pub mod document;
pub mod error;
pub mod extrusion;
pub mod motion;
pub mod purge;
pub mod square;
pub mod stats;

pub use document::DocumentAssembler;
pub use error::{CamToolError, CamToolResult};
pub use extrusion::ExtrusionCalculator;
pub use motion::{BlockStats, GcodeWriter, Instruction};
pub use purge::{PurgeGenerator, PurgeParameters};
pub use square::{SquareLayerGenerator, SquareParameters};
pub use stats::PrintStats;
