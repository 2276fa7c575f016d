//! Summary of a generated print

use crate::motion::BlockStats;
use std::fmt;

/// Moves and filament for one generated document
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrintStats {
    /// Bytes copied from the prelude
    pub prelude_bytes: u64,
    /// Purge `G1` lines
    pub purge_moves: usize,
    /// Filament fed during the purge (mm)
    pub purge_filament: f64,
    /// Layers printed
    pub layers: usize,
    /// Wall `G1` lines
    pub wall_moves: usize,
    /// Filament fed for the walls (mm)
    pub wall_filament: f64,
    /// Z height after the last layer (mm)
    pub final_z: f64,
}

impl PrintStats {
    pub fn new(prelude_bytes: u64, purge: &BlockStats, walls: &BlockStats) -> Self {
        Self {
            prelude_bytes,
            purge_moves: purge.extrude_moves,
            purge_filament: purge.last_e.unwrap_or(0.0),
            layers: walls.z_moves,
            wall_moves: walls.extrude_moves,
            wall_filament: walls.last_e.unwrap_or(0.0),
            final_z: walls.last_z.unwrap_or(0.0),
        }
    }

    /// Total filament including the purge (mm)
    pub fn total_filament(&self) -> f64 {
        self.purge_filament + self.wall_filament
    }
}

impl fmt::Display for PrintStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} layers, {} wall moves, {} purge moves, {:.2} mm filament ({:.2} mm purge)",
            self.layers,
            self.wall_moves,
            self.purge_moves,
            self.total_filament(),
            self.purge_filament
        )
    }
}
