//! Filament length for an extruded segment
//!
//! The bead is approximated as a rectangle `nozzle_diameter` wide and
//! `layer_thickness` tall swept along the segment. Its volume divided by the
//! filament cross-section gives the length of filament to feed.

use squarekit_core::Point;
use squarekit_settings::PrintSettings;
use std::f64::consts::PI;

/// Converts travel segments into filament lengths ("delta-E")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionCalculator {
    /// Bead width (mm)
    pub nozzle_diameter: f64,
    /// Bead height (mm)
    pub layer_thickness: f64,
    /// Filament diameter (mm)
    pub filament_diameter: f64,
}

impl ExtrusionCalculator {
    pub fn new(nozzle_diameter: f64, layer_thickness: f64, filament_diameter: f64) -> Self {
        Self {
            nozzle_diameter,
            layer_thickness,
            filament_diameter,
        }
    }

    pub fn from_settings(print: &PrintSettings) -> Self {
        Self::new(
            print.nozzle_diameter,
            print.layer_thickness,
            print.filament_diameter,
        )
    }

    /// Cross-section area of the filament (mm²)
    pub fn filament_area(&self) -> f64 {
        PI * (self.filament_diameter * self.filament_diameter / 4.0)
    }

    /// Filament length needed to extrude one layer's bead from `from` to `to`.
    ///
    /// Returns exactly 0 for coincident points.
    pub fn delta_e(&self, from: Point, to: Point) -> f64 {
        let length = from.distance_to(&to);
        let volume = length * self.layer_thickness * self.nozzle_diameter;
        volume / self.filament_area()
    }

    /// [`delta_e`](Self::delta_e) scaled by a flow multiplier
    pub fn scaled_delta_e(&self, from: Point, to: Point, multiplier: f64) -> f64 {
        self.delta_e(from, to) * multiplier
    }
}

impl Default for ExtrusionCalculator {
    fn default() -> Self {
        Self::from_settings(&PrintSettings::default())
    }
}
