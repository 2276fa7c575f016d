//! Stacked square layers
//!
//! The square is axis aligned around its center. Corners are numbered
//! counter-clockwise from the lower-left one:
//!
//! ```text
//!  c4 ---- c3
//!  |        |
//!  c1 ---- c2
//! ```
//!
//! The nozzle is parked on `c1` by the approach move, so every layer visits
//! `c2, c3, c4, c1` and closes the loop without an extra positioning move.
//! All four sides have the same length, so one delta-E computed on `c1 -> c2`
//! is reused for every move.

use crate::extrusion::ExtrusionCalculator;
use crate::motion::{render_block, Instruction};
use squarekit_core::{NumberFormat, Point};
use squarekit_settings::Config;
use tracing::debug;

/// Parameters for the square layer generator
#[derive(Debug, Clone, PartialEq)]
pub struct SquareParameters {
    /// Center of the square (mm)
    pub center: Point,
    /// Side length (mm)
    pub side_length: f64,
    /// Z step between layers, also the first layer height (mm)
    pub layer_thickness: f64,
    /// Number of layers to print
    pub layer_count: u32,
    /// Multiplier on the raw filament length
    pub flow_multiplier: f64,
    /// Feed for the approach move (mm/min)
    pub rapid_feed: u32,
    /// Feed for wall moves (mm/min)
    pub extrude_feed: u32,
}

impl SquareParameters {
    pub fn from_config(config: &Config) -> Self {
        Self {
            center: config.shape.center,
            side_length: config.shape.side_length,
            layer_thickness: config.print.layer_thickness,
            layer_count: config.layer_count(),
            flow_multiplier: config.extrusion.wall_flow_multiplier,
            rapid_feed: config.print.rapid_feed,
            extrude_feed: config.print.extrude_feed,
        }
    }
}

/// Generator for the layered square walls
#[derive(Debug, Clone)]
pub struct SquareLayerGenerator {
    params: SquareParameters,
    calculator: ExtrusionCalculator,
}

impl SquareLayerGenerator {
    pub fn new(params: SquareParameters, calculator: ExtrusionCalculator) -> Self {
        Self { params, calculator }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SquareParameters::from_config(config),
            ExtrusionCalculator::from_settings(&config.print),
        )
    }

    pub fn params(&self) -> &SquareParameters {
        &self.params
    }

    /// Corners `[c1, c2, c3, c4]`, counter-clockwise from the lower-left
    pub fn corners(&self) -> [Point; 4] {
        let side = self.params.side_length;
        let c1 = self.params.center.offset(-side / 2.0, -side / 2.0);
        [
            c1,
            c1.offset(side, 0.0),
            c1.offset(side, side),
            c1.offset(0.0, side),
        ]
    }

    /// Visiting order for one layer: `c2, c3, c4, c1`
    pub fn perimeter(&self) -> [Point; 4] {
        let [c1, c2, c3, c4] = self.corners();
        [c2, c3, c4, c1]
    }

    /// Filament per side, computed once from the first side
    pub fn side_delta_e(&self) -> f64 {
        let [c1, c2, ..] = self.corners();
        self.calculator
            .scaled_delta_e(c1, c2, self.params.flow_multiplier)
    }

    /// Rapid move onto `c1` at the first layer height
    pub fn approach(&self) -> Instruction {
        let [c1, ..] = self.corners();
        Instruction::Rapid {
            to: c1,
            z: self.params.layer_thickness,
            feed: Some(self.params.rapid_feed),
            comment: Some(String::new()),
        }
    }

    /// Layer passes, one Z step after each.
    ///
    /// The extrusion total keeps growing across layers and Z is accumulated
    /// by repeated addition of the layer thickness.
    pub fn layers(&self) -> impl Iterator<Item = Instruction> + '_ {
        let p = &self.params;
        let perimeter = self.perimeter();
        let delta = self.side_delta_e();
        debug!(
            "Square: {} layers, side {} mm around {}, {:.5} mm filament per side",
            p.layer_count, p.side_length, p.center, delta
        );

        (0..p.layer_count)
            .scan((0.0_f64, p.layer_thickness), move |(e, z), _| {
                let mut pass = Vec::with_capacity(perimeter.len() + 2);
                for to in perimeter {
                    *e += delta;
                    pass.push(Instruction::Extrude {
                        to,
                        e: *e,
                        feed: p.extrude_feed,
                    });
                }
                *z += p.layer_thickness;
                pass.push(Instruction::RapidZ { z: *z });
                pass.push(Instruction::Blank);
                Some(pass)
            })
            .flatten()
    }

    /// Generate the layer passes as G-code text
    pub fn generate(&self, style: NumberFormat) -> String {
        render_block(self.layers(), style)
    }
}
