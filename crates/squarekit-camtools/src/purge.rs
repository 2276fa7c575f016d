//! Purge zigzag
//!
//! Primes the nozzle before the part with a run of "up, then down-right"
//! legs along the front of the bed:
//!
//! ```text
//!  ^\  ^\  ^\
//!  | \ | \ | \  ...
//!  |  \|  \|  \
//! start
//! ```
//!
//! Each leg extrudes with the purge flow multiplier. The block ends with an
//! extrusion counter reset so the part starts counting from zero.

use crate::extrusion::ExtrusionCalculator;
use crate::motion::{render_block, Instruction};
use squarekit_core::{NumberFormat, Point};
use squarekit_settings::Config;
use std::iter;
use tracing::debug;

/// Parameters for the purge zigzag
#[derive(Debug, Clone, PartialEq)]
pub struct PurgeParameters {
    /// First point of the zigzag (mm)
    pub start: Point,
    /// Leg length along X and Y (mm)
    pub leg_length: f64,
    /// Number of up/down-right pairs
    pub repetitions: u32,
    /// Z height the purge is printed at (mm)
    pub z: f64,
    /// Multiplier on the raw filament length
    pub flow_multiplier: f64,
    /// Feed for the approach move (mm/min)
    pub rapid_feed: u32,
    /// Feed for the purge legs (mm/min)
    pub extrude_feed: u32,
}

impl PurgeParameters {
    pub fn from_config(config: &Config) -> Self {
        Self {
            start: config.purge.start,
            leg_length: config.purge.leg_length,
            repetitions: config.purge.repetitions,
            z: config.print.layer_thickness,
            flow_multiplier: config.extrusion.purge_flow_multiplier,
            rapid_feed: config.print.rapid_feed,
            extrude_feed: config.print.extrude_feed,
        }
    }
}

/// Generator for the purge block
#[derive(Debug, Clone)]
pub struct PurgeGenerator {
    params: PurgeParameters,
    calculator: ExtrusionCalculator,
}

impl PurgeGenerator {
    pub fn new(params: PurgeParameters, calculator: ExtrusionCalculator) -> Self {
        Self { params, calculator }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PurgeParameters::from_config(config),
            ExtrusionCalculator::from_settings(&config.print),
        )
    }

    pub fn params(&self) -> &PurgeParameters {
        &self.params
    }

    /// Segments of the zigzag in print order, as `(from, to)` pairs
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let leg = self.params.leg_length;
        // Each pair starts where the previous down-right leg ended
        iter::successors(Some(self.params.start), move |p| Some(p.offset(leg, 0.0)))
            .take(self.params.repetitions as usize)
            .flat_map(move |base| {
                let top = base.offset(0.0, leg);
                let bottom = base.offset(leg, 0.0);
                [(base, top), (top, bottom)]
            })
    }

    /// Extruding moves with the running extrusion total
    pub fn moves(&self) -> impl Iterator<Item = Instruction> + '_ {
        let p = &self.params;
        self.segments()
            .map(move |(from, to)| {
                let delta = self.calculator.scaled_delta_e(from, to, p.flow_multiplier);
                (to, delta)
            })
            .scan(0.0_f64, move |e, (to, delta)| {
                *e += delta;
                Some(Instruction::Extrude {
                    to,
                    e: *e,
                    feed: p.extrude_feed,
                })
            })
    }

    /// Full purge block: approach, zigzag, extrusion reset
    pub fn instructions(&self) -> impl Iterator<Item = Instruction> + '_ {
        let p = &self.params;
        debug!(
            "Purge: {} repetitions of {} mm legs from {}",
            p.repetitions, p.leg_length, p.start
        );
        iter::once(Instruction::rapid(p.start, p.z, p.rapid_feed))
            .chain(iter::once(Instruction::Blank))
            .chain(self.moves())
            .chain(iter::once(Instruction::ResetExtrusion))
    }

    /// Generate the purge block as G-code text
    pub fn generate(&self, style: NumberFormat) -> String {
        render_block(self.instructions(), style)
    }
}
