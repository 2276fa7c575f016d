//! G-code instruction records and the text writer
//!
//! Generators produce [`Instruction`]s; only [`GcodeWriter`] knows how they
//! look as text. Numbers go through [`format_number`] so the whole document
//! shares one formatting style.

use squarekit_core::{format_number, NumberFormat, Point};
use std::io::{self, Write};

/// One line of the generated program
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `G0 X.. Y.. Z.. [F..][;comment]`
    Rapid {
        to: Point,
        z: f64,
        feed: Option<u32>,
        comment: Option<String>,
    },
    /// `G0 Z..`
    RapidZ { z: f64 },
    /// `G1 X.. Y.. E.. F..`, `e` is the cumulative extrusion total
    Extrude { to: Point, e: f64, feed: u32 },
    /// `G92 E0.0`
    ResetExtrusion,
    /// Empty line
    Blank,
}

impl Instruction {
    /// Rapid XYZ move with a feed rate
    pub fn rapid(to: Point, z: f64, feed: u32) -> Self {
        Instruction::Rapid {
            to,
            z,
            feed: Some(feed),
            comment: None,
        }
    }

    /// Render without the trailing newline
    pub fn render(&self, style: NumberFormat) -> String {
        let n = |v: f64| format_number(v, style);
        match self {
            Instruction::Rapid {
                to,
                z,
                feed,
                comment,
            } => {
                let mut line = format!("G0 X{} Y{} Z{}", n(to.x), n(to.y), n(*z));
                if let Some(feed) = feed {
                    line.push_str(&format!(" F{}", feed));
                }
                if let Some(comment) = comment {
                    line.push(';');
                    line.push_str(comment);
                }
                line
            }
            Instruction::RapidZ { z } => format!("G0 Z{}", n(*z)),
            Instruction::Extrude { to, e, feed } => {
                format!("G1 X{} Y{} E{} F{}", n(to.x), n(to.y), n(*e), feed)
            }
            Instruction::ResetExtrusion => "G92 E0.0".to_string(),
            Instruction::Blank => String::new(),
        }
    }

    pub fn is_extrusion(&self) -> bool {
        matches!(self, Instruction::Extrude { .. })
    }
}

/// Counters gathered while writing one block of instructions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockStats {
    /// Number of `G1` lines
    pub extrude_moves: usize,
    /// Number of Z-only rapid moves
    pub z_moves: usize,
    /// Number of lines written, blank lines included
    pub lines: usize,
    /// Last cumulative extrusion value seen
    pub last_e: Option<f64>,
    /// Last Z height seen
    pub last_z: Option<f64>,
}

impl BlockStats {
    fn observe(&mut self, instruction: &Instruction) {
        self.lines += 1;
        match instruction {
            Instruction::Extrude { e, .. } => {
                self.extrude_moves += 1;
                self.last_e = Some(*e);
            }
            Instruction::RapidZ { z } => {
                self.z_moves += 1;
                self.last_z = Some(*z);
            }
            Instruction::Rapid { z, .. } => self.last_z = Some(*z),
            Instruction::ResetExtrusion | Instruction::Blank => {}
        }
    }
}

/// Writes instructions as newline-terminated G-code text
pub struct GcodeWriter<W: Write> {
    inner: W,
    style: NumberFormat,
}

impl<W: Write> GcodeWriter<W> {
    pub fn new(inner: W, style: NumberFormat) -> Self {
        Self { inner, style }
    }

    /// Write raw bytes as-is
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    pub fn write_instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
        writeln!(self.inner, "{}", instruction.render(self.style))
    }

    /// Write every instruction of a block, returning its counters
    pub fn write_block<I>(&mut self, instructions: I) -> io::Result<BlockStats>
    where
        I: IntoIterator<Item = Instruction>,
    {
        let mut stats = BlockStats::default();
        for instruction in instructions {
            self.write_instruction(&instruction)?;
            stats.observe(&instruction);
        }
        Ok(stats)
    }

    /// Access the underlying writer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Render a block of instructions to a string
pub fn render_block<I>(instructions: I, style: NumberFormat) -> String
where
    I: IntoIterator<Item = Instruction>,
{
    instructions
        .into_iter()
        .map(|i| i.render(style) + "\n")
        .collect()
}
