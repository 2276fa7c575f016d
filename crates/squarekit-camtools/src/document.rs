//! Document assembly
//!
//! Lays out the output file in this order:
//! 1. the prelude, copied byte for byte
//! 2. the purge zigzag and a blank line
//! 3. the approach move onto the first corner
//! 4. the square layers
//! 5. the parking moves
//!
//! Both files are opened before anything is written. If the prelude cannot
//! be opened the output file is never created.

use crate::error::{CamToolError, CamToolResult};
use crate::motion::{GcodeWriter, Instruction};
use crate::purge::PurgeGenerator;
use crate::square::SquareLayerGenerator;
use crate::stats::PrintStats;
use squarekit_settings::Config;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Builds the complete G-code document for one configuration
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    config: Config,
    purge: PurgeGenerator,
    square: SquareLayerGenerator,
}

impl DocumentAssembler {
    /// Create an assembler, rejecting configurations the generators cannot handle
    pub fn new(config: Config) -> CamToolResult<Self> {
        config.validate()?;
        let purge = PurgeGenerator::from_config(&config);
        let square = SquareLayerGenerator::from_config(&config);
        Ok(Self {
            config,
            purge,
            square,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn purge(&self) -> &PurgeGenerator {
        &self.purge
    }

    pub fn square(&self) -> &SquareLayerGenerator {
        &self.square
    }

    /// Travel to the park position at safe height, then lower Z
    pub fn parking(&self) -> impl Iterator<Item = Instruction> {
        let park = &self.config.parking;
        [
            Instruction::Rapid {
                to: park.position,
                z: park.safe_z,
                feed: None,
                comment: None,
            },
            Instruction::RapidZ { z: park.final_z },
            Instruction::Blank,
        ]
        .into_iter()
    }

    /// Write the document to `out`, copying `prelude` first
    pub fn write_to<R, W>(&self, prelude: &mut R, out: W) -> CamToolResult<PrintStats>
    where
        R: Read + ?Sized,
        W: Write,
    {
        let mut writer = GcodeWriter::new(out, self.config.output.number_format);

        let prelude_bytes = io::copy(prelude, writer.get_mut())?;
        debug!("Copied {} prelude bytes", prelude_bytes);

        let purge = writer.write_block(self.purge.instructions())?;
        writer.write_instruction(&Instruction::Blank)?;

        writer.write_instruction(&self.square.approach())?;
        writer.write_instruction(&Instruction::Blank)?;
        let walls = writer.write_block(self.square.layers())?;

        writer.write_block(self.parking())?;
        writer.flush()?;

        Ok(PrintStats::new(prelude_bytes, &purge, &walls))
    }

    /// Render the document in memory
    pub fn render(&self, prelude: &[u8]) -> CamToolResult<Vec<u8>> {
        let mut out = Vec::new();
        let mut reader = prelude;
        self.write_to(&mut reader, &mut out)?;
        Ok(out)
    }

    /// Read `prelude_path` and write the document to `output_path`
    pub fn assemble(&self, prelude_path: &Path, output_path: &Path) -> CamToolResult<PrintStats> {
        let mut prelude =
            File::open(prelude_path).map_err(|source| CamToolError::PreludeUnreadable {
                path: prelude_path.to_path_buf(),
                source,
            })?;

        let output =
            File::create(output_path).map_err(|source| CamToolError::OutputUnwritable {
                path: output_path.to_path_buf(),
                source,
            })?;

        let stats = self.write_to(&mut prelude, BufWriter::new(output))?;
        info!("Wrote {}: {}", output_path.display(), stats);
        Ok(stats)
    }

    /// [`assemble`](Self::assemble) with the paths from the configuration
    pub fn assemble_files(&self) -> CamToolResult<PrintStats> {
        let output = &self.config.output;
        self.assemble(&output.prelude_path, &output.output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squarekit_core::NumberFormat;

    fn assembler() -> DocumentAssembler {
        DocumentAssembler::new(Config::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = Config::default();
        config.print.filament_diameter = 0.0;
        assert!(matches!(
            DocumentAssembler::new(config).unwrap_err(),
            CamToolError::Settings(_)
        ));
    }

    #[test]
    fn test_prelude_is_copied_verbatim() {
        let prelude = b"; start\r\nM104 S210\n\x00\xff";
        let out = assembler().render(prelude).unwrap();
        assert!(out.starts_with(prelude));
        assert_eq!(out[prelude.len()..].first(), Some(&b'G'));
    }

    #[test]
    fn test_document_sections_in_order() {
        let out = assembler().render(b"").unwrap();
        let text = String::from_utf8(out).unwrap();

        let reset = text.find("G92 E0.0\n\nG0 X82 Y82 Z0.2 F3000;\n\nG1 X118 Y82 E").unwrap();
        let park = text.find("G0 X-33 Y-10 Z20\nG0 Z0\n\n").unwrap();
        assert!(reset < park);
        assert!(text.starts_with("G0 X10 Y10 Z0.2 F3000\n\nG1 X10 Y20 E"));
        assert!(text.ends_with("G0 Z5.2\n\nG0 X-33 Y-10 Z20\nG0 Z0\n\n"));
    }

    #[test]
    fn test_stats() {
        let mut out = Vec::new();
        let stats = assembler().write_to(&mut &b"M82\n"[..], &mut out).unwrap();
        assert_eq!(stats.prelude_bytes, 4);
        assert_eq!(stats.purge_moves, 16);
        assert_eq!(stats.layers, 25);
        assert_eq!(stats.wall_moves, 100);
        assert!(stats.purge_filament > 0.0);
        assert!(stats.wall_filament > stats.purge_filament);
        assert!((stats.final_z - 5.2).abs() < 1e-9);
    }

    #[test]
    fn test_shortest_number_format() {
        let mut config = Config::default();
        config.output.number_format = NumberFormat::Shortest;
        let text = String::from_utf8(DocumentAssembler::new(config).unwrap().render(b"").unwrap())
            .unwrap();
        assert!(text.contains("G0 Z0.6000000000000001\n"));
    }

    #[test]
    fn test_parking_uses_config() {
        let mut config = Config::default();
        config.parking.safe_z = 30.0;
        config.parking.final_z = 1.5;
        let assembler = DocumentAssembler::new(config).unwrap();
        let lines: Vec<String> = assembler
            .parking()
            .map(|i| i.render(NumberFormat::Compat))
            .collect();
        assert_eq!(lines, vec!["G0 X-33 Y-10 Z30", "G0 Z1.5", ""]);
    }
}
