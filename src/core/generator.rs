use super::config::RomConfig;
use super::memory::{RomContents, RomError};
use super::types::RomGeometry;
use super::vhdl::render_rom;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub path: PathBuf,
    pub entity_name: String,
    pub cells: usize,
    pub bytes_written: usize,
    /// Seed actually used, so an entropy-seeded run can be reproduced
    pub seed: u64,
}

/// Generates ROM descriptions from a validated configuration
pub struct RomGenerator {
    config: RomConfig,
    geometry: RomGeometry,
    seed: u64,
}

impl RomGenerator {
    /// Create a generator from a configuration
    ///
    /// # Arguments
    /// * `config` - The ROM configuration; validated here
    ///
    /// # Returns
    /// A generator with a fixed seed, taken from the configuration or drawn
    /// from OS entropy, or `RomError::InvalidConfig`
    pub fn new(config: RomConfig) -> Result<Self, RomError> {
        let geometry = config.geometry()?;
        let seed = match config.seed {
            Some(seed) => seed,
            None => StdRng::from_entropy().next_u64(),
        };
        debug!(
            "ROM generator ready: {} cells of {} bits, seed {}",
            geometry.cell_count(),
            geometry.word_width(),
            seed
        );
        Ok(Self {
            config,
            geometry,
            seed,
        })
    }

    pub fn config(&self) -> &RomConfig {
        &self.config
    }

    pub fn geometry(&self) -> RomGeometry {
        self.geometry
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the ROM contents from this generator's seed
    pub fn generate_contents(&self) -> RomContents {
        let mut rng = StdRng::seed_from_u64(self.seed);
        RomContents::generate(self.geometry, &mut rng)
    }

    /// VHDL text for the given contents
    pub fn render(&self, contents: &RomContents) -> String {
        render_rom(&self.config.entity_name(), contents)
    }

    /// Generate and write the description to any writer
    ///
    /// # Arguments
    /// * `writer` - Destination; flushed after the text is written
    ///
    /// # Returns
    /// The number of bytes written
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        let text = self.render(&self.generate_contents());
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(text.len())
    }

    /// Generate and write the description to the configured output path
    ///
    /// # Returns
    /// A `GenerationSummary` with the path, entity name, cell count, bytes
    /// written and seed, or `RomError::Io` if the file cannot be created or
    /// written
    ///
    /// # Note
    /// The file is created or truncated. The parent directory must exist. A
    /// write failure leaves whatever was already written in place.
    pub fn write(&self) -> Result<GenerationSummary, RomError> {
        let path = &self.config.output_path;
        let file = File::create(path).map_err(|e| RomError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let bytes_written = self.write_to(&mut writer).map_err(|e| RomError::io(path, e))?;

        let summary = GenerationSummary {
            path: path.clone(),
            entity_name: self.config.entity_name(),
            cells: self.geometry.cell_count(),
            bytes_written,
            seed: self.seed,
        };
        info!(
            "Wrote {} ({} cells, {} bytes) to {}",
            summary.entity_name,
            summary.cells,
            summary.bytes_written,
            summary.path.display()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let result = RomGenerator::new(RomConfig::new().with_word_width(4));
        assert!(matches!(result, Err(RomError::InvalidConfig(_))));
    }

    #[test]
    fn test_seed_is_kept() {
        let generator = RomGenerator::new(RomConfig::new().with_seed(1234)).unwrap();
        assert_eq!(generator.seed(), 1234);
        assert_eq!(generator.generate_contents(), generator.generate_contents());
    }

    #[test]
    fn test_write_to_buffer() {
        let generator = RomGenerator::new(RomConfig::new().with_seed(5)).unwrap();
        let mut buffer = Vec::new();
        let written = generator.write_to(&mut buffer).unwrap();

        assert_eq!(written, buffer.len());
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("entity ROM_64x16 is"));
    }

    #[test]
    fn test_custom_entity_name() {
        let config = RomConfig::new().with_seed(5).with_entity_name("boot_rom");
        let generator = RomGenerator::new(config).unwrap();
        let text = generator.render(&generator.generate_contents());
        assert!(text.contains("entity boot_rom is"));
        assert!(text.contains("architecture rtl of boot_rom is"));
    }
}
