//! Generate Command
//!
//! Builds the configuration from an optional JSON file plus flags, then
//! writes the ROM description.

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use romgen::{RomConfig, RomGenerator};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// JSON configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Destination of the VHDL file [default: src/ROM.vhd]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Bits per memory word [default: 16]
    #[arg(short, long)]
    word_width: Option<u32>,

    /// Address bits; the ROM holds 2^N words [default: 6]
    #[arg(short, long)]
    address_width: Option<u32>,

    /// Seed for reproducible contents
    #[arg(short, long)]
    seed: Option<u64>,

    /// Entity name [default: ROM_<cells>x<word width>]
    #[arg(short = 'n', long = "entity", value_name = "NAME")]
    entity: Option<String>,

    /// Print the description instead of writing a file
    #[arg(long)]
    stdout: bool,
}

impl GenerateArgs {
    fn to_config(&self) -> Result<RomConfig> {
        let mut config = match &self.config {
            Some(path) => RomConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => RomConfig::default(),
        };

        if let Some(output) = &self.output {
            config = config.with_output_path(output);
        }
        if let Some(width) = self.word_width {
            config = config.with_word_width(width);
        }
        if let Some(width) = self.address_width {
            config = config.with_address_width(width);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(name) = &self.entity {
            config = config.with_entity_name(name);
        }
        Ok(config)
    }
}

pub fn generate(args: &GenerateArgs) -> Result<()> {
    let generator = RomGenerator::new(args.to_config()?).context("Invalid ROM configuration")?;

    if args.stdout {
        let mut out = std::io::stdout().lock();
        generator
            .write_to(&mut out)
            .context("Failed to write ROM description to stdout")?;
        return Ok(());
    }

    let summary = generator.write().context("Failed to write ROM description")?;
    info!("Contents seed: {} (pass --seed to reproduce)", summary.seed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = GenerateArgs {
            output: Some(PathBuf::from("build/rom.vhd")),
            address_width: Some(4),
            seed: Some(3),
            ..Default::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.output_path, PathBuf::from("build/rom.vhd"));
        assert_eq!(config.address_width, 4);
        assert_eq!(config.word_width, 16);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_no_flags_gives_default_config() {
        let config = GenerateArgs::default().to_config().unwrap();
        assert_eq!(config, RomConfig::default());
    }
}
