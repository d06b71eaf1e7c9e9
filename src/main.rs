//! romgen CLI
//!
//! Writes a VHDL ROM whose words carry their own address in the low bits.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check_rom, generate, GenerateArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "romgen")]
#[command(about = "Generate a VHDL ROM filled with address-tagged random words", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the shape and contents of a generated ROM file
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Check { file }) => check_rom(file)?,
        None => generate(&cli.generate)?,
    }

    Ok(())
}
