//! Check Command
//!
//! Reads a generated ROM back and verifies its structure and cell values.

use anyhow::{Context, Result};
use log::info;
use romgen::inspect_rom_file;
use std::path::Path;

pub fn check_rom(path: &Path) -> Result<()> {
    let report = inspect_rom_file(path)
        .with_context(|| format!("Failed to read ROM description: {}", path.display()))?;

    let geometry = report
        .verify()
        .with_context(|| format!("{} is not a valid generated ROM", path.display()))?;

    info!(
        "{}: OK ({} cells of {} bits)",
        path.display(),
        geometry.cell_count(),
        geometry.word_width()
    );
    Ok(())
}
