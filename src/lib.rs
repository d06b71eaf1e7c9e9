pub mod core;

// Re-export commonly used types
pub use crate::core::config::RomConfig;
pub use crate::core::generator::{GenerationSummary, RomGenerator};
pub use crate::core::memory::{RomContents, RomError};
pub use crate::core::types::{EntityPort, PortDirection, RomGeometry};
pub use crate::core::vhdl::{inspect_rom, inspect_rom_file, render_rom, RomReport};
