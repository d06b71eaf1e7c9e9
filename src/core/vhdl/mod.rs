pub mod emitter;
pub mod inspector;

pub use emitter::render_rom;
pub use inspector::{inspect_rom, inspect_rom_file, RomReport};
