//! CLI Commands

mod check;
mod generate;

pub use check::check_rom;
pub use generate::{generate, GenerateArgs};
