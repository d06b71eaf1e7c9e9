pub mod config;
pub mod generator;
pub mod memory;
pub mod types;
pub mod vhdl;
