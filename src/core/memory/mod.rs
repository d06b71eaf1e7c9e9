pub mod contents;
pub mod errors;

// Re-export commonly used types
pub use contents::RomContents;
pub use errors::RomError;
