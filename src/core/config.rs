//! Configuration for ROM generation
//!
//! Defaults describe the 64x16 ROM: 16-bit words, 6 address bits and
//! `src/ROM.vhd` as destination. Every field can be overridden through the
//! builder methods or a JSON file.
use crate::core::memory::RomError;
use crate::core::types::RomGeometry;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_WORD_WIDTH: u32 = 16;
pub const DEFAULT_ADDRESS_WIDTH: u32 = 6;
pub const DEFAULT_OUTPUT_PATH: &str = "src/ROM.vhd";

/// Words are stored as VHDL `integer`, so they must stay below 2^31
pub const MAX_WORD_WIDTH: u32 = 31;
pub const MAX_ADDRESS_WIDTH: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RomConfig {
    /// Bit width of each memory cell
    pub word_width: u32,
    /// Bits needed to index all cells
    pub address_width: u32,
    /// Destination of the generated VHDL file
    pub output_path: PathBuf,
    /// Entity name; derived from the geometry when absent
    pub entity_name: Option<String>,
    /// Seed for reproducible contents; entropy is used when absent
    pub seed: Option<u64>,
}

impl RomConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            word_width: DEFAULT_WORD_WIDTH,
            address_width: DEFAULT_ADDRESS_WIDTH,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            entity_name: None,
            seed: None,
        }
    }

    /// Set the bit width of each memory cell
    ///
    /// # Arguments
    /// * `width` - Bits per word, at most `MAX_WORD_WIDTH`
    ///
    /// # Returns
    /// A new configuration with the specified word width
    pub fn with_word_width(mut self, width: u32) -> Self {
        self.word_width = width;
        self
    }

    /// Set the number of address bits
    ///
    /// # Arguments
    /// * `width` - Address bits; the ROM holds `2^width` cells
    ///
    /// # Returns
    /// A new configuration with the specified address width
    ///
    /// # Note
    /// The word width must stay strictly larger than the address width
    pub fn with_address_width(mut self, width: u32) -> Self {
        self.address_width = width;
        self
    }

    /// Set the destination of the generated VHDL file
    ///
    /// # Arguments
    /// * `path` - File to create or truncate; its directory must exist
    ///
    /// # Returns
    /// A new configuration with the specified output path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set the entity name instead of the derived `ROM_<cells>x<width>`
    ///
    /// # Arguments
    /// * `name` - A VHDL basic identifier that is not a reserved word
    ///
    /// # Returns
    /// A new configuration with the specified entity name
    pub fn with_entity_name(mut self, name: &str) -> Self {
        self.entity_name = Some(name.to_string());
        self
    }

    /// Fix the seed so the generated contents are reproducible
    ///
    /// # Arguments
    /// * `seed` - Seed for the `StdRng` that draws the cell values
    ///
    /// # Returns
    /// A new configuration with the specified seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON configuration; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, RomError> {
        let config: RomConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self, RomError> {
        debug!("Loading ROM configuration from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| RomError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Entity name to emit, e.g. `ROM_64x16` for the default geometry
    pub fn entity_name(&self) -> String {
        match &self.entity_name {
            Some(name) => name.clone(),
            None => format!("ROM_{}x{}", 1u64 << self.address_width.min(63), self.word_width),
        }
    }

    /// Check all configuration constraints
    pub fn validate(&self) -> Result<(), RomError> {
        if self.address_width == 0 || self.address_width > MAX_ADDRESS_WIDTH {
            return Err(RomError::InvalidConfig(format!(
                "address width {} must be between 1 and {}",
                self.address_width, MAX_ADDRESS_WIDTH
            )));
        }
        if self.word_width > MAX_WORD_WIDTH {
            return Err(RomError::InvalidConfig(format!(
                "word width {} exceeds {}",
                self.word_width, MAX_WORD_WIDTH
            )));
        }
        if self.word_width <= self.address_width {
            return Err(RomError::InvalidConfig(format!(
                "word width {} must be larger than address width {}",
                self.word_width, self.address_width
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(RomError::InvalidConfig("output path is empty".to_string()));
        }
        if let Some(name) = &self.entity_name {
            if !is_vhdl_identifier(name) {
                return Err(RomError::InvalidConfig(format!(
                    "'{}' is not a valid VHDL identifier",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Validated dimensions of the ROM
    pub fn geometry(&self) -> Result<RomGeometry, RomError> {
        self.validate()?;
        Ok(RomGeometry::new_unchecked(self.word_width, self.address_width))
    }
}

impl Default for RomConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// VHDL-2008 reserved words, which cannot name an entity
pub const VHDL_RESERVED_WORDS: &[&str] = &[
    "abs", "access", "after", "alias", "all", "and", "architecture", "array", "assert",
    "assume", "assume_guarantee", "attribute", "begin", "block", "body", "buffer", "bus",
    "case", "component", "configuration", "constant", "context", "cover", "default",
    "disconnect", "downto", "else", "elsif", "end", "entity", "exit", "fairness", "file",
    "for", "force", "function", "generate", "generic", "group", "guarded", "if", "impure",
    "in", "inertial", "inout", "is", "label", "library", "linkage", "literal", "loop", "map",
    "mod", "nand", "new", "next", "nor", "not", "null", "of", "on", "open", "or", "others",
    "out", "package", "parameter", "port", "postponed", "procedure", "process", "property",
    "protected", "pure", "range", "record", "register", "reject", "release", "rem", "report",
    "restrict", "restrict_guarantee", "return", "rol", "ror", "select", "sequence",
    "severity", "shared", "signal", "sla", "sll", "sra", "srl", "strong", "subtype", "then",
    "to", "transport", "type", "unaffected", "units", "until", "use", "variable", "vmode",
    "vprop", "vunit", "wait", "when", "while", "with", "xnor", "xor",
];

/// VHDL basic identifier: a letter, then letters, digits and single
/// underscores, not ending in an underscore, and not a reserved word
pub fn is_vhdl_identifier(name: &str) -> bool {
    if VHDL_RESERVED_WORDS.iter().any(|word| word.eq_ignore_ascii_case(name)) {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    if name.ends_with('_') || name.contains("__") {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
