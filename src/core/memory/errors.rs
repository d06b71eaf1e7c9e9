use std::path::PathBuf;

/// Errors produced while configuring, generating or inspecting a ROM
#[derive(Debug)]
pub enum RomError {
    /// Configuration values outside the supported range
    InvalidConfig(String),
    /// File system failure on the given path
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Malformed JSON config or VHDL text
    Parse(String),
    /// A stored word does not encode its own address or is out of range
    InvariantViolation {
        address: usize,
        value: u32,
        reason: String,
    },
    /// Inspected file does not have the expected entity/architecture shape
    Structure(String),
}

impl RomError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RomError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for RomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RomError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            RomError::Io { path, source } => write!(f, "I/O error on '{}': {}", path.display(), source),
            RomError::Parse(msg) => write!(f, "Parse error: {}", msg),
            RomError::InvariantViolation { address, value, reason } => {
                write!(f, "Cell {} holds {}: {}", address, value, reason)
            }
            RomError::Structure(msg) => write!(f, "Unexpected structure: {}", msg),
        }
    }
}

impl std::error::Error for RomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RomError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RomError {
    fn from(err: serde_json::Error) -> Self {
        RomError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let err = RomError::InvalidConfig("word width 40 exceeds 31".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: word width 40 exceeds 31");

        let err = RomError::InvariantViolation {
            address: 3,
            value: 130,
            reason: "low bits encode address 2".to_string(),
        };
        assert_eq!(err.to_string(), "Cell 3 holds 130: low bits encode address 2");
    }

    #[test]
    fn test_io_error_exposes_source() {
        let err = RomError::io(
            "missing/ROM.vhd",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        );
        assert!(err.to_string().contains("missing/ROM.vhd"));
        assert!(err.source().is_some());
    }
}
