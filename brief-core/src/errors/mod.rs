//! Error types and the stable error-code trait.
//!
//! The assessment computation itself never errors on malformed upstream
//! data (safe defaults + warnings); errors exist only at the
//! configuration boundary.

/// Every error in the workspace maps to a stable SCREAMING_SNAKE code.
pub trait BriefErrorCode {
    fn error_code(&self) -> &'static str;
}

/// Errors raised while loading or validating engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid threshold `{field}`: {reason}")]
    InvalidThreshold { field: &'static str, reason: String },
}

impl BriefErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO_ERROR",
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::InvalidThreshold { .. } => "CONFIG_INVALID_THRESHOLD",
        }
    }
}
