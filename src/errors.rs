//! # Error Types Module
//!
//! Errors raised at the edges of the crate: decoding records handed over by the
//! document store and reading configuration. The matching and aggregation cores
//! never fail; they report "cannot compare" as data instead.

/// Errors for record ingestion and configuration
#[derive(Debug, Clone, PartialEq)]
pub enum PantryError {
    /// A record could not be decoded into the expected shape
    InvalidRecord(String),
    /// A configuration value could not be interpreted
    InvalidConfig {
        /// The configuration key (usually an environment variable name)
        key: String,
        /// The rejected value
        value: String,
    },
    /// Reading a record file failed
    Io(String),
}

impl std::fmt::Display for PantryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PantryError::InvalidRecord(msg) => write!(f, "Invalid record: {msg}"),
            PantryError::InvalidConfig { key, value } => {
                write!(f, "Invalid configuration value for {key}: '{value}'")
            }
            PantryError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for PantryError {}

impl From<serde_json::Error> for PantryError {
    fn from(err: serde_json::Error) -> Self {
        PantryError::InvalidRecord(err.to_string())
    }
}

impl From<std::io::Error> for PantryError {
    fn from(err: std::io::Error) -> Self {
        PantryError::Io(err.to_string())
    }
}
