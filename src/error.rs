//! # Error Types
//!
//! Custom error types for Sense Link using `thiserror`.
//!
//! The schema codec itself never fails: an unreadable sensor is a value
//! (`valid = false`), not an error. Errors appear one layer up, at payload
//! assembly, configuration and file I/O.

use thiserror::Error;

/// Main error type for Sense Link
#[derive(Debug, Error)]
pub enum SenseLinkError {
    /// Payload assembly errors (capacity exceeded, short buffer, unknown port)
    #[error("Codec error: {0}")]
    Codec(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Telemetry record serialization errors
    #[error("Telemetry serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Sense Link
pub type Result<T> = std::result::Result<T, SenseLinkError>;
