//! Error types for vadsplit.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VadSplitError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Decoder errors
    #[error("Audio decoder not found: {tool}")]
    DecoderNotFound { tool: String },

    #[error("Audio decode failed: {message}")]
    DecodeFailed { message: String },

    // Classifier errors
    #[error("Classifier error: {message}")]
    Classifier { message: String },

    #[error("Invalid classifier aggressiveness: {value}")]
    InvalidAggressiveness { value: u8 },

    // Request errors (HTTP endpoint)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    // WAV export errors
    #[error("WAV write failed: {0}")]
    Wav(#[from] hound::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VadSplitError>;
