//! vadsplit - Speech segment extraction using recursive voice activity detection
//!
//! Splits decoded PCM audio into time-bounded speech segments, re-segmenting
//! over-long regions with a progressively stricter classifier.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod cli;
pub mod config;
pub mod decode;
pub mod defaults;
pub mod error;
pub mod segmenter;
pub mod server;
pub mod transport;
pub mod vad;
pub mod wav;

// Core types (decode → segment → encode)
pub use decode::{Decoder, FfmpegDecoder};
pub use segmenter::{Engine, EngineConfig, Segment};
pub use transport::EncodedSegment;
pub use vad::{ClassifierFactory, EnergyClassifierFactory, SpeechClassifier, WebRtcClassifierFactory};

// Error handling
pub use error::{Result, VadSplitError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
