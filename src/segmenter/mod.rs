//! Segmentation engine.
//!
//! Splits a decoded mono 16-bit PCM buffer into time-bounded speech
//! segments: the frame generator slices the buffer, the trigger collector
//! finds voiced runs, and the refiner re-segments over-long runs with a
//! progressively stricter classifier.

pub mod collector;
pub mod frame;
pub mod refiner;
pub mod segment;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Result, VadSplitError};
use crate::vad::ClassifierFactory;

pub use frame::{Frame, FrameGenerator};
pub use segment::Segment;

/// Engine configuration, fixed for the lifetime of an [`Engine`].
///
/// Passed explicitly into the engine rather than read from globals, so
/// tests can run with alternative parameters (e.g. a shorter maximum
/// duration).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// PCM sample rate in Hz.
    pub sample_rate: u32,
    /// Classifier frame duration in milliseconds.
    pub frame_duration_ms: u32,
    /// Sliding trigger window duration in milliseconds.
    pub padding_duration_ms: u32,
    /// Maximum accepted segment duration in seconds.
    pub max_segment_secs: f64,
    /// Minimum accepted segment duration in seconds.
    pub min_segment_secs: f64,
    /// Number of classifier strictness levels (recursion depth limit).
    pub max_aggressiveness: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
            frame_duration_ms: defaults::FRAME_DURATION_MS,
            padding_duration_ms: defaults::PADDING_DURATION_MS,
            max_segment_secs: defaults::MAX_SEGMENT_SECS,
            min_segment_secs: defaults::MIN_SEGMENT_SECS,
            max_aggressiveness: defaults::MAX_AGGRESSIVENESS,
        }
    }
}

impl EngineConfig {
    /// Byte length of one frame of 16-bit mono PCM.
    pub fn frame_bytes(&self) -> usize {
        (defaults::BYTES_PER_SAMPLE * self.sample_rate * self.frame_duration_ms / 1000) as usize
    }

    /// Frame duration in seconds.
    pub fn frame_secs(&self) -> f64 {
        self.frame_duration_ms as f64 / 1000.0
    }

    /// Trigger window capacity in frames (floor division, at least 1).
    pub fn window_frames(&self) -> usize {
        ((self.padding_duration_ms / self.frame_duration_ms) as usize).max(1)
    }

    /// Checks the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(VadSplitError::ConfigInvalidValue {
                key: "engine.sample_rate".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.frame_duration_ms == 0 {
            return Err(VadSplitError::ConfigInvalidValue {
                key: "engine.frame_duration_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.frame_bytes() == 0 {
            return Err(VadSplitError::ConfigInvalidValue {
                key: "engine.frame_duration_ms".to_string(),
                message: format!(
                    "one frame at {} Hz is shorter than a sample",
                    self.sample_rate
                ),
            });
        }
        if self.max_segment_secs <= self.min_segment_secs {
            return Err(VadSplitError::ConfigInvalidValue {
                key: "engine.max_segment_secs".to_string(),
                message: format!(
                    "must be greater than min_segment_secs ({})",
                    self.min_segment_secs
                ),
            });
        }
        if self.max_aggressiveness == 0 || self.max_aggressiveness > defaults::MAX_AGGRESSIVENESS {
            return Err(VadSplitError::ConfigInvalidValue {
                key: "engine.max_aggressiveness".to_string(),
                message: format!("must be between 1 and {}", defaults::MAX_AGGRESSIVENESS),
            });
        }
        Ok(())
    }
}

/// Segmentation engine entry point.
///
/// Single-threaded and synchronous: one call segments one complete PCM
/// buffer. The classifier factory is the only external capability; it is
/// shared so a server can reuse one engine across requests.
pub struct Engine {
    config: EngineConfig,
    factory: Arc<dyn ClassifierFactory>,
}

impl Engine {
    /// Creates an engine, validating the configuration.
    pub fn new(config: EngineConfig, factory: Arc<dyn ClassifierFactory>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, factory })
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Segments a complete mono 16-bit PCM buffer.
    ///
    /// Returns accepted segments sorted by start time, with segments at or
    /// below the minimum duration dropped. Empty input or all-silence input
    /// is a valid run with an empty result, never an error.
    pub fn segment(&self, pcm: Vec<u8>) -> Result<Vec<Segment>> {
        let bytes_per_sec = self.config.sample_rate as f64 * defaults::BYTES_PER_SAMPLE as f64;
        let total_secs = pcm.len() as f64 / bytes_per_sec;

        let root = Segment {
            start: 0.0,
            end: total_secs,
            data: pcm,
            aggressiveness: 0,
        };

        let mut segments = refiner::refine(&self.config, self.factory.as_ref(), &root, 0)?;
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        segments.retain(|s| s.duration() > self.config.min_segment_secs);
        Ok(segments)
    }
}
