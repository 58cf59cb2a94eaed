//! Default configuration constants for vadsplit.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech processing and is the only rate the
/// engine operates at; the decoder resamples everything else down to it.
pub const SAMPLE_RATE: u32 = 16000;

/// Bytes per PCM sample (16-bit mono).
pub const BYTES_PER_SAMPLE: u32 = 2;

/// Duration of a single classifier frame in milliseconds.
///
/// WebRTC-style classifiers accept 10, 20 or 30ms frames; 30ms gives the
/// smoothest trigger behavior for offline segmentation.
pub const FRAME_DURATION_MS: u32 = 30;

/// Duration of the sliding trigger window in milliseconds.
///
/// The window pads segment starts with the audio that was already in flight
/// when the trigger fired, so soft onsets are not clipped.
pub const PADDING_DURATION_MS: u32 = 300;

/// Maximum accepted segment duration in seconds.
///
/// Segments longer than this are re-segmented with a stricter classifier
/// instead of being returned as-is.
pub const MAX_SEGMENT_SECS: f64 = 15.0;

/// Minimum accepted segment duration in seconds.
///
/// Segments at or below this length are treated as noise and dropped from
/// the final result.
pub const MIN_SEGMENT_SECS: f64 = 2.0;

/// Number of classifier aggressiveness levels (0 through 3).
///
/// A region that is still over-long after the strictest level is dropped.
pub const MAX_AGGRESSIVENESS: u8 = 4;

/// Fraction of the trigger window that must agree before a state change.
///
/// The same ratio gates both the voiced trigger and the unvoiced detrigger;
/// the shared threshold is the hysteresis that stops the state machine from
/// flapping at noise boundaries.
pub const TRIGGER_RATIO: f64 = 0.7;

/// Per-level normalized RMS thresholds for the energy classifier.
///
/// Indexed by aggressiveness; each level doubles the energy a frame needs
/// to count as voiced.
pub const ENERGY_THRESHOLDS: [f64; 4] = [0.010, 0.020, 0.040, 0.080];

/// Default listen address for the HTTP upload endpoint.
pub const LISTEN_ADDR: &str = "127.0.0.1:8009";

/// Default transcoder binary used to decode uploads to raw PCM.
pub const FFMPEG_BIN: &str = "ffmpeg";

/// Maximum accepted upload size in bytes.
pub const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_constants_are_consistent() {
        // One frame of 16-bit mono audio at the default rate
        let frame_bytes = SAMPLE_RATE * FRAME_DURATION_MS / 1000 * BYTES_PER_SAMPLE;
        assert_eq!(frame_bytes, 960);
        // The padding window holds a whole number of frames
        assert_eq!(PADDING_DURATION_MS % FRAME_DURATION_MS, 0);
    }

    #[test]
    fn energy_thresholds_increase_with_level() {
        for pair in ENERGY_THRESHOLDS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
