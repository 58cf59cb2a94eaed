//! Frame slicing for the segmentation engine.
//!
//! A `Frame` is a fixed-duration view into a PCM buffer together with its
//! position on the timeline. `FrameGenerator` produces them lazily.

use crate::segmenter::EngineConfig;

/// Fixed-duration slice of 16-bit mono PCM with a timeline position.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Raw little-endian PCM bytes, exactly one frame long.
    pub bytes: &'a [u8],
    /// Seconds from the start of the original signal to this frame's start.
    pub timestamp: f64,
    /// Frame duration in seconds, constant for all frames.
    pub duration: f64,
}

/// Lazy, single-pass iterator of fixed-duration frames over a PCM buffer.
///
/// Timestamps advance by a constant per-frame increment rather than being
/// recomputed from the byte offset, so accumulated values stay consistent
/// across all frames of a run. The trailing partial frame, if any, is
/// dropped. A buffer shorter than one frame yields nothing.
pub struct FrameGenerator<'a> {
    data: &'a [u8],
    frame_len: usize,
    frame_secs: f64,
    offset: usize,
    timestamp: f64,
}

impl<'a> FrameGenerator<'a> {
    /// Creates a generator over `data`, with the first frame stamped at
    /// `start` seconds.
    pub fn new(data: &'a [u8], start: f64, config: &EngineConfig) -> Self {
        Self {
            data,
            frame_len: config.frame_bytes(),
            frame_secs: config.frame_secs(),
            offset: 0,
            timestamp: start,
        }
    }
}

impl<'a> Iterator for FrameGenerator<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        if self.offset + self.frame_len > self.data.len() {
            return None;
        }

        let frame = Frame {
            bytes: &self.data[self.offset..self.offset + self.frame_len],
            timestamp: self.timestamp,
            duration: self.frame_secs,
        };
        self.offset += self.frame_len;
        self.timestamp += self.frame_secs;
        Some(frame)
    }
}
