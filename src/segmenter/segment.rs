//! Speech segment type produced by the segmentation engine.

use crate::segmenter::frame::Frame;

/// A contiguous, time-bounded run of voiced frames with its PCM data.
///
/// `data` is the byte-exact concatenation of the contained frames in order
/// and is exclusively owned by the segment; no two segments share backing
/// storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start of the segment in seconds (timestamp of the first frame).
    pub start: f64,
    /// End of the segment in seconds (timestamp of the last frame).
    pub end: f64,
    /// Concatenated PCM bytes of all contained frames.
    pub data: Vec<u8>,
    /// Classifier strictness level at which this segment was accepted.
    pub aggressiveness: u8,
}

impl Segment {
    /// Builds a segment from an in-order run of frames.
    ///
    /// Returns `None` for an empty run.
    pub fn from_frames(frames: &[Frame]) -> Option<Self> {
        let first = frames.first()?;
        let last = frames.last()?;

        let mut data = Vec::with_capacity(frames.len() * first.bytes.len());
        for frame in frames {
            data.extend_from_slice(frame.bytes);
        }

        Some(Self {
            start: first.timestamp,
            end: last.timestamp,
            data,
            aggressiveness: 0,
        })
    }

    /// Segment length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
