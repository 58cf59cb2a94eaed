//! Windowed trigger collector.
//!
//! Turns a classified frame sequence into speech segments using a sliding
//! window over recent classifications. The state machine has two states and
//! uses the same majority ratio for both transitions; the shared threshold
//! is the hysteresis that keeps it from flapping at noise boundaries.

use std::collections::VecDeque;

use crate::defaults;
use crate::error::Result;
use crate::segmenter::frame::Frame;
use crate::segmenter::segment::Segment;
use crate::segmenter::EngineConfig;
use crate::vad::SpeechClassifier;

/// Collector trigger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerState {
    /// Waiting for enough voiced frames to start a segment.
    NotTriggered,
    /// Accumulating frames into the current segment.
    Triggered,
}

/// Sliding-window hysteresis state machine over classified frames.
///
/// The window holds the most recent `(frame, is_speech)` pairs, bounded by
/// the padding duration. Trigger and detrigger both compare against the
/// window *capacity*, not its current length, so the collector cannot fire
/// before a full window's worth of evidence has been seen.
pub struct TriggerCollector<'a> {
    capacity: usize,
    state: TriggerState,
    window: VecDeque<(Frame<'a>, bool)>,
    voiced: Vec<Frame<'a>>,
}

impl<'a> TriggerCollector<'a> {
    pub fn new(config: &EngineConfig) -> Self {
        let capacity = config.window_frames();
        Self {
            capacity,
            state: TriggerState::NotTriggered,
            window: VecDeque::with_capacity(capacity),
            voiced: Vec::new(),
        }
    }

    /// Feeds one classified frame; returns a finished segment on detrigger.
    pub fn push(&mut self, frame: Frame<'a>, is_speech: bool) -> Option<Segment> {
        match self.state {
            TriggerState::NotTriggered => {
                if self.window.len() == self.capacity {
                    self.window.pop_front();
                }
                self.window.push_back((frame, is_speech));

                let num_voiced = self.window.iter().filter(|(_, speech)| *speech).count();
                if num_voiced as f64 > defaults::TRIGGER_RATIO * self.capacity as f64 {
                    self.state = TriggerState::Triggered;
                    // The segment starts with the audio already in the window.
                    for (buffered, _) in self.window.drain(..) {
                        self.voiced.push(buffered);
                    }
                }
                None
            }
            TriggerState::Triggered => {
                self.voiced.push(frame);
                if self.window.len() == self.capacity {
                    self.window.pop_front();
                }
                self.window.push_back((frame, is_speech));

                let num_unvoiced = self.window.iter().filter(|(_, speech)| !*speech).count();
                if num_unvoiced as f64 > defaults::TRIGGER_RATIO * self.capacity as f64 {
                    self.state = TriggerState::NotTriggered;
                    self.window.clear();
                    let segment = Segment::from_frames(&self.voiced);
                    self.voiced.clear();
                    return segment;
                }
                None
            }
        }
    }

    /// Flushes any accumulated frames at end of input.
    ///
    /// The final segment is emitted regardless of the voiced ratio in the
    /// last partial window, which can include trailing near-silence.
    pub fn finish(self) -> Option<Segment> {
        if self.voiced.is_empty() {
            None
        } else {
            Segment::from_frames(&self.voiced)
        }
    }
}

/// Classifies and collects a frame sequence in a single pass.
///
/// Classifier failures abort the run; the frame sequence is consumed either
/// way and cannot be replayed.
pub fn collect_segments<'a>(
    config: &EngineConfig,
    classifier: &mut dyn SpeechClassifier,
    frames: impl Iterator<Item = Frame<'a>>,
) -> Result<Vec<Segment>> {
    let mut collector = TriggerCollector::new(config);
    let mut segments = Vec::new();

    for frame in frames {
        let is_speech = classifier.is_speech(frame.bytes, config.sample_rate)?;
        if let Some(segment) = collector.push(frame, is_speech) {
            segments.push(segment);
        }
    }

    if let Some(segment) = collector.finish() {
        segments.push(segment);
    }

    Ok(segments)
}
