//! Voiced/unvoiced frame classification.
//!
//! The engine only needs a per-frame yes/no answer; everything about how
//! that answer is produced lives behind the `SpeechClassifier` trait. The
//! production implementation wraps the WebRTC VAD, with an RMS energy
//! threshold as a dependency-free alternative.

use webrtc_vad::{SampleRate, Vad, VadMode};

use crate::defaults;
use crate::error::{Result, VadSplitError};

/// Per-frame voiced/unvoiced predicate.
///
/// `is_speech` is a synchronous, blocking call over one frame's raw PCM
/// bytes. Implementations may keep internal state across calls but must not
/// change their answer for identical input within one run.
pub trait SpeechClassifier {
    /// Classifies one frame of 16-bit little-endian mono PCM.
    fn is_speech(&mut self, frame: &[u8], sample_rate: u32) -> Result<bool>;
}

/// Creates classifiers at a requested strictness level.
///
/// Higher aggressiveness biases the classifier toward reporting non-speech.
/// Levels outside 0..=3 are a contract violation and return an error.
pub trait ClassifierFactory: Send + Sync {
    /// Builds a classifier configured for `aggressiveness` (0..=3).
    fn make_classifier(&self, aggressiveness: u8) -> Result<Box<dyn SpeechClassifier>>;

    /// Short backend name for logs and diagnostics.
    fn name(&self) -> &'static str;
}

fn decode_samples(frame: &[u8]) -> Result<Vec<i16>> {
    if frame.len() % 2 != 0 {
        return Err(VadSplitError::Classifier {
            message: format!(
                "frame of {} bytes is not a whole number of samples",
                frame.len()
            ),
        });
    }
    Ok(frame
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// WebRTC VAD wrapper.
pub struct WebRtcClassifier {
    vad: Vad,
    sample_rate: u32,
}

impl SpeechClassifier for WebRtcClassifier {
    fn is_speech(&mut self, frame: &[u8], sample_rate: u32) -> Result<bool> {
        if sample_rate != self.sample_rate {
            return Err(VadSplitError::Classifier {
                message: format!(
                    "classifier configured for {} Hz, frame claims {} Hz",
                    self.sample_rate, sample_rate
                ),
            });
        }
        let samples = decode_samples(frame)?;
        self.vad
            .is_voice_segment(&samples)
            .map_err(|_| VadSplitError::Classifier {
                message: format!(
                    "unsupported frame of {} samples at {} Hz",
                    samples.len(),
                    sample_rate
                ),
            })
    }
}

/// Factory for WebRTC VAD classifiers at a fixed sample rate.
#[derive(Debug, Clone, Copy)]
pub struct WebRtcClassifierFactory {
    sample_rate: u32,
}

impl WebRtcClassifierFactory {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl ClassifierFactory for WebRtcClassifierFactory {
    fn make_classifier(&self, aggressiveness: u8) -> Result<Box<dyn SpeechClassifier>> {
        let mode = match aggressiveness {
            0 => VadMode::Quality,
            1 => VadMode::LowBitrate,
            2 => VadMode::Aggressive,
            3 => VadMode::VeryAggressive,
            value => return Err(VadSplitError::InvalidAggressiveness { value }),
        };
        let rate = match self.sample_rate {
            8000 => SampleRate::Rate8kHz,
            16000 => SampleRate::Rate16kHz,
            32000 => SampleRate::Rate32kHz,
            48000 => SampleRate::Rate48kHz,
            other => {
                return Err(VadSplitError::Classifier {
                    message: format!("unsupported sample rate: {} Hz", other),
                });
            }
        };
        Ok(Box::new(WebRtcClassifier {
            vad: Vad::new_with_rate_and_mode(rate, mode),
            sample_rate: self.sample_rate,
        }))
    }

    fn name(&self) -> &'static str {
        "webrtc"
    }
}

/// Calculates the normalized Root Mean Square of a frame's samples.
///
/// 0.0 is silence, ~0.707 a full-scale sine wave, 1.0 maximum amplitude.
pub fn calculate_rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples
        .iter()
        .map(|&sample| {
            let normalized = sample as f64 / i16::MAX as f64;
            normalized * normalized
        })
        .sum();

    (sum_squares / samples.len() as f64).sqrt()
}

/// Energy-threshold classifier: a frame is voiced when its normalized RMS
/// exceeds the level's threshold.
pub struct EnergyClassifier {
    threshold: f64,
}

impl SpeechClassifier for EnergyClassifier {
    fn is_speech(&mut self, frame: &[u8], _sample_rate: u32) -> Result<bool> {
        let samples = decode_samples(frame)?;
        Ok(calculate_rms(&samples) > self.threshold)
    }
}

/// Factory for energy classifiers with one RMS threshold per level.
#[derive(Debug, Clone, Copy)]
pub struct EnergyClassifierFactory {
    thresholds: [f64; defaults::MAX_AGGRESSIVENESS as usize],
}

impl EnergyClassifierFactory {
    /// Creates a factory with the default per-level thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(defaults::ENERGY_THRESHOLDS)
    }

    /// Creates a factory with explicit per-level thresholds.
    ///
    /// A negative threshold makes that level classify every frame as
    /// voiced, which is useful in tests.
    pub fn with_thresholds(thresholds: [f64; defaults::MAX_AGGRESSIVENESS as usize]) -> Self {
        Self { thresholds }
    }
}

impl Default for EnergyClassifierFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierFactory for EnergyClassifierFactory {
    fn make_classifier(&self, aggressiveness: u8) -> Result<Box<dyn SpeechClassifier>> {
        let threshold = self
            .thresholds
            .get(aggressiveness as usize)
            .copied()
            .ok_or(VadSplitError::InvalidAggressiveness {
                value: aggressiveness,
            })?;
        Ok(Box::new(EnergyClassifier { threshold }))
    }

    fn name(&self) -> &'static str {
        "energy"
    }
}

/// Scripted classifier for testing: answers per frame, in order.
///
/// Frames past the end of the script are reported unvoiced.
pub struct ScriptedClassifier {
    answers: Vec<bool>,
    position: usize,
}

impl ScriptedClassifier {
    pub fn new(answers: Vec<bool>) -> Self {
        Self {
            answers,
            position: 0,
        }
    }
}

impl SpeechClassifier for ScriptedClassifier {
    fn is_speech(&mut self, _frame: &[u8], _sample_rate: u32) -> Result<bool> {
        let answer = self.answers.get(self.position).copied().unwrap_or(false);
        self.position += 1;
        Ok(answer)
    }
}

/// Classifier that fails on every frame, for error-path testing.
pub struct FailingClassifier;

impl SpeechClassifier for FailingClassifier {
    fn is_speech(&mut self, _frame: &[u8], _sample_rate: u32) -> Result<bool> {
        Err(VadSplitError::Classifier {
            message: "scripted classifier failure".to_string(),
        })
    }
}
