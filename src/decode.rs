//! Audio decoding via the external ffmpeg transcoder.
//!
//! The engine only understands mono 16-bit little-endian PCM at its
//! configured sample rate; everything else (containers, codecs, channel
//! mixing, resampling) is ffmpeg's job. Input is streamed over stdin and
//! raw PCM is read back from stdout, so nothing touches the filesystem.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Result, VadSplitError};

/// Decodes arbitrary audio bytes to raw engine-rate PCM.
#[async_trait]
pub trait Decoder: Send + Sync {
    /// Decodes `input` to mono 16-bit little-endian PCM.
    async fn decode(&self, input: Vec<u8>) -> Result<Vec<u8>>;
}

/// Decoder that shells out to the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegDecoder {
    ffmpeg_path: String,
    sample_rate: u32,
}

impl FfmpegDecoder {
    pub fn new(ffmpeg_path: impl Into<String>, sample_rate: u32) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            sample_rate,
        }
    }
}

#[async_trait]
impl Decoder for FfmpegDecoder {
    async fn decode(&self, input: Vec<u8>) -> Result<Vec<u8>> {
        let rate = self.sample_rate.to_string();
        let mut child = Command::new(&self.ffmpeg_path)
            .args([
                "-hide_banner",
                "-loglevel",
                "error",
                "-i",
                "pipe:0",
                "-f",
                "s16le",
                "-acodec",
                "pcm_s16le",
                "-ac",
                "1",
                "-ar",
                rate.as_str(),
                "pipe:1",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    VadSplitError::DecoderNotFound {
                        tool: self.ffmpeg_path.clone(),
                    }
                } else {
                    VadSplitError::DecodeFailed {
                        message: format!("failed to start {}: {}", self.ffmpeg_path, e),
                    }
                }
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| VadSplitError::DecodeFailed {
            message: "decoder stdin unavailable".to_string(),
        })?;

        // Feed stdin and drain stdout concurrently; writing the whole
        // input first would deadlock once the pipe buffers fill up. A
        // write error just means the decoder quit early, which the exit
        // status reports more usefully.
        let feed = async {
            let _ = stdin.write_all(&input).await;
            let _ = stdin.shutdown().await;
            drop(stdin);
        };
        let (output, ()) = tokio::join!(child.wait_with_output(), feed);
        let output = output.map_err(|e| VadSplitError::DecodeFailed {
            message: format!("decoder did not finish: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VadSplitError::DecodeFailed {
                message: format!(
                    "{} exited with {}: {}",
                    self.ffmpeg_path,
                    output.status,
                    stderr.trim()
                ),
            });
        }

        Ok(output.stdout)
    }
}

/// Mock decoder for testing: passes input through unchanged, or fails.
#[derive(Debug, Clone, Default)]
pub struct MockDecoder {
    should_fail: bool,
}

impl MockDecoder {
    /// Creates a pass-through mock (input is treated as already-decoded PCM).
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    /// Configures the mock to fail on decode.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

#[async_trait]
impl Decoder for MockDecoder {
    async fn decode(&self, input: Vec<u8>) -> Result<Vec<u8>> {
        if self.should_fail {
            Err(VadSplitError::DecodeFailed {
                message: "mock decode failure".to_string(),
            })
        } else {
            Ok(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_maps_to_decoder_not_found() {
        let decoder = FfmpegDecoder::new("definitely-not-a-real-transcoder", 16000);
        let result = decoder.decode(vec![0u8; 16]).await;
        assert!(matches!(
            result,
            Err(VadSplitError::DecoderNotFound { tool }) if tool == "definitely-not-a-real-transcoder"
        ));
    }

    #[tokio::test]
    async fn nonzero_exit_maps_to_decode_failed() {
        // `false` accepts no input and exits 1, standing in for a decoder
        // that rejects the payload
        let decoder = FfmpegDecoder::new("false", 16000);
        let result = decoder.decode(vec![0u8; 16]).await;
        assert!(matches!(result, Err(VadSplitError::DecodeFailed { .. })));
    }

    #[tokio::test]
    async fn mock_decoder_passes_through() {
        let decoder = MockDecoder::new();
        let input = vec![1u8, 2, 3, 4];
        let output = decoder.decode(input.clone()).await.unwrap();
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn mock_decoder_failure() {
        let decoder = MockDecoder::new().with_failure();
        let result = decoder.decode(vec![0u8; 4]).await;
        assert!(matches!(result, Err(VadSplitError::DecodeFailed { .. })));
    }
}
