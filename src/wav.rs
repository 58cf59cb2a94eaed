//! WAV container export for segment PCM data.
//!
//! Accepted segments carry headerless PCM; wrapping them in a WAV container
//! makes them playable and inspectable with ordinary audio tools.

use std::io::Cursor;
use std::path::Path;

use crate::error::Result;

/// Wraps raw mono 16-bit little-endian PCM in a WAV container.
pub fn wav_bytes(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for sample in pcm.chunks_exact(2) {
        writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

/// Writes raw PCM to `path` as a WAV file.
pub fn write_wav(path: &Path, pcm: &[u8], sample_rate: u32) -> Result<()> {
    std::fs::write(path, wav_bytes(pcm, sample_rate)?)?;
    Ok(())
}
