//! Transport encoding of segments for serialization.
//!
//! Segment PCM data is binary; embedding it in a JSON response requires a
//! lossless byte-to-text mapping. Standard-alphabet base64 is used.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::segmenter::Segment;

/// Wire representation of an accepted segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedSegment {
    /// Segment start in seconds.
    pub start: f64,
    /// Segment end in seconds.
    pub end: f64,
    /// Segment length in seconds.
    pub duration: f64,
    /// Classifier strictness level the segment was accepted at.
    pub aggressiveness: u8,
    /// Base64-encoded segment PCM data.
    pub data: String,
}

impl EncodedSegment {
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            duration: segment.duration(),
            aggressiveness: segment.aggressiveness,
            data: BASE64.encode(&segment.data),
        }
    }

    /// Decodes the transport data back to raw PCM bytes.
    pub fn decode_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.data)
    }
}

/// Encodes a run of accepted segments for serialization.
pub fn encode_segments(segments: &[Segment]) -> Vec<EncodedSegment> {
    segments.iter().map(EncodedSegment::from_segment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> Segment {
        Segment {
            start: 1.2,
            end: 4.5,
            data: vec![0u8, 1, 2, 253, 254, 255],
            aggressiveness: 2,
        }
    }

    #[test]
    fn encoding_round_trips_losslessly() {
        let segment = segment();
        let encoded = EncodedSegment::from_segment(&segment);
        assert_eq!(encoded.decode_data().unwrap(), segment.data);
    }

    #[test]
    fn encoded_fields_mirror_the_segment() {
        let segment = segment();
        let encoded = EncodedSegment::from_segment(&segment);

        assert_eq!(encoded.start, 1.2);
        assert_eq!(encoded.end, 4.5);
        assert!((encoded.duration - 3.3).abs() < 1e-12);
        assert_eq!(encoded.aggressiveness, 2);
    }

    #[test]
    fn json_uses_the_wire_field_names() {
        let encoded = EncodedSegment::from_segment(&segment());
        let json = serde_json::to_value(&encoded).unwrap();

        for key in ["start", "end", "duration", "aggressiveness", "data"] {
            assert!(json.get(key).is_some(), "missing field {}", key);
        }
        assert!(json["data"].is_string());
    }

    #[test]
    fn empty_data_encodes_to_empty_string() {
        let segment = Segment {
            start: 0.0,
            end: 0.0,
            data: Vec::new(),
            aggressiveness: 0,
        };
        let encoded = EncodedSegment::from_segment(&segment);
        assert_eq!(encoded.data, "");
        assert!(encoded.decode_data().unwrap().is_empty());
    }

    #[test]
    fn encode_segments_keeps_order() {
        let a = Segment {
            start: 0.0,
            end: 2.0,
            data: vec![1],
            aggressiveness: 0,
        };
        let b = Segment {
            start: 3.0,
            end: 6.0,
            data: vec![2],
            aggressiveness: 1,
        };

        let encoded = encode_segments(&[a, b]);
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded[0].start, 0.0);
        assert_eq!(encoded[1].start, 3.0);
    }
}
