//! Recursive adaptive-aggressiveness refinement.
//!
//! Bounds segment duration by re-running the frame generator and trigger
//! collector over any over-long segment with a stricter classifier. A
//! stricter classifier partitions ambiguous or continuous speech into
//! shorter voiced runs; the depth limit guarantees termination.

use crate::error::Result;
use crate::segmenter::collector::collect_segments;
use crate::segmenter::frame::FrameGenerator;
use crate::segmenter::segment::Segment;
use crate::segmenter::EngineConfig;
use crate::vad::ClassifierFactory;

/// Segments `region` at the given aggressiveness, recursing into any result
/// that is still at or above the maximum duration.
///
/// A region that cannot be segmented within the configured number of levels
/// is dropped entirely; that is a deliberate lossy policy, not a failure.
/// Accepted segments keep the collector's emission order, with recursive
/// results spliced in place of the segment they refine.
pub fn refine(
    config: &EngineConfig,
    factory: &dyn ClassifierFactory,
    region: &Segment,
    aggressiveness: u8,
) -> Result<Vec<Segment>> {
    if aggressiveness >= config.max_aggressiveness {
        return Ok(Vec::new());
    }

    let mut classifier = factory.make_classifier(aggressiveness)?;
    let frames = FrameGenerator::new(&region.data, region.start, config);
    let produced = collect_segments(config, classifier.as_mut(), frames)?;

    let mut accepted = Vec::new();
    for mut segment in produced {
        if segment.duration() < config.max_segment_secs {
            segment.aggressiveness = aggressiveness;
            accepted.push(segment);
        } else {
            accepted.extend(refine(config, factory, &segment, aggressiveness + 1)?);
        }
    }
    Ok(accepted)
}
