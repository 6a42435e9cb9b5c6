//! Time-window chunking of transcript segments.
//!
//! Segments are first filtered down to those with usable offsets, then grouped
//! into contiguous chunks whose accumulated duration stays within a ceiling.
//! A segment longer than the ceiling is never split; it becomes a chunk of its
//! own.

use tracing::debug;

use crate::{
    error::{Result, TubesumError},
    format::format_time,
    types::{RawSegment, TranscriptSegment},
};

/// Default upper bound on a chunk's accumulated duration (5 minutes).
pub const DEFAULT_CHUNK_CEILING_SECS: f64 = 300.0;

/// A contiguous, non-empty run of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    segments: Vec<TranscriptSegment>,
}

impl Chunk {
    /// Returns `None` for an empty segment list.
    pub fn new(segments: Vec<TranscriptSegment>) -> Option<Self> {
        (!segments.is_empty()).then_some(Self { segments })
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn first(&self) -> &TranscriptSegment {
        &self.segments[0]
    }

    pub fn last(&self) -> &TranscriptSegment {
        &self.segments[self.segments.len() - 1]
    }

    /// Sum of the member segments' durations.
    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Segment texts joined by a single space.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Label for the chunk at `index` (0-based), e.g. `Segment 1: 00:00 - 03:20`.
    pub fn label(&self, index: usize) -> String {
        format!(
            "Segment {}: {} - {}",
            index + 1,
            format_time(self.first().start),
            format_time(self.last().end())
        )
    }

    pub fn into_segments(self) -> Vec<TranscriptSegment> {
        self.segments
    }
}

/// Keep only candidates with finite, non-negative `start` and `duration`.
/// Order is preserved.
pub fn filter_segments(candidates: &[RawSegment]) -> Result<Vec<TranscriptSegment>> {
    let valid: Vec<TranscriptSegment> = candidates
        .iter()
        .filter_map(|raw| {
            let segment = raw.to_segment()?;
            (segment.start >= 0.0 && segment.duration >= 0.0).then_some(segment)
        })
        .collect();

    let dropped = candidates.len() - valid.len();
    if dropped > 0 {
        debug!(dropped, kept = valid.len(), "Dropped invalid transcript segments");
    }

    if valid.is_empty() {
        return Err(TubesumError::NoValidSegments);
    }

    Ok(valid)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunker {
    ceiling_secs: f64,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_CEILING_SECS)
    }
}

impl Chunker {
    pub fn new(ceiling_secs: f64) -> Self {
        Self { ceiling_secs }
    }

    pub fn ceiling_secs(&self) -> f64 {
        self.ceiling_secs
    }

    /// Group already-filtered segments into chunks. Every input segment lands
    /// in exactly one chunk, in input order.
    pub fn chunk(&self, segments: Vec<TranscriptSegment>) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current: Vec<TranscriptSegment> = Vec::new();
        let mut current_duration = 0.0;

        for segment in segments {
            if current_duration + segment.duration > self.ceiling_secs && !current.is_empty() {
                chunks.extend(Chunk::new(std::mem::take(&mut current)));
                current_duration = segment.duration;
                current.push(segment);
            } else {
                current_duration += segment.duration;
                current.push(segment);
            }
        }

        chunks.extend(Chunk::new(current));
        chunks
    }

    /// Filter untrusted candidates and chunk the survivors.
    pub fn chunk_raw(&self, candidates: &[RawSegment]) -> Result<Vec<Chunk>> {
        let segments = filter_segments(candidates)?;
        Ok(self.chunk(segments))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn seg(start: f64, duration: f64) -> TranscriptSegment {
        TranscriptSegment::new(format!("t{start}"), start, duration)
    }

    fn raw(value: serde_json::Value) -> RawSegment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn splits_when_ceiling_would_be_exceeded() {
        let segments = vec![seg(0.0, 200.0), seg(200.0, 200.0), seg(400.0, 50.0)];
        let chunks = Chunker::default().chunk(segments.clone());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].segments(), &segments[..1]);
        assert_eq!(chunks[1].segments(), &segments[1..]);
        assert_eq!(chunks[0].label(0), "Segment 1: 00:00 - 03:20");
        assert_eq!(chunks[1].label(1), "Segment 2: 03:20 - 07:30");
    }

    #[test]
    fn filling_exactly_to_the_ceiling_stays_in_one_chunk() {
        let chunks = Chunker::default().chunk(vec![seg(0.0, 150.0), seg(150.0, 150.0)]);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].duration(), 300.0);
    }

    #[test]
    fn oversize_segment_becomes_its_own_chunk() {
        let chunks =
            Chunker::default().chunk(vec![seg(0.0, 900.0), seg(900.0, 10.0), seg(910.0, 1000.0)]);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| !c.segments().is_empty()));
        assert_eq!(chunks[0].segments().len(), 1);
        assert_eq!(chunks[2].segments().len(), 1);
    }

    #[test]
    fn chunks_respect_the_ceiling_unless_single_segment() {
        let durations = [12.5, 80.0, 299.0, 3.0, 150.0, 150.0, 0.0, 64.2, 220.0, 90.0, 1.0];
        let mut start = 0.0;
        let segments: Vec<_> = durations
            .iter()
            .map(|d| {
                let s = seg(start, *d);
                start += d;
                s
            })
            .collect();

        let chunker = Chunker::new(300.0);
        let chunks = chunker.chunk(segments.clone());

        for chunk in &chunks {
            assert!(chunk.duration() <= chunker.ceiling_secs() || chunk.segments().len() == 1);
        }

        let flattened: Vec<_> = chunks.into_iter().flat_map(Chunk::into_segments).collect();
        assert_eq!(flattened, segments);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(Chunker::default().chunk(Vec::new()).is_empty());
        assert!(Chunk::new(Vec::new()).is_none());
    }

    #[test]
    fn custom_ceiling_is_honoured() {
        let chunks = Chunker::new(60.0).chunk(vec![seg(0.0, 30.0), seg(30.0, 31.0), seg(61.0, 29.0)]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].segments().len(), 2);
    }

    #[test]
    fn filter_drops_negative_and_malformed_segments() {
        let candidates = vec![
            raw(json!({"text": "a", "start": 0, "duration": 5})),
            raw(json!({"text": "b", "start": 5, "duration": -1})),
            raw(json!({"text": "c", "start": "nope", "duration": 1})),
            raw(json!({"text": "d", "duration": 1})),
            raw(json!({"text": "e", "start": -3, "duration": 1})),
            raw(json!({"text": "f", "start": "6", "duration": "2"})),
        ];

        let kept = filter_segments(&candidates).unwrap();
        let texts: Vec<_> = kept.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["a", "f"]);
    }

    #[test]
    fn all_invalid_reports_no_valid_segments() {
        let candidates = vec![
            raw(json!({"text": "a", "start": 0, "duration": -1})),
            raw(json!({"text": "b"})),
        ];

        let err = Chunker::default().chunk_raw(&candidates).unwrap_err();
        assert!(matches!(err, TubesumError::NoValidSegments));
    }

    #[test]
    fn chunk_text_joins_with_single_space() {
        let chunk = Chunk::new(vec![
            TranscriptSegment::new("hello", 0.0, 1.0),
            TranscriptSegment::new("world", 1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(chunk.text(), "hello world");
    }
}
