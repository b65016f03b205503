use crate::types::{Segment, TrackKey};

/// One transcript stream: the segments of a single logical track, kept
/// sorted by start time. Read-only once constructed.
#[derive(Debug, Clone, Default)]
pub struct Speech {
    segments: Vec<Segment>,
}

impl Speech {
    /// Builds a stream from arbitrary-order segments. Sorting is stable, so
    /// segments with equal starts keep their input order. Degenerate
    /// segments (`end_ms <= start_ms`) carry no time span and are discarded.
    pub fn from_segments(mut segments: Vec<Segment>) -> Self {
        let before = segments.len();
        segments.retain(|s| s.end_ms > s.start_ms);
        if segments.len() < before {
            tracing::warn!(
                dropped = before - segments.len(),
                "speech: discarding zero-length segments"
            );
        }
        segments.sort_by_key(|s| s.start_ms);
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Earliest segment (by start time) on `track` still open at `time`,
    /// i.e. with `end_ms > time`. A segment straddling `time` qualifies;
    /// one ending exactly at `time` does not.
    pub fn next_segment(&self, time: u64, track: &TrackKey) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| s.on_track(track) && s.end_ms > time)
    }

    /// Segments on `track` whose start lies in `[floor, ceiling)`, in start
    /// order. `None` ceiling means unbounded.
    pub fn segments_in_range(
        &self,
        floor: u64,
        ceiling: Option<u64>,
        track: &TrackKey,
    ) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| {
                s.on_track(track)
                    && s.start_ms >= floor
                    && ceiling.map_or(true, |c| s.start_ms < c)
            })
            .collect()
    }
}
