use crate::speech::SpeechSet;
use crate::types::{TrackKey, WindowGroup};

/// Collection bounds for one window. The window span itself is
/// `[start_ms, end_ms)`; hypothesis collection uses the wider
/// `[floor_ms, ceiling_ms)` range so that segments starting before reference
/// coverage or in an inter-window gap land in the following window, and
/// trailing segments land in the track's last window (`ceiling_ms: None`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowBounds {
    pub start_ms: u64,
    pub end_ms: u64,
    pub floor_ms: u64,
    pub ceiling_ms: Option<u64>,
}

/// Pulls every reference and hypothesis segment assigned to the window into
/// a fresh group, one inner list per stream. A stream contributing zero
/// segments is omitted, not pushed as an empty entry.
pub(crate) fn collect_group(
    references: &SpeechSet,
    hypothesis: &SpeechSet,
    track: &TrackKey,
    bounds: &WindowBounds,
) -> WindowGroup {
    let mut group = WindowGroup {
        track: track.clone(),
        start_ms: bounds.start_ms,
        end_ms: bounds.end_ms,
        references: Vec::new(),
        hypotheses: Vec::new(),
    };

    for speech in references.speeches() {
        let segs = speech.segments_in_range(bounds.start_ms, Some(bounds.end_ms), track);
        if !segs.is_empty() {
            group.references.push(segs.into_iter().cloned().collect());
        }
    }

    for speech in hypothesis.speeches() {
        let segs = speech.segments_in_range(bounds.floor_ms, bounds.ceiling_ms, track);
        if !segs.is_empty() {
            group.hypotheses.push(segs.into_iter().cloned().collect());
        }
    }

    tracing::debug!(
        track = %track,
        start_ms = bounds.start_ms,
        end_ms = bounds.end_ms,
        references = group.reference_count(),
        hypotheses = group.hypothesis_count(),
        "windowing: collected group"
    );

    group
}
