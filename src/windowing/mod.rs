mod collect;
mod cursor;
mod expand;

pub use expand::{HeapExpander, RescanExpander};

pub(crate) use collect::{collect_group, WindowBounds};
pub(crate) use cursor::{IterationState, TrackList};

use crate::speech::Speech;
use crate::types::{Segment, TrackKey};

/// Earliest segment at/after `time` across all streams for `track`: the
/// globally minimal start time wins. Ties go to the first registered stream
/// (the comparison is strict, so an equal start never replaces the holder).
pub(crate) fn first_segment<'a>(
    speeches: &'a [Speech],
    time: u64,
    track: &TrackKey,
) -> Option<&'a Segment> {
    let mut found: Option<&Segment> = None;
    for speech in speeches {
        if let Some(seg) = speech.next_segment(time, track) {
            if found.map_or(true, |best| seg.start_ms < best.start_ms) {
                found = Some(seg);
            }
        }
    }
    found
}
