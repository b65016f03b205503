use std::collections::{BTreeMap, BTreeSet};

use crate::speech::SpeechSet;
use crate::types::{Segment, TrackKey};

/// The unvisited (source, channel) tracks, ordered lexicographically at both
/// levels. Derived exclusively from the reference collection: a track present
/// only in the hypothesis set is never visited.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrackList {
    pending: BTreeMap<String, BTreeSet<String>>,
}

impl TrackList {
    pub(crate) fn from_references(references: &SpeechSet) -> Self {
        Self {
            pending: references.track_map(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pops the next track to visit: the remaining channels of the current
    /// source come first, then the lexicographically-first remaining source
    /// with its first channel.
    pub(crate) fn pop_next(&mut self, current: Option<&TrackKey>) -> Option<TrackKey> {
        if let Some(cur) = current {
            if let Some(channels) = self.pending.get_mut(&cur.source) {
                let next = channels.pop_first();
                if channels.is_empty() {
                    self.pending.remove(&cur.source);
                }
                if let Some(channel) = next {
                    return Some(TrackKey::new(cur.source.clone(), channel));
                }
            }
        }

        while let Some((source, mut channels)) = self.pending.pop_first() {
            if let Some(channel) = channels.pop_first() {
                if !channels.is_empty() {
                    self.pending.insert(source.clone(), channels);
                }
                return Some(TrackKey::new(source, channel));
            }
        }
        None
    }
}

/// Where the iteration stands. Exhaustion is its own variant so a finished
/// segmentor can never be confused with one holding a cursor.
#[derive(Debug, Clone)]
pub(crate) enum IterationState {
    Active {
        track: TrackKey,
        /// Next unconsumed reference segment for `track`.
        cursor: Segment,
        /// Hypothesis collection floor for the next window: 0 on a track's
        /// first window, the previous window's end afterwards.
        floor_ms: u64,
    },
    Exhausted,
}
