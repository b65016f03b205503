use std::sync::Arc;

use crate::error::WindowingError;
use crate::segmentor::traits::OverlapExpander;
use crate::speech::SpeechSet;
use crate::types::{TrackKey, WindowGroup};
use crate::windowing::{
    collect_group, first_segment, IterationState, TrackList, WindowBounds,
};

/// Pull-based window producer over a reference and a hypothesis collection.
/// Tracks are visited one at a time, lexicographically; within a track,
/// windows come out in strictly increasing start order.
pub struct Segmentor {
    expander: Box<dyn OverlapExpander>,
    references: Arc<SpeechSet>,
    hypothesis: Arc<SpeechSet>,
    /// Track set derived from `references`, cached so a reset with the same
    /// collection skips the rebuild.
    track_template: TrackList,
    pending: TrackList,
    state: IterationState,
}

impl Segmentor {
    pub(crate) fn from_parts(
        expander: Box<dyn OverlapExpander>,
        references: Arc<SpeechSet>,
        hypothesis: Arc<SpeechSet>,
    ) -> Result<Self, WindowingError> {
        let track_template = TrackList::from_references(&references);
        let mut segmentor = Self {
            expander,
            references,
            hypothesis,
            track_template,
            pending: TrackList::default(),
            state: IterationState::Exhausted,
        };
        segmentor.seed()?;
        Ok(segmentor)
    }

    /// Restarts iteration on the given collections. The track set is rebuilt
    /// only when `references` is a different collection (by identity) from
    /// the configured one; the hypothesis handle is always replaced.
    pub fn reset(
        &mut self,
        references: Arc<SpeechSet>,
        hypothesis: Arc<SpeechSet>,
    ) -> Result<(), WindowingError> {
        if !Arc::ptr_eq(&self.references, &references) {
            self.track_template = TrackList::from_references(&references);
            self.references = references;
        }
        self.hypothesis = hypothesis;
        self.seed()
    }

    /// Produces the next window and advances the cursor. Fails with
    /// [`WindowingError::Exhausted`] once iteration has completed; check
    /// [`Segmentor::is_exhausted`] to observe that beforehand.
    pub fn next_group(&mut self) -> Result<WindowGroup, WindowingError> {
        let (track, cursor, floor_ms) = match &self.state {
            IterationState::Active {
                track,
                cursor,
                floor_ms,
            } => (track.clone(), cursor.clone(), *floor_ms),
            IterationState::Exhausted => return Err(WindowingError::Exhausted),
        };

        let window_end = self
            .expander
            .window_end(&cursor, self.references.speeches(), &track);
        tracing::debug!(
            track = %track,
            start_ms = cursor.start_ms,
            end_ms = window_end,
            "windowing: expanded window"
        );

        // absence of a further reference segment marks the track's last window
        let next_ref = first_segment(self.references.speeches(), window_end, &track).cloned();
        let bounds = WindowBounds {
            start_ms: cursor.start_ms,
            end_ms: window_end,
            floor_ms,
            ceiling_ms: next_ref.as_ref().map(|_| window_end),
        };
        let group = collect_group(&self.references, &self.hypothesis, &track, &bounds);

        match next_ref {
            Some(seg) => {
                self.state = IterationState::Active {
                    track,
                    cursor: seg,
                    floor_ms: window_end,
                };
            }
            None => {
                self.advance_track(Some(track));
            }
        }

        Ok(group)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, IterationState::Exhausted)
    }

    /// The track the next window will belong to, `None` once exhausted.
    pub fn active_track(&self) -> Option<&TrackKey> {
        match &self.state {
            IterationState::Active { track, .. } => Some(track),
            IterationState::Exhausted => None,
        }
    }

    /// Iterator over the remaining windows; ends cleanly at exhaustion.
    pub fn windows(&mut self) -> Windows<'_> {
        Windows { segmentor: self }
    }

    fn seed(&mut self) -> Result<(), WindowingError> {
        self.pending = self.track_template.clone();
        self.state = IterationState::Exhausted;
        if self.advance_track(None) {
            Ok(())
        } else {
            Err(WindowingError::EmptyReference)
        }
    }

    /// Pops tracks until one yields a cursor segment; false when none remain.
    fn advance_track(&mut self, current: Option<TrackKey>) -> bool {
        let mut current = current;
        while let Some(track) = self.pending.pop_next(current.as_ref()) {
            if let Some(cursor) = first_segment(self.references.speeches(), 0, &track).cloned() {
                tracing::info!(
                    source = %track.source,
                    channel = %track.channel,
                    "windowing: processing track"
                );
                self.state = IterationState::Active {
                    track,
                    cursor,
                    floor_ms: 0,
                };
                return true;
            }
            // every pending track was derived from a reference segment, so a
            // cursor exists unless the collections were swapped mid-flight
            current = Some(track);
        }
        self.state = IterationState::Exhausted;
        false
    }
}

/// Draining iterator handed out by [`Segmentor::windows`].
pub struct Windows<'a> {
    segmentor: &'a mut Segmentor,
}

impl Iterator for Windows<'_> {
    type Item = WindowGroup;

    fn next(&mut self) -> Option<WindowGroup> {
        if self.segmentor.is_exhausted() {
            return None;
        }
        self.segmentor.next_group().ok()
    }
}
