use std::collections::{BTreeMap, BTreeSet};

use crate::speech::Speech;

/// A collection of transcript streams: the reference set or the hypothesis
/// set. Stream registration order is the tie-break order for lookups.
#[derive(Debug, Clone, Default)]
pub struct SpeechSet {
    speeches: Vec<Speech>,
}

impl SpeechSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_speeches(speeches: Vec<Speech>) -> Self {
        Self { speeches }
    }

    pub fn push(&mut self, speech: Speech) {
        self.speeches.push(speech);
    }

    pub fn speeches(&self) -> &[Speech] {
        &self.speeches
    }

    pub fn len(&self) -> usize {
        self.speeches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeches.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.speeches.iter().map(Speech::len).sum()
    }

    /// Every source observed across all streams, each mapped to its observed
    /// channels. Ordered lexicographically at both levels.
    pub fn track_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for speech in &self.speeches {
            for seg in speech.segments() {
                map.entry(seg.source.clone())
                    .or_default()
                    .insert(seg.channel.clone());
            }
        }
        map
    }
}
