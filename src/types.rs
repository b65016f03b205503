use std::fmt;

use serde::{Deserialize, Serialize};

/// One (source, channel) comparison lane. Tracks order lexicographically,
/// source first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackKey {
    pub source: String,
    pub channel: String,
}

impl TrackKey {
    pub fn new(source: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            channel: channel.into(),
        }
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.channel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub source: String,
    pub channel: String,
    /// Millisecond interval is [start_ms, end_ms), i.e. start inclusive/end exclusive.
    pub start_ms: u64,
    /// Millisecond interval is [start_ms, end_ms), i.e. start inclusive/end exclusive.
    pub end_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Segment {
    pub fn new(
        source: impl Into<String>,
        channel: impl Into<String>,
        start_ms: u64,
        end_ms: u64,
    ) -> Self {
        Self {
            source: source.into(),
            channel: channel.into(),
            start_ms,
            end_ms,
            speaker: None,
            text: None,
        }
    }

    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn track(&self) -> TrackKey {
        TrackKey::new(self.source.clone(), self.channel.clone())
    }

    pub fn on_track(&self, track: &TrackKey) -> bool {
        self.source == track.source && self.channel == track.channel
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// One produced window: the reference-defined span plus every reference and
/// hypothesis segment assigned to it, one inner list per contributing stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowGroup {
    pub track: TrackKey,
    /// Millisecond interval is [start_ms, end_ms), i.e. start inclusive/end exclusive.
    pub start_ms: u64,
    /// Millisecond interval is [start_ms, end_ms), i.e. start inclusive/end exclusive.
    pub end_ms: u64,
    pub references: Vec<Vec<Segment>>,
    pub hypotheses: Vec<Vec<Segment>>,
}

impl WindowGroup {
    pub fn reference_count(&self) -> usize {
        self.references.iter().map(Vec::len).sum()
    }

    pub fn hypothesis_count(&self) -> usize {
        self.hypotheses.iter().map(Vec::len).sum()
    }

    pub fn iter_references(&self) -> impl Iterator<Item = &Segment> {
        self.references.iter().flatten()
    }

    pub fn iter_hypotheses(&self) -> impl Iterator<Item = &Segment> {
        self.hypotheses.iter().flatten()
    }
}
