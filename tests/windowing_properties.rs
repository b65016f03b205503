use std::collections::BTreeSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use transcript_windowing::{
    ExpansionKind, Segment, SegmentorBuilder, Speech, SpeechSet, TrackKey, WindowGroup,
};

const RANDOM_ROUNDS: u64 = 12;
const MAX_STREAMS_PER_SET: usize = 3;
const MAX_SEGMENTS_PER_STREAM: usize = 40;
const TIME_HORIZON_MS: u64 = 2_000;
const MAX_SEGMENT_LEN_MS: u64 = 120;

const SOURCES: &[&str] = &["rec1", "rec2"];
const CHANNELS: &[&str] = &["A", "B"];

fn random_speech_set(rng: &mut StdRng, include_alien_track: bool) -> SpeechSet {
    let stream_count = rng.gen_range(1..=MAX_STREAMS_PER_SET);
    let mut speeches = Vec::with_capacity(stream_count);
    for _ in 0..stream_count {
        let segment_count = rng.gen_range(1..=MAX_SEGMENTS_PER_STREAM);
        let mut segments = Vec::with_capacity(segment_count);
        for _ in 0..segment_count {
            let source = SOURCES[rng.gen_range(0..SOURCES.len())];
            let channel = CHANNELS[rng.gen_range(0..CHANNELS.len())];
            let start = rng.gen_range(0..TIME_HORIZON_MS);
            let len = rng.gen_range(1..=MAX_SEGMENT_LEN_MS);
            segments.push(Segment::new(source, channel, start, start + len));
        }
        if include_alien_track {
            // a track that exists nowhere in the reference collection
            segments.push(Segment::new("alien", "9", 0, 50));
        }
        speeches.push(Speech::from_segments(segments));
    }
    SpeechSet::from_speeches(speeches)
}

fn run_all(refs: &Arc<SpeechSet>, hyps: &Arc<SpeechSet>, kind: ExpansionKind) -> Vec<WindowGroup> {
    let mut segmentor = SegmentorBuilder::new()
        .with_expansion_kind(kind)
        .build(refs.clone(), hyps.clone())
        .expect("reference corpus is non-empty");
    segmentor.windows().collect()
}

fn segment_keys<'a>(
    segments: impl IntoIterator<Item = &'a Segment>,
) -> Vec<(String, String, u64, u64)> {
    let mut keys: Vec<(String, String, u64, u64)> = segments
        .into_iter()
        .map(|s| (s.source.clone(), s.channel.clone(), s.start_ms, s.end_ms))
        .collect();
    keys.sort();
    keys
}

fn all_segments(set: &SpeechSet) -> impl Iterator<Item = &Segment> {
    set.speeches().iter().flat_map(|sp| sp.segments().iter())
}

/// Point-set union of half-open spans, merging touching neighbours.
fn merged_spans(mut spans: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    spans.sort_unstable();
    let mut out: Vec<(u64, u64)> = Vec::new();
    for (start, end) in spans {
        match out.last_mut() {
            Some((_, last_end)) if start <= *last_end => *last_end = (*last_end).max(end),
            _ => out.push((start, end)),
        }
    }
    out
}

fn check_properties(refs: &SpeechSet, hyps: &SpeechSet, groups: &[WindowGroup]) {
    let ref_tracks: BTreeSet<TrackKey> = all_segments(refs).map(|s| s.track()).collect();

    // pair visitation: every reference track appears, as one consecutive run,
    // and nothing else does
    let mut visited: Vec<TrackKey> = Vec::new();
    for group in groups {
        if visited.last() != Some(&group.track) {
            visited.push(group.track.clone());
        }
    }
    let visited_set: BTreeSet<TrackKey> = visited.iter().cloned().collect();
    assert_eq!(visited.len(), visited_set.len(), "track visited twice");
    assert_eq!(visited_set, ref_tracks, "visited tracks != reference tracks");

    // monotonicity: strictly increasing window starts within a track
    for pair in groups.windows(2) {
        if pair[0].track == pair[1].track {
            assert!(
                pair[0].start_ms < pair[1].start_ms,
                "window starts not strictly increasing on {}",
                pair[0].track
            );
        }
    }

    // coverage: per track, the union of window spans equals the union of
    // reference segment spans
    for track in &ref_tracks {
        let window_union = merged_spans(
            groups
                .iter()
                .filter(|g| &g.track == track)
                .map(|g| (g.start_ms, g.end_ms))
                .collect(),
        );
        let reference_union = merged_spans(
            all_segments(refs)
                .filter(|s| s.on_track(track))
                .map(|s| (s.start_ms, s.end_ms))
                .collect(),
        );
        assert_eq!(window_union, reference_union, "coverage mismatch on {track}");
    }

    // partition + completeness: every reference segment, and every hypothesis
    // segment on a visited track, is emitted exactly once
    let emitted_refs = segment_keys(groups.iter().flat_map(|g| g.iter_references()));
    assert_eq!(emitted_refs, segment_keys(all_segments(refs)));

    let emitted_hyps = segment_keys(groups.iter().flat_map(|g| g.iter_hypotheses()));
    let expected_hyps =
        segment_keys(all_segments(hyps).filter(|s| ref_tracks.contains(&s.track())));
    assert_eq!(emitted_hyps, expected_hyps);

    // groups only ever carry segments of their own track
    for group in groups {
        assert!(group
            .iter_references()
            .chain(group.iter_hypotheses())
            .all(|s| s.on_track(&group.track)));
        for stream in group.references.iter().chain(group.hypotheses.iter()) {
            for pair in stream.windows(2) {
                assert!(pair[0].start_ms <= pair[1].start_ms, "inner list unordered");
            }
        }
    }
}

#[test]
fn randomized_corpora_uphold_window_contract() {
    for seed in 0..RANDOM_ROUNDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let refs = Arc::new(random_speech_set(&mut rng, false));
        let hyps = Arc::new(random_speech_set(&mut rng, true));

        let groups = run_all(&refs, &hyps, ExpansionKind::Rescan);
        check_properties(&refs, &hyps, &groups);
    }
}

#[test]
fn heap_and_rescan_strategies_are_equivalent() {
    for seed in 0..RANDOM_ROUNDS {
        let mut rng = StdRng::seed_from_u64(1_000 + seed);
        let refs = Arc::new(random_speech_set(&mut rng, false));
        let hyps = Arc::new(random_speech_set(&mut rng, true));

        let rescan = run_all(&refs, &hyps, ExpansionKind::Rescan);
        let heap = run_all(&refs, &hyps, ExpansionKind::Heap);
        assert_eq!(rescan, heap, "strategies diverged for seed {seed}");
    }
}

#[test]
fn overlapping_references_merge_into_one_window() {
    let refs = Arc::new(SpeechSet::from_speeches(vec![Speech::from_segments(
        vec![
            Segment::new("A", "1", 0, 5),
            Segment::new("A", "1", 4, 9),
            Segment::new("A", "1", 12, 15),
        ],
    )]));
    let hyps = Arc::new(SpeechSet::from_speeches(vec![Speech::from_segments(
        vec![Segment::new("A", "1", 7, 13)],
    )]));

    let groups = run_all(&refs, &hyps, ExpansionKind::Rescan);
    assert_eq!(groups.len(), 2);
    assert_eq!((groups[0].start_ms, groups[0].end_ms), (0, 9));
    assert_eq!(groups[0].reference_count(), 2);
    assert_eq!(groups[0].hypothesis_count(), 1);
    assert_eq!((groups[1].start_ms, groups[1].end_ms), (12, 15));
    assert_eq!(groups[1].reference_count(), 1);
    assert_eq!(groups[1].hypothesis_count(), 0);
    check_properties(&refs, &hyps, &groups);
}

#[derive(Debug, Deserialize)]
struct Fixture {
    references: Vec<Vec<Segment>>,
    hypothesis: Vec<Vec<Segment>>,
    expected_windows: Vec<(u64, u64)>,
}

const MEETING_FIXTURE: &str = r#"{
    "references": [
        [
            {"source": "mtg", "channel": "1", "start_ms": 0,   "end_ms": 140, "speaker": "spk1"},
            {"source": "mtg", "channel": "1", "start_ms": 130, "end_ms": 260, "speaker": "spk2"},
            {"source": "mtg", "channel": "1", "start_ms": 400, "end_ms": 520, "speaker": "spk1"}
        ],
        [
            {"source": "mtg", "channel": "1", "start_ms": 250, "end_ms": 310, "speaker": "spk3"}
        ]
    ],
    "hypothesis": [
        [
            {"source": "mtg", "channel": "1", "start_ms": 10,  "end_ms": 150, "text": "so the plan"},
            {"source": "mtg", "channel": "1", "start_ms": 320, "end_ms": 410, "text": "next item"},
            {"source": "mtg", "channel": "1", "start_ms": 430, "end_ms": 505, "text": "wrap up"}
        ]
    ],
    "expected_windows": [[0, 310], [400, 520]]
}"#;

#[test]
fn json_fixture_scenario_windows_as_expected() {
    let fixture: Fixture = serde_json::from_str(MEETING_FIXTURE).expect("fixture parses");
    let refs = Arc::new(SpeechSet::from_speeches(
        fixture.references.into_iter().map(Speech::from_segments).collect(),
    ));
    let hyps = Arc::new(SpeechSet::from_speeches(
        fixture.hypothesis.into_iter().map(Speech::from_segments).collect(),
    ));

    let groups = run_all(&refs, &hyps, ExpansionKind::Rescan);
    let spans: Vec<(u64, u64)> = groups.iter().map(|g| (g.start_ms, g.end_ms)).collect();
    assert_eq!(spans, fixture.expected_windows);

    // the inter-window hypothesis [320,410) must ride with the second window
    assert_eq!(groups[0].hypothesis_count(), 1);
    assert_eq!(groups[1].hypothesis_count(), 2);
    check_properties(&refs, &hyps, &groups);
}
