use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::segmentor::traits::OverlapExpander;
use crate::speech::Speech;
use crate::types::{Segment, TrackKey};

/// Fixed-point expansion: sweep every stream, extend the right edge whenever
/// a stream offers a segment starting strictly before it, and stop after a
/// full pass with no update. `next_segment` only returns segments ending
/// after the edge, so every update strictly grows it and the loop terminates.
#[derive(Debug, Default)]
pub struct RescanExpander;

impl OverlapExpander for RescanExpander {
    fn window_end(&self, cursor: &Segment, speeches: &[Speech], track: &TrackKey) -> u64 {
        let mut end = cursor.end_ms;
        let mut again = true;
        while again {
            again = false;
            for speech in speeches {
                if let Some(seg) = speech.next_segment(end, track) {
                    if seg.start_ms < end {
                        end = seg.end_ms;
                        again = true;
                    }
                }
            }
        }
        end
    }
}

/// Min-heap expansion: one candidate per stream, keyed by start time. Same
/// merge semantics as [`RescanExpander`] — growth stops exactly when no
/// stream offers a segment starting strictly before the edge — but each
/// merge step costs O(log streams) instead of a full rescan.
#[derive(Debug, Default)]
pub struct HeapExpander;

impl OverlapExpander for HeapExpander {
    fn window_end(&self, cursor: &Segment, speeches: &[Speech], track: &TrackKey) -> u64 {
        let mut end = cursor.end_ms;
        // (start, stream index, end); Reverse turns BinaryHeap into a min-heap
        let mut heap: BinaryHeap<Reverse<(u64, usize, u64)>> = BinaryHeap::new();
        for (idx, speech) in speeches.iter().enumerate() {
            if let Some(seg) = speech.next_segment(end, track) {
                heap.push(Reverse((seg.start_ms, idx, seg.end_ms)));
            }
        }

        while let Some(Reverse((start, idx, cand_end))) = heap.pop() {
            if start >= end {
                // the minimal start no longer overlaps: fixed point reached
                break;
            }
            if cand_end > end {
                end = cand_end;
            }
            // refresh this stream's candidate against the grown edge; a
            // candidate already swallowed by the edge falls in here too
            if let Some(seg) = speeches[idx].next_segment(end, track) {
                heap.push(Reverse((seg.start_ms, idx, seg.end_ms)));
            }
        }

        end
    }
}
