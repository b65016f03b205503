use crate::speech::Speech;
use crate::types::{Segment, TrackKey};

/// Computes the right edge of the maximal run of mutually-overlapping
/// reference segments beginning at `cursor`, across every stream, for one
/// track. Implementations must stop growing exactly when no stream offers a
/// segment starting strictly before the current edge.
pub trait OverlapExpander: Send + Sync {
    fn window_end(&self, cursor: &Segment, speeches: &[Speech], track: &TrackKey) -> u64;
}
