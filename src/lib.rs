pub mod error;
pub mod segmentor;
pub mod speech;
pub mod types;
pub mod windowing;

pub use error::WindowingError;
pub use segmentor::builder::{ExpansionKind, SegmentorBuilder};
pub use segmentor::runtime::{Segmentor, Windows};
pub use segmentor::traits::OverlapExpander;
pub use speech::{Speech, SpeechSet};
pub use types::{Segment, TrackKey, WindowGroup};
pub use windowing::{HeapExpander, RescanExpander};
