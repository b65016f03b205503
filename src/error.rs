use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowingError {
    #[error("reference collection contains no segments; nothing to window")]
    EmptyReference,
    #[error("iteration exhausted: every (source, channel) track has been produced")]
    Exhausted,
}
