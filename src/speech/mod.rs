mod set;
mod stream;

pub use set::SpeechSet;
pub use stream::Speech;
