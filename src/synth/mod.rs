// Purpose: per-pitch voice caching and playback
// This layer sits between the keyboard's note events and the audio output

pub mod backend;
pub mod cache;
pub mod message;
#[cfg(feature = "rtrb")]
pub mod mixer;
pub mod recorder;
pub mod voice;

pub use backend::{AudioBackend, AudioError};
pub use cache::VoiceCache;
pub use message::{NoteEvent, NoteSink};
pub use voice::{Voice, VoiceState};
