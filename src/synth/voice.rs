use crate::pitch::Pitch;
use crate::synth::backend::{AudioBackend, AudioError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Stopped, // Rewound, waiting for a note-on
    Playing, // Started from the top; may have run off the end since
}

/// A pre-rendered buffer for one pitch and the track it was uploaded to.
pub struct Voice<T> {
    pitch: Pitch,
    pcm: Box<[i16]>,
    track: T,
    state: VoiceState,
}

impl<T> Voice<T> {
    pub(crate) fn new(pitch: Pitch, pcm: Box<[i16]>, track: T) -> Self {
        Self {
            pitch,
            pcm,
            track,
            state: VoiceState::Stopped,
        }
    }

    /// Retrigger from the first sample.
    pub(crate) fn start<B>(&mut self, backend: &mut B) -> Result<(), AudioError>
    where
        B: AudioBackend<Track = T> + ?Sized,
    {
        backend.play(&mut self.track)?;
        self.state = VoiceState::Playing;
        Ok(())
    }

    /// Halt and rewind. The voice counts as stopped even if the backend failed.
    pub(crate) fn stop<B>(&mut self, backend: &mut B) -> Result<(), AudioError>
    where
        B: AudioBackend<Track = T> + ?Sized,
    {
        self.state = VoiceState::Stopped;
        backend.stop(&mut self.track)
    }

    pub(crate) fn into_track(self) -> T {
        self.track
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    /// The rendered samples. Owned by the voice, only ever lent out.
    pub fn pcm(&self) -> &[i16] {
        &self.pcm
    }

    pub fn sample_count(&self) -> usize {
        self.pcm.len()
    }

    pub fn track(&self) -> &T {
        &self.track
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == VoiceState::Playing
    }
}

impl<T> std::fmt::Debug for Voice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Voice")
            .field("pitch", &self.pitch)
            .field("samples", &self.pcm.len())
            .field("state", &self.state)
            .finish()
    }
}
