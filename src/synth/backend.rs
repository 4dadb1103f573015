use crate::io::PcmFormat;

/// Platform audio output, modelled as static playback tracks.
///
/// Each voice uploads its whole buffer once into a track, then only plays
/// and stops it. Implementations decide where the samples actually go.
pub trait AudioBackend {
    type Track;

    /// Smallest buffer the output accepts for `format`, in bytes.
    fn min_buffer_bytes(&self, format: PcmFormat) -> usize;

    /// Allocate a track of `buffer_bytes` and upload `pcm` (PCM16 LE) into it.
    fn create_track(
        &mut self,
        format: PcmFormat,
        buffer_bytes: usize,
        pcm: &[u8],
    ) -> Result<Self::Track, AudioError>;

    /// Rewind and play from the first sample, cutting off any playback in progress.
    fn play(&mut self, track: &mut Self::Track) -> Result<(), AudioError>;

    /// Halt playback and rewind.
    fn stop(&mut self, track: &mut Self::Track) -> Result<(), AudioError>;

    /// Free the track's resources.
    fn release(&mut self, track: Self::Track) -> Result<(), AudioError>;
}

impl<B: AudioBackend + ?Sized> AudioBackend for &mut B {
    type Track = B::Track;

    fn min_buffer_bytes(&self, format: PcmFormat) -> usize {
        (**self).min_buffer_bytes(format)
    }

    fn create_track(
        &mut self,
        format: PcmFormat,
        buffer_bytes: usize,
        pcm: &[u8],
    ) -> Result<Self::Track, AudioError> {
        (**self).create_track(format, buffer_bytes, pcm)
    }

    fn play(&mut self, track: &mut Self::Track) -> Result<(), AudioError> {
        (**self).play(track)
    }

    fn stop(&mut self, track: &mut Self::Track) -> Result<(), AudioError> {
        (**self).stop(track)
    }

    fn release(&mut self, track: Self::Track) -> Result<(), AudioError> {
        (**self).release(track)
    }
}

/// Errors raised by an audio backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Every playback slot is in use
    SlotsExhausted { max: usize },
    /// The command queue to the audio thread is full
    QueueFull,
    /// Requested buffer cannot hold the uploaded samples
    BufferTooSmall { required: usize, provided: usize },
    /// The output cannot play this format
    UnsupportedFormat(PcmFormat),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::SlotsExhausted { max } => {
                write!(f, "all {} playback slots are in use", max)
            }
            AudioError::QueueFull => write!(f, "audio command queue is full"),
            AudioError::BufferTooSmall { required, provided } => write!(
                f,
                "playback buffer too small: need {} bytes, got {} bytes",
                required, provided
            ),
            AudioError::UnsupportedFormat(format) => {
                write!(f, "unsupported PCM format: {}", format)
            }
        }
    }
}

impl std::error::Error for AudioError {}
