use crate::io::{converter::decode_pcm16_le, PcmFormat};
use crate::synth::backend::{AudioBackend, AudioError};

/// Something that happened to a recorded track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOp {
    Create { track: usize, buffer_bytes: usize, pcm_bytes: usize },
    Play(usize),
    Stop(usize),
    Release(usize),
}

/// Handle to a track owned by a [`RecordingBackend`].
#[derive(Debug, PartialEq, Eq)]
pub struct RecordedTrack {
    id: usize,
    samples: Vec<i16>,
}

impl RecordedTrack {
    pub fn id(&self) -> usize {
        self.id
    }

    /// The samples as decoded from the uploaded bytes.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }
}

/// In-memory backend that plays nothing and logs every call in order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    ops: Vec<TrackOp>,
    next_id: usize,
    live: usize,
    min_buffer_bytes: usize,
    track_limit: Option<usize>,
    failing_release: Option<usize>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_buffer(mut self, bytes: usize) -> Self {
        self.min_buffer_bytes = bytes;
        self
    }

    /// Refuse to allocate more than `limit` live tracks.
    pub fn track_limit(mut self, limit: usize) -> Self {
        self.track_limit = Some(limit);
        self
    }

    /// Make releasing track `id` fail. The track stays live.
    pub fn fail_release(mut self, id: usize) -> Self {
        self.failing_release = Some(id);
        self
    }

    pub fn ops(&self) -> &[TrackOp] {
        &self.ops
    }

    /// Tracks created and not yet released.
    pub fn live_tracks(&self) -> usize {
        self.live
    }
}

impl AudioBackend for RecordingBackend {
    type Track = RecordedTrack;

    fn min_buffer_bytes(&self, _format: PcmFormat) -> usize {
        self.min_buffer_bytes
    }

    fn create_track(
        &mut self,
        format: PcmFormat,
        buffer_bytes: usize,
        pcm: &[u8],
    ) -> Result<Self::Track, AudioError> {
        if format.channels != 1 {
            return Err(AudioError::UnsupportedFormat(format));
        }
        if buffer_bytes < pcm.len() {
            return Err(AudioError::BufferTooSmall {
                required: pcm.len(),
                provided: buffer_bytes,
            });
        }
        if let Some(max) = self.track_limit {
            if self.live >= max {
                return Err(AudioError::SlotsExhausted { max });
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.live += 1;
        self.ops.push(TrackOp::Create {
            track: id,
            buffer_bytes,
            pcm_bytes: pcm.len(),
        });

        Ok(RecordedTrack {
            id,
            samples: decode_pcm16_le(pcm),
        })
    }

    fn play(&mut self, track: &mut Self::Track) -> Result<(), AudioError> {
        self.ops.push(TrackOp::Play(track.id));
        Ok(())
    }

    fn stop(&mut self, track: &mut Self::Track) -> Result<(), AudioError> {
        self.ops.push(TrackOp::Stop(track.id));
        Ok(())
    }

    fn release(&mut self, track: Self::Track) -> Result<(), AudioError> {
        if self.failing_release == Some(track.id) {
            return Err(AudioError::QueueFull);
        }
        self.live = self.live.saturating_sub(1);
        self.ops.push(TrackOp::Release(track.id));
        Ok(())
    }
}
