use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, warn};

use crate::dsp::waveform::{generate_voice, VoiceConfig};
use crate::io::{
    converter::{encode_pcm16_le, playback_buffer_bytes},
    PcmFormat,
};
use crate::pitch::Pitch;
use crate::synth::{backend::AudioBackend, message::NoteSink, voice::Voice};

/*
Voice Cache
===========

One pre-rendered voice per pitch, created the first time the pitch is
played and kept until the cache is released.

    note_on(p)
        │
        ├─ cached? ──yes──→ rewind + play
        │
        no
        ↓
    generate_voice(p) → PCM16 LE → backend.create_track(max(min, 2n))
        │
        ├─ ok ──→ insert, rewind + play
        └─ err ─→ log, leave uncached (retried on the next note_on)

A failed allocation only silences that pitch; it is never propagated.
*/

/// Lazily populated pitch → voice map that drives an [`AudioBackend`].
pub struct VoiceCache<B: AudioBackend> {
    backend: B,
    config: VoiceConfig,
    format: PcmFormat,
    voices: HashMap<Pitch, Voice<B::Track>>,
    generated: u64,
}

impl<B: AudioBackend> VoiceCache<B> {
    pub fn new(backend: B, config: VoiceConfig) -> Self {
        Self {
            backend,
            format: PcmFormat::mono(config.sample_rate),
            config,
            voices: HashMap::new(),
            generated: 0,
        }
    }

    /// The cached voice for `pitch`, generating it on first access.
    ///
    /// `None` when the backend could not allocate a track.
    pub fn get_or_create_voice(&mut self, pitch: Pitch) -> Option<&Voice<B::Track>> {
        match self.voices.entry(pitch) {
            Entry::Occupied(entry) => Some(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let pcm = generate_voice(pitch, &self.config).into_boxed_slice();
                self.generated += 1;

                let bytes = encode_pcm16_le(&pcm);
                let min_buffer = self.backend.min_buffer_bytes(self.format);
                let buffer_bytes = playback_buffer_bytes(min_buffer, pcm.len());

                match self.backend.create_track(self.format, buffer_bytes, &bytes) {
                    Ok(track) => {
                        debug!(
                            "generated voice {} ({} samples, {} byte buffer)",
                            pitch,
                            pcm.len(),
                            buffer_bytes
                        );
                        Some(&*entry.insert(Voice::new(pitch, pcm, track)))
                    }
                    Err(err) => {
                        warn!("no playback track for {}: {}", pitch, err);
                        None
                    }
                }
            }
        }
    }

    /// Start `pitch` from the top, cutting off any playback of it in progress.
    pub fn note_on(&mut self, pitch: Pitch) {
        if self.get_or_create_voice(pitch).is_none() {
            return;
        }
        if let Some(voice) = self.voices.get_mut(&pitch) {
            if let Err(err) = voice.start(&mut self.backend) {
                warn!("failed to start {}: {}", pitch, err);
            }
        }
    }

    /// Halt and rewind `pitch` if it has a voice.
    pub fn note_off(&mut self, pitch: Pitch) {
        if let Some(voice) = self.voices.get_mut(&pitch) {
            if let Err(err) = voice.stop(&mut self.backend) {
                warn!("failed to stop {}: {}", pitch, err);
            }
        }
    }

    /// Free every track and empty the cache.
    pub fn release_all(&mut self) {
        let count = self.voices.len();
        for (pitch, voice) in self.voices.drain() {
            if let Err(err) = self.backend.release(voice.into_track()) {
                warn!("failed to release {}: {}", pitch, err);
            }
        }
        if count > 0 {
            debug!("released {} voices", count);
        }
    }

    pub fn voice(&self, pitch: Pitch) -> Option<&Voice<B::Track>> {
        self.voices.get(&pitch)
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        self.voices.contains_key(&pitch)
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// How many buffers have been rendered over the cache's lifetime.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }

    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

}

impl<B: AudioBackend> NoteSink for VoiceCache<B> {
    fn note_on(&mut self, pitch: Pitch) {
        VoiceCache::note_on(self, pitch);
    }

    fn note_off(&mut self, pitch: Pitch) {
        VoiceCache::note_off(self, pitch);
    }
}

impl<B: AudioBackend> Drop for VoiceCache<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::{A4, C4, E4};
    use crate::synth::recorder::{RecordingBackend, TrackOp};
    use crate::synth::voice::VoiceState;

    fn short_config() -> VoiceConfig {
        VoiceConfig::new().sample_rate(8_000).duration(0.25)
    }

    #[test]
    fn second_access_returns_cached_voice() {
        let mut cache = VoiceCache::new(RecordingBackend::new(), short_config());

        let first = cache.get_or_create_voice(A4).map(|v| v.pcm().as_ptr());
        let second = cache.get_or_create_voice(A4).map(|v| v.pcm().as_ptr());

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(cache.generated_count(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.backend().live_tracks(), 1);
    }

    #[test]
    fn buffer_respects_minimum_and_sample_size() {
        let backend = RecordingBackend::new().min_buffer(1_000_000);
        let mut cache = VoiceCache::new(backend, short_config());
        cache.get_or_create_voice(C4);

        let samples = short_config().sample_count();
        assert_eq!(
            cache.backend().ops()[0],
            TrackOp::Create {
                track: 0,
                buffer_bytes: 1_000_000,
                pcm_bytes: samples * 2,
            }
        );
    }

    #[test]
    fn uploaded_bytes_match_rendered_voice() {
        let mut cache = VoiceCache::new(RecordingBackend::new(), short_config());
        let voice = cache.get_or_create_voice(E4).unwrap();
        assert_eq!(voice.track().samples(), &voice.pcm()[..]);
    }

    #[test]
    fn note_on_retriggers_same_track() {
        let mut cache = VoiceCache::new(RecordingBackend::new(), short_config());
        cache.note_on(C4);
        cache.note_on(C4);

        let ops = cache.backend().ops();
        assert_eq!(&ops[1..], &[TrackOp::Play(0), TrackOp::Play(0)]);
        assert_eq!(cache.generated_count(), 1);
        assert_eq!(cache.voice(C4).unwrap().state(), VoiceState::Playing);
    }

    #[test]
    fn note_off_without_voice_is_ignored() {
        let mut cache = VoiceCache::new(RecordingBackend::new(), short_config());
        cache.note_off(C4);
        assert!(cache.backend().ops().is_empty());
        assert!(cache.is_empty());
    }

    #[test]
    fn note_off_stops_and_rewinds() {
        let mut cache = VoiceCache::new(RecordingBackend::new(), short_config());
        cache.note_on(E4);
        cache.note_off(E4);

        assert_eq!(cache.backend().ops().last(), Some(&TrackOp::Stop(0)));
        assert_eq!(cache.voice(E4).unwrap().state(), VoiceState::Stopped);
    }

    #[test]
    fn allocation_failure_leaves_pitch_silent_and_uncached() {
        let backend = RecordingBackend::new().track_limit(1);
        let mut cache = VoiceCache::new(backend, short_config());

        cache.note_on(C4);
        cache.note_on(E4);

        assert!(cache.contains(C4));
        assert!(!cache.contains(E4));

        // Freed resources make the next attempt succeed.
        cache.release_all();
        cache.note_on(E4);
        assert!(cache.contains(E4));
    }

    #[test]
    fn release_all_frees_every_track() {
        let mut cache = VoiceCache::new(RecordingBackend::new(), short_config());
        for pitch in [C4, E4, A4] {
            cache.note_on(pitch);
        }
        cache.release_all();

        assert!(cache.is_empty());
        assert_eq!(cache.backend().live_tracks(), 0);
        let releases = cache
            .backend()
            .ops()
            .iter()
            .filter(|op| matches!(op, TrackOp::Release(_)))
            .count();
        assert_eq!(releases, 3);
    }

    #[test]
    fn failed_release_is_skipped_and_cache_still_empties() {
        let backend = RecordingBackend::new().fail_release(1);
        let mut cache = VoiceCache::new(backend, short_config());
        for pitch in [C4, E4, A4] {
            cache.note_on(pitch);
        }
        cache.release_all();

        assert!(cache.is_empty());
        assert_eq!(cache.backend().live_tracks(), 1);
        let mut released: Vec<usize> = cache
            .backend()
            .ops()
            .iter()
            .filter_map(|op| match op {
                TrackOp::Release(id) => Some(*id),
                _ => None,
            })
            .collect();
        released.sort();
        assert_eq!(released, vec![0, 2]);

        // Nothing left to release a second time
        let before = cache.backend().ops().len();
        cache.release_all();
        assert_eq!(cache.backend().ops().len(), before);
    }

    #[test]
    fn drop_releases_remaining_tracks() {
        let mut backend = RecordingBackend::new();
        {
            let mut cache = VoiceCache::new(&mut backend, short_config());
            cache.note_on(C4);
        }
        assert_eq!(backend.live_tracks(), 0);
    }
}
