use std::sync::Arc;

use rtrb::{Consumer, Producer, RingBuffer};

use crate::io::{
    converter::{decode_pcm16_le, pcm16_to_f32},
    PcmFormat,
};
use crate::synth::backend::{AudioBackend, AudioError};
use crate::{MAX_BLOCK_SIZE, SAMPLE_RATE};

/*
Realtime Mixer
==============

The voice cache lives on the UI thread; samples are produced in the audio
callback. The two halves talk through a lock-free SPSC ring buffer:

    UI thread                               audio thread
    ─────────                               ────────────
    VoiceCache ──→ MixerBackend ──rtrb──→ Mixer::render_block ──→ device
                   (slots, decode)         (sum playing slots)

Uploads are decoded to f32 on the UI thread so the callback only adds.
Each slot is one static track: Load once, Play/Stop many times, Release.

The callback never runs the last drop of a sample buffer. Buffers it lets
go of travel back on a second ring and are freed by the backend:

    MixerBackend::collect_retired ←──rtrb── Mixer (Release, reloaded slot)

Voices are rendered at 44.1kHz; if the device runs at another rate the
mixer steps through each slot at source_rate / output_rate samples per
output frame, interpolating linearly between neighbours.
*/

/// Commands sent from the UI thread to the audio thread.
pub enum MixerCommand {
    Load { slot: usize, samples: Arc<[f32]> },
    Play { slot: usize },
    Stop { slot: usize },
    Release { slot: usize },
}

/// Sizing for a mixer pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixerConfig {
    /// Maximum tracks alive at once.
    pub max_slots: usize,
    /// Commands that may be in flight before pushes fail.
    pub queue_capacity: usize,
    /// Rate voices are rendered at.
    pub source_rate: u32,
    /// Rate of the output device.
    pub output_rate: u32,
    /// Minimum playback buffer reported to the voice cache.
    pub min_buffer_bytes: usize,
}

impl MixerConfig {
    pub fn new() -> Self {
        Self {
            max_slots: 128,
            queue_capacity: 1024,
            source_rate: SAMPLE_RATE,
            output_rate: SAMPLE_RATE,
            min_buffer_bytes: MAX_BLOCK_SIZE * 2,
        }
    }

    pub fn max_slots(mut self, slots: usize) -> Self {
        self.max_slots = slots;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn output_rate(mut self, rate: u32) -> Self {
        self.output_rate = rate.max(1);
        self
    }

    pub fn source_rate(mut self, rate: u32) -> Self {
        self.source_rate = rate.max(1);
        self
    }

    pub fn min_buffer_bytes(mut self, bytes: usize) -> Self {
        self.min_buffer_bytes = bytes;
        self
    }
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a connected backend (UI side) and mixer (audio side).
pub fn mixer_pair(config: MixerConfig) -> (MixerBackend, Mixer) {
    let (tx, rx) = RingBuffer::new(config.queue_capacity);
    // Every backend call collects before it pushes, so at most the queued
    // commands plus one can be waiting here.
    let (retire, retired) = RingBuffer::new(config.queue_capacity + 1);
    let backend = MixerBackend {
        tx,
        retired,
        free: Vec::new(),
        next_slot: 0,
        config,
    };
    let mixer = Mixer {
        rx,
        retire,
        slots: (0..config.max_slots).map(|_| None).collect(),
        step: config.source_rate as f64 / config.output_rate as f64,
    };
    (backend, mixer)
}

/// Handle to a mixer slot.
#[derive(Debug, PartialEq, Eq)]
pub struct MixerTrack {
    slot: usize,
}

impl MixerTrack {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// UI-side half of the mixer. Implements [`AudioBackend`].
pub struct MixerBackend {
    tx: Producer<MixerCommand>,
    retired: Consumer<Arc<[f32]>>,
    free: Vec<usize>,
    next_slot: usize,
    config: MixerConfig,
}

impl MixerBackend {
    fn push(&mut self, command: MixerCommand) -> Result<(), AudioError> {
        self.tx.push(command).map_err(|_| AudioError::QueueFull)
    }

    fn claim_slot(&mut self) -> Result<usize, AudioError> {
        if let Some(slot) = self.free.pop() {
            return Ok(slot);
        }
        if self.next_slot < self.config.max_slots {
            self.next_slot += 1;
            return Ok(self.next_slot - 1);
        }
        Err(AudioError::SlotsExhausted {
            max: self.config.max_slots,
        })
    }

    /// Free sample buffers the mixer has let go of. Returns how many.
    pub fn collect_retired(&mut self) -> usize {
        let mut count = 0;
        while let Ok(samples) = self.retired.pop() {
            drop(samples);
            count += 1;
        }
        count
    }

    pub fn config(&self) -> &MixerConfig {
        &self.config
    }
}

impl AudioBackend for MixerBackend {
    type Track = MixerTrack;

    fn min_buffer_bytes(&self, _format: PcmFormat) -> usize {
        self.config.min_buffer_bytes
    }

    fn create_track(
        &mut self,
        format: PcmFormat,
        buffer_bytes: usize,
        pcm: &[u8],
    ) -> Result<Self::Track, AudioError> {
        if format.channels != 1 || format.sample_rate != self.config.source_rate {
            return Err(AudioError::UnsupportedFormat(format));
        }
        let required = pcm.len().max(self.config.min_buffer_bytes);
        if buffer_bytes < required {
            return Err(AudioError::BufferTooSmall {
                required,
                provided: buffer_bytes,
            });
        }

        self.collect_retired();
        let slot = self.claim_slot()?;
        let samples: Arc<[f32]> = decode_pcm16_le(pcm)
            .into_iter()
            .map(pcm16_to_f32)
            .collect();

        if let Err(err) = self.push(MixerCommand::Load { slot, samples }) {
            self.free.push(slot);
            return Err(err);
        }
        Ok(MixerTrack { slot })
    }

    fn play(&mut self, track: &mut Self::Track) -> Result<(), AudioError> {
        self.collect_retired();
        self.push(MixerCommand::Play { slot: track.slot })
    }

    fn stop(&mut self, track: &mut Self::Track) -> Result<(), AudioError> {
        self.collect_retired();
        self.push(MixerCommand::Stop { slot: track.slot })
    }

    fn release(&mut self, track: Self::Track) -> Result<(), AudioError> {
        self.collect_retired();
        // A slot whose release never reached the mixer stays claimed.
        self.push(MixerCommand::Release { slot: track.slot })?;
        self.free.push(track.slot);
        Ok(())
    }
}

struct Slot {
    samples: Arc<[f32]>,
    position: f64,
    playing: bool,
}

impl Slot {
    fn mix_into(&mut self, out: &mut [f32], step: f64) {
        let len = self.samples.len();
        for sample in out.iter_mut() {
            let index = self.position as usize;
            if index >= len {
                break;
            }
            let frac = (self.position - index as f64) as f32;
            let current = self.samples[index];
            let next = self.samples.get(index + 1).copied().unwrap_or(0.0);
            *sample += current + (next - current) * frac;
            self.position += step;
        }
        if self.position as usize >= len {
            self.playing = false;
            self.position = 0.0;
        }
    }
}

/// Audio-side half of the mixer. Owned by the output callback.
pub struct Mixer {
    rx: Consumer<MixerCommand>,
    retire: Producer<Arc<[f32]>>,
    slots: Vec<Option<Slot>>,
    step: f64,
}

impl Mixer {
    fn retire(&mut self, slot: Option<Slot>) {
        if let Some(slot) = slot {
            // Full only if the backend has stopped collecting
            let _ = self.retire.push(slot.samples);
        }
    }

    /// Apply every pending command.
    ///
    /// Replaced and released buffers are handed back to the backend.
    pub fn drain_commands(&mut self) {
        while let Ok(command) = self.rx.pop() {
            match command {
                MixerCommand::Load { slot, samples } => {
                    if let Some(entry) = self.slots.get_mut(slot) {
                        let old = entry.replace(Slot {
                            samples,
                            position: 0.0,
                            playing: false,
                        });
                        self.retire(old);
                    }
                }
                MixerCommand::Play { slot } => {
                    if let Some(Some(voice)) = self.slots.get_mut(slot) {
                        voice.position = 0.0;
                        voice.playing = true;
                    }
                }
                MixerCommand::Stop { slot } => {
                    if let Some(Some(voice)) = self.slots.get_mut(slot) {
                        voice.position = 0.0;
                        voice.playing = false;
                    }
                }
                MixerCommand::Release { slot } => {
                    if let Some(entry) = self.slots.get_mut(slot) {
                        let old = entry.take();
                        self.retire(old);
                    }
                }
            }
        }
    }

    /// Drain commands, then write the sum of all playing slots into `out`.
    pub fn render_block(&mut self, out: &mut [f32]) {
        self.drain_commands();

        out.fill(0.0);
        for slot in self.slots.iter_mut().flatten() {
            if slot.playing {
                slot.mix_into(out, self.step);
            }
        }
        for sample in out.iter_mut() {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }

    /// Slots currently sounding.
    pub fn playing_count(&self) -> usize {
        self.slots.iter().flatten().filter(|slot| slot.playing).count()
    }

    /// Slots holding uploaded samples.
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}
