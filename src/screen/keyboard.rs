use log::info;

use crate::dsp::waveform::VoiceConfig;
use crate::keyboard::{KeyboardConfig, KeyboardSurface, PointerEvent};
use crate::screen::orientation::{Orientation, OrientationControl, OrientationLock};
use crate::synth::{backend::AudioBackend, cache::VoiceCache};

/*
Keyboard Screen
===============

Owns everything that lives exactly as long as the keyboard is on screen:

    enter ──→ lock landscape, empty voice cache, fresh surface
      │
      │   pointer events → surface → voice cache → backend
      │
    dispose (explicit, or on drop)
      1. surface.dispose   every held pitch gets its note-off
      2. release_all       every track is freed
      3. restore           previous orientation is requested again

Teardown runs once no matter how the screen goes away.
*/

pub struct KeyboardScreen<B: AudioBackend, O: OrientationControl> {
    surface: KeyboardSurface,
    voices: VoiceCache<B>,
    orientation: OrientationLock<O>,
    disposed: bool,
}

impl<B: AudioBackend, O: OrientationControl> KeyboardScreen<B, O> {
    pub fn enter(
        config: &KeyboardConfig,
        voice_config: VoiceConfig,
        backend: B,
        orientation: O,
    ) -> Self {
        let orientation = OrientationLock::lock(orientation, Orientation::SensorLandscape);
        let surface = KeyboardSurface::new(config);
        info!(
            "keyboard screen opened: {} keys from {}",
            surface.layout().keys().len(),
            config.start_pitch
        );
        Self {
            surface,
            voices: VoiceCache::new(backend, voice_config),
            orientation,
            disposed: false,
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        self.surface.handle(event, &mut self.voices);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height);
    }

    pub fn surface(&self) -> &KeyboardSurface {
        &self.surface
    }

    pub fn voices(&self) -> &VoiceCache<B> {
        &self.voices
    }

    /// Surface and the cache it plays into, for driving the press and drag
    /// recognizers directly instead of through pointer arbitration.
    pub fn parts_mut(&mut self) -> (&mut KeyboardSurface, &mut VoiceCache<B>) {
        (&mut self.surface, &mut self.voices)
    }

    pub fn orientation(&self) -> &OrientationLock<O> {
        &self.orientation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Silence, free and restore. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.surface.dispose(&mut self.voices);
        let voices = self.voices.len();
        self.voices.release_all();
        self.orientation.restore();
        info!("keyboard screen closed, released {} voices", voices);
    }
}

impl<B: AudioBackend, O: OrientationControl> Drop for KeyboardScreen<B, O> {
    fn drop(&mut self) {
        self.dispose();
    }
}
