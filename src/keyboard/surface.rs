use crate::keyboard::{
    gesture::{DragGesture, PressGesture},
    layout::{KeyGeometry, KeyboardLayout, DEFAULT_START_PITCH, KEY_COUNT},
    pressed::PressedSet,
};
use crate::pitch::Pitch;
use crate::synth::message::NoteSink;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape and feel of the keyboard.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardConfig {
    /// Lowest key.
    pub start_pitch: Pitch,
    pub key_count: usize,
    /// Distance a held pointer must travel before the press becomes a drag.
    pub touch_slop: f32,
}

impl KeyboardConfig {
    pub fn new() -> Self {
        Self {
            start_pitch: DEFAULT_START_PITCH,
            key_count: KEY_COUNT,
            touch_slop: 0.0,
        }
    }

    pub fn start_pitch(mut self, pitch: Pitch) -> Self {
        self.start_pitch = pitch;
        self
    }

    pub fn key_count(mut self, count: usize) -> Self {
        self.key_count = count;
        self
    }

    pub fn touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop.max(0.0);
        self
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw pointer input in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
    /// The gesture was taken away (focus loss, interruption, teardown).
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pointer {
    Up,
    Down { x: f32, y: f32 },
    Dragging,
}

/// The playable keyboard: geometry, pressed-set and both recognizers.
///
/// Holds no audio. Every method that can sound or silence a note takes the
/// sink to send it to.
#[derive(Debug)]
pub struct KeyboardSurface {
    layout: KeyboardLayout,
    geometry: KeyGeometry,
    pressed: PressedSet,
    press: PressGesture,
    drag: DragGesture,
    pointer: Pointer,
    touch_slop: f32,
}

impl KeyboardSurface {
    pub fn new(config: &KeyboardConfig) -> Self {
        let layout = KeyboardLayout::with_count(config.start_pitch, config.key_count);
        let geometry = layout.geometry(0.0, 0.0);
        Self {
            layout,
            geometry,
            pressed: PressedSet::new(),
            press: PressGesture::new(),
            drag: DragGesture::new(),
            pointer: Pointer::Up,
            touch_slop: config.touch_slop,
        }
    }

    /// Recompute geometry for a new surface size.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.geometry.size() != (width, height) {
            self.geometry = self.layout.geometry(width, height);
        }
    }

    pub fn locate(&self, x: f32, y: f32) -> Option<Pitch> {
        self.geometry.locate(x, y)
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    pub fn geometry(&self) -> &KeyGeometry {
        &self.geometry
    }

    pub fn pressed(&self) -> &PressedSet {
        &self.pressed
    }

    /// No gesture in progress and nothing held.
    pub fn is_idle(&self) -> bool {
        !self.press.is_held() && !self.drag.is_dragging() && self.pressed.is_empty()
    }

    // Press recognizer

    pub fn press_down<S: NoteSink + ?Sized>(&mut self, x: f32, y: f32, sink: &mut S) {
        let pitch = self.locate(x, y);
        self.press.press(pitch, &mut self.pressed, sink);
    }

    /// Lift. Where the pointer ended up does not matter.
    pub fn press_release<S: NoteSink + ?Sized>(&mut self, sink: &mut S) -> Option<Pitch> {
        self.press.release(&mut self.pressed, sink)
    }

    pub fn press_cancel<S: NoteSink + ?Sized>(&mut self, sink: &mut S) -> Option<Pitch> {
        self.press.cancel(&mut self.pressed, sink)
    }

    // Drag recognizer

    pub fn drag_start<S: NoteSink + ?Sized>(&mut self, x: f32, y: f32, sink: &mut S) {
        let pitch = self.locate(x, y);
        self.drag.start(pitch, &mut self.pressed, sink);
    }

    pub fn drag_to<S: NoteSink + ?Sized>(&mut self, x: f32, y: f32, sink: &mut S) -> bool {
        let pitch = self.locate(x, y);
        self.drag.update(pitch, &mut self.pressed, sink)
    }

    pub fn drag_end<S: NoteSink + ?Sized>(&mut self, sink: &mut S) -> Vec<Pitch> {
        self.drag.end(&mut self.pressed, sink)
    }

    pub fn drag_cancel<S: NoteSink + ?Sized>(&mut self, sink: &mut S) -> Vec<Pitch> {
        self.drag.cancel(&mut self.pressed, sink)
    }

    /// Route a raw pointer event to the recognizer that owns it.
    ///
    /// A press becomes a drag once the pointer travels further than the
    /// touch slop from where it went down.
    pub fn handle<S: NoteSink + ?Sized>(&mut self, event: PointerEvent, sink: &mut S) {
        match event {
            PointerEvent::Down { x, y } => {
                if self.pointer != Pointer::Up {
                    // Missed the previous lift
                    self.cancel_gestures(sink);
                }
                self.press_down(x, y, sink);
                self.pointer = Pointer::Down { x, y };
            }
            PointerEvent::Move { x, y } => match self.pointer {
                Pointer::Up => {}
                Pointer::Down { x: x0, y: y0 } => {
                    let distance = ((x - x0).powi(2) + (y - y0).powi(2)).sqrt();
                    if distance > self.touch_slop {
                        self.press_cancel(sink);
                        self.drag_start(x, y, sink);
                        self.pointer = Pointer::Dragging;
                    }
                }
                Pointer::Dragging => {
                    self.drag_to(x, y, sink);
                }
            },
            PointerEvent::Up { .. } => {
                match self.pointer {
                    Pointer::Down { .. } => {
                        self.press_release(sink);
                    }
                    Pointer::Dragging => {
                        self.drag_end(sink);
                    }
                    Pointer::Up => {}
                }
                self.pointer = Pointer::Up;
            }
            PointerEvent::Cancel => self.cancel_gestures(sink),
        }
    }

    /// Tear down: every held pitch gets its note-off, nothing stays on.
    pub fn dispose<S: NoteSink + ?Sized>(&mut self, sink: &mut S) {
        self.cancel_gestures(sink);
    }

    fn cancel_gestures<S: NoteSink + ?Sized>(&mut self, sink: &mut S) {
        self.press.cancel(&mut self.pressed, sink);
        self.drag.cancel(&mut self.pressed, sink);
        for pitch in self.pressed.take_all() {
            sink.note_off(pitch);
        }
        self.pointer = Pointer::Up;
    }
}

impl Default for KeyboardSurface {
    fn default() -> Self {
        Self::new(&KeyboardConfig::default())
    }
}
