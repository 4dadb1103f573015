use crate::keyboard::pressed::PressedSet;
use crate::pitch::Pitch;
use crate::synth::message::NoteSink;

/*
Gesture Recognizers
===================

Two independent state machines turn pointer gestures into note events.
Both write to the same pressed-set and the same note sink.


Press / release
---------------

    ┌──────┐  press(p)   ┌─────────┐
    │ Idle │ ──────────→ │ Held(p) │
    └──────┘             └─────────┘
        ↑                     │
        │  release / cancel   │  note_off(p), remove p
        └─────────────────────┘

A press adds its pitch and sounds it. However the gesture ends (lift,
cancel, or the surface going away) the held pitch gets its note-off. A
second press without a release first releases the old pitch.


Drag (monophonic slide)
-----------------------

    ┌──────┐  start(p)   ┌──────────┐
    │ Idle │ ──────────→ │ Dragging │ ──┐ update(q): q not pressed?
    └──────┘             └──────────┘ ←─┘   note_off(all), note_on(q), set = {q}
        ↑                     │
        │    end / cancel     │  note_off(every pressed pitch), clear
        └─────────────────────┘

Sliding across keys always sounds exactly the key under the finger; two
keys never sound at once through a drag.


Ordering
--------

Every note-off is emitted after the note-on it matches, and a pitch that
leaves the pressed-set always gets its note-off.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressState {
    #[default]
    Idle,
    Held(Pitch),
}

/// Press-and-hold recognizer.
#[derive(Debug, Default)]
pub struct PressGesture {
    state: PressState,
}

impl PressGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down over `pitch` (`None` when nothing is under it).
    pub fn press<S: NoteSink + ?Sized>(
        &mut self,
        pitch: Option<Pitch>,
        pressed: &mut PressedSet,
        sink: &mut S,
    ) {
        self.release(pressed, sink);

        if let Some(pitch) = pitch {
            pressed.insert(pitch);
            sink.note_on(pitch);
            self.state = PressState::Held(pitch);
        }
    }

    /// Pointer lifted. Returns the pitch that was released.
    pub fn release<S: NoteSink + ?Sized>(
        &mut self,
        pressed: &mut PressedSet,
        sink: &mut S,
    ) -> Option<Pitch> {
        match std::mem::take(&mut self.state) {
            PressState::Held(pitch) => {
                sink.note_off(pitch);
                pressed.remove(pitch);
                Some(pitch)
            }
            PressState::Idle => None,
        }
    }

    /// Gesture was cancelled. Same cleanup as a release.
    pub fn cancel<S: NoteSink + ?Sized>(
        &mut self,
        pressed: &mut PressedSet,
        sink: &mut S,
    ) -> Option<Pitch> {
        self.release(pressed, sink)
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn is_held(&self) -> bool {
        matches!(self.state, PressState::Held(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Slide-across-keys recognizer.
#[derive(Debug, Default)]
pub struct DragGesture {
    state: DragState,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drag began over `pitch`.
    pub fn start<S: NoteSink + ?Sized>(
        &mut self,
        pitch: Option<Pitch>,
        pressed: &mut PressedSet,
        sink: &mut S,
    ) {
        if self.state == DragState::Dragging {
            self.end(pressed, sink);
        }
        self.state = DragState::Dragging;

        if let Some(pitch) = pitch {
            // Replacing the set must not strand anything that was sounding.
            for old in pressed.iter().filter(|&old| old != pitch).collect::<Vec<_>>() {
                sink.note_off(old);
            }
            pressed.replace(pitch);
            sink.note_on(pitch);
        }
    }

    /// Pointer moved to a point over `pitch`. Returns true when it retriggered.
    pub fn update<S: NoteSink + ?Sized>(
        &mut self,
        pitch: Option<Pitch>,
        pressed: &mut PressedSet,
        sink: &mut S,
    ) -> bool {
        if self.state != DragState::Dragging {
            return false;
        }
        let Some(pitch) = pitch else {
            return false;
        };
        if pressed.contains(pitch) {
            return false;
        }

        for old in pressed.take_all() {
            sink.note_off(old);
        }
        pressed.replace(pitch);
        sink.note_on(pitch);
        true
    }

    /// Drag finished. Returns every pitch that was silenced.
    pub fn end<S: NoteSink + ?Sized>(
        &mut self,
        pressed: &mut PressedSet,
        sink: &mut S,
    ) -> Vec<Pitch> {
        if self.state == DragState::Idle {
            return Vec::new();
        }
        self.state = DragState::Idle;

        let released = pressed.take_all();
        for &pitch in &released {
            sink.note_off(pitch);
        }
        released
    }

    /// Drag was cancelled. Same cleanup as an end.
    pub fn cancel<S: NoteSink + ?Sized>(
        &mut self,
        pressed: &mut PressedSet,
        sink: &mut S,
    ) -> Vec<Pitch> {
        self.end(pressed, sink)
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }
}
