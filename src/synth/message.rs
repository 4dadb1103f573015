use crate::pitch::Pitch;

/// A note event emitted by the keyboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoteEvent {
    NoteOn(Pitch),
    NoteOff(Pitch),
}

impl NoteEvent {
    pub fn pitch(&self) -> Pitch {
        match *self {
            NoteEvent::NoteOn(pitch) | NoteEvent::NoteOff(pitch) => pitch,
        }
    }
}

/// Receiver of note-on/note-off events.
pub trait NoteSink {
    fn note_on(&mut self, pitch: Pitch);
    fn note_off(&mut self, pitch: Pitch);
}

impl<S: NoteSink + ?Sized> NoteSink for &mut S {
    fn note_on(&mut self, pitch: Pitch) {
        (**self).note_on(pitch);
    }

    fn note_off(&mut self, pitch: Pitch) {
        (**self).note_off(pitch);
    }
}

/// Records events in order. Useful for tests and offline runs.
impl NoteSink for Vec<NoteEvent> {
    fn note_on(&mut self, pitch: Pitch) {
        self.push(NoteEvent::NoteOn(pitch));
    }

    fn note_off(&mut self, pitch: Pitch) {
        self.push(NoteEvent::NoteOff(pitch));
    }
}
