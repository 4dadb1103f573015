use saavy_keys::{
    dsp::VoiceConfig,
    keyboard::{KeyboardConfig, KeyboardSurface, PointerEvent},
    pitch::{C4, CS4, E4, G4},
    screen::{KeyboardScreen, Orientation, OrientationControl},
    synth::recorder::{RecordingBackend, TrackOp},
    Pitch,
};

const W: f32 = 2_100.0;
const H: f32 = 200.0;

#[derive(Debug)]
struct Display {
    requested: Orientation,
    history: Vec<Orientation>,
}

impl Display {
    fn new(requested: Orientation) -> Self {
        Self {
            requested,
            history: Vec::new(),
        }
    }
}

impl OrientationControl for Display {
    fn requested(&self) -> Orientation {
        self.requested
    }

    fn request(&mut self, orientation: Orientation) {
        self.requested = orientation;
        self.history.push(orientation);
    }
}

fn short_voices() -> VoiceConfig {
    VoiceConfig::new().duration(0.05)
}

/// A surface point that hits `pitch`, low on the key for white keys.
fn point_of(surface: &KeyboardSurface, pitch: Pitch) -> (f32, f32) {
    let rect = surface
        .geometry()
        .paint_order()
        .find(|rect| rect.pitch == pitch)
        .copied()
        .expect("pitch is on the keyboard");
    let (x, y) = rect.center();
    if rect.accidental {
        (x, y)
    } else {
        (x, H * 0.9)
    }
}

fn position(ops: &[TrackOp], wanted: impl Fn(&TrackOp) -> bool) -> Vec<usize> {
    ops.iter()
        .enumerate()
        .filter(|(_, op)| wanted(op))
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn entering_forces_landscape_and_leaving_restores_portrait() {
    let mut backend = RecordingBackend::new();
    let mut display = Display::new(Orientation::Portrait);

    let screen = KeyboardScreen::enter(
        &KeyboardConfig::default(),
        short_voices(),
        &mut backend,
        &mut display,
    );
    assert!(screen.orientation().control().requested().is_landscape());
    drop(screen);

    assert_eq!(display.requested, Orientation::Portrait);
    assert_eq!(
        display.history,
        vec![Orientation::SensorLandscape, Orientation::Portrait]
    );
}

#[test]
fn unlocked_display_returns_to_unspecified() {
    let mut backend = RecordingBackend::new();
    let mut display = Display::new(Orientation::Unspecified);

    let mut screen = KeyboardScreen::enter(
        &KeyboardConfig::default(),
        short_voices(),
        &mut backend,
        &mut display,
    );
    screen.dispose();
    drop(screen);

    assert_eq!(display.requested, Orientation::Unspecified);
}

#[test]
fn disposal_silences_held_pitches_before_releasing_tracks() {
    let mut backend = RecordingBackend::new();
    let mut display = Display::new(Orientation::Portrait);

    let mut screen = KeyboardScreen::enter(
        &KeyboardConfig::default(),
        short_voices(),
        &mut backend,
        &mut display,
    );
    screen.resize(W, H);

    // A drag on E4 and a press on C4 at the same time
    {
        let (surface, voices) = screen.parts_mut();
        let (ex, ey) = point_of(surface, E4);
        let (cx, cy) = point_of(surface, C4);
        surface.drag_start(ex, ey, voices);
        surface.press_down(cx, cy, voices);
    }
    let held: Vec<Pitch> = screen.surface().pressed().iter().collect();
    assert_eq!(held, vec![C4, E4]);
    drop(screen);

    let ops = backend.ops();
    let stops = position(ops, |op| matches!(op, TrackOp::Stop(_)));
    let releases = position(ops, |op| matches!(op, TrackOp::Release(_)));

    assert_eq!(stops.len(), 2, "one note-off per held pitch: {:?}", ops);
    assert_eq!(releases.len(), 2);
    assert!(stops.iter().max() < releases.iter().min());
    assert_eq!(backend.live_tracks(), 0);
    assert_eq!(display.requested, Orientation::Portrait);
}

#[test]
fn drag_across_keys_through_the_screen() {
    let mut backend = RecordingBackend::new();
    let mut display = Display::new(Orientation::Portrait);

    let mut screen = KeyboardScreen::enter(
        &KeyboardConfig::default(),
        short_voices(),
        &mut backend,
        &mut display,
    );
    screen.resize(W, H);
    let (ax, ay) = point_of(screen.surface(), C4);
    let (bx, by) = point_of(screen.surface(), G4);

    screen.handle_pointer(PointerEvent::Down { x: ax, y: ay });
    screen.handle_pointer(PointerEvent::Move { x: bx, y: by });
    assert_eq!(screen.surface().pressed().iter().collect::<Vec<_>>(), vec![G4]);
    assert!(screen.voices().voice(G4).is_some_and(|v| v.is_playing()));
    assert!(screen.voices().voice(C4).is_some_and(|v| !v.is_playing()));

    screen.handle_pointer(PointerEvent::Up { x: bx, y: by });
    assert!(screen.surface().is_idle());
    assert_eq!(screen.voices().len(), 2);
}

#[test]
fn repeated_notes_reuse_their_voice() {
    let mut backend = RecordingBackend::new();
    let mut display = Display::new(Orientation::Portrait);

    let mut screen = KeyboardScreen::enter(
        &KeyboardConfig::default(),
        short_voices(),
        &mut backend,
        &mut display,
    );
    screen.resize(W, H);
    let (x, y) = point_of(screen.surface(), CS4);

    for _ in 0..5 {
        screen.handle_pointer(PointerEvent::Down { x, y });
        screen.handle_pointer(PointerEvent::Up { x, y });
    }
    assert_eq!(screen.voices().generated_count(), 1);
    drop(screen);

    let creates = position(backend.ops(), |op| matches!(op, TrackOp::Create { .. }));
    let plays = position(backend.ops(), |op| matches!(op, TrackOp::Play(_)));
    assert_eq!(creates.len(), 1);
    assert_eq!(plays.len(), 5);
}

#[test]
fn failed_allocation_leaves_the_keyboard_playable() {
    let mut backend = RecordingBackend::new().track_limit(1);
    let mut display = Display::new(Orientation::Portrait);

    let mut screen = KeyboardScreen::enter(
        &KeyboardConfig::default(),
        short_voices(),
        &mut backend,
        &mut display,
    );
    screen.resize(W, H);
    let (cx, cy) = point_of(screen.surface(), C4);
    let (ex, ey) = point_of(screen.surface(), E4);

    screen.handle_pointer(PointerEvent::Down { x: cx, y: cy });
    screen.handle_pointer(PointerEvent::Up { x: cx, y: cy });
    screen.handle_pointer(PointerEvent::Down { x: ex, y: ey });

    // E4 is silent but still tracked as pressed
    assert!(screen.surface().pressed().contains(E4));
    assert!(!screen.voices().contains(E4));

    screen.handle_pointer(PointerEvent::Up { x: ex, y: ey });
    assert!(screen.surface().is_idle());
}

#[test]
fn non_c_start_keeps_hit_testing_on_the_drawn_keys() {
    let mut backend = RecordingBackend::new();
    let mut display = Display::new(Orientation::Portrait);
    let config = KeyboardConfig::new().start_pitch(Pitch::new(62).expect("valid pitch"));

    let mut screen = KeyboardScreen::enter(&config, short_voices(), &mut backend, &mut display);
    screen.resize(W, H);

    let surface = screen.surface();
    for rect in surface.geometry().paint_order() {
        let (x, y) = point_of(surface, rect.pitch);
        assert_eq!(surface.locate(x, y), Some(rect.pitch), "{}", rect.pitch);
    }
}
