//! The on-screen piano keyboard.
//!
//! `layout` is the single source of key geometry; `surface` hit-tests
//! pointer input against it and drives the `gesture` recognizers, which
//! keep the `pressed` set and emit note events.

/// Press and drag state machines.
pub mod gesture;
/// Keys, key rectangles and hit-testing.
pub mod layout;
/// Held pitches with change tracking.
pub mod pressed;
/// Pointer routing and teardown.
pub mod surface;

pub use layout::{build_keys, Key, KeyGeometry, KeyRect, KeyboardLayout, KEY_COUNT};
pub use pressed::PressedSet;
pub use surface::{KeyboardConfig, KeyboardSurface, PointerEvent};
