// Purpose: screen lifecycles and what they borrow from the host display

pub mod home;
pub mod keyboard;
pub mod orientation;

pub use home::{default_exercises, route_for, Exercise, ExerciseIcon, Route};
pub use keyboard::KeyboardScreen;
pub use orientation::{Orientation, OrientationControl, OrientationLock};
