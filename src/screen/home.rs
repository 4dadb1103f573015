#[cfg(feature = "serde")]
use serde::Serialize;

/// Icon shown next to an exercise.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseIcon {
    Piano,
    MusicNote,
    QueueMusic,
}

impl ExerciseIcon {
    /// Single-width glyph for text front-ends.
    pub fn glyph(self) -> char {
        match self {
            ExerciseIcon::Piano => '▥',
            ExerciseIcon::MusicNote => '♪',
            ExerciseIcon::QueueMusic => '♫',
        }
    }
}

/// One entry of the home list.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: ExerciseIcon,
}

/// Screens reachable from home.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Keyboard,
}

pub const KEYBOARD_EXERCISE_ID: &str = "keyboard";

/// The exercises offered on the home screen, in display order.
pub fn default_exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            id: KEYBOARD_EXERCISE_ID,
            title: "Piano Keyboard (3 octaves)",
            subtitle: "Landscape-only screen with a playable keyboard",
            icon: ExerciseIcon::Piano,
        },
        Exercise {
            id: "intervals",
            title: "Interval Training",
            subtitle: "Learn to recognize intervals by ear",
            icon: ExerciseIcon::MusicNote,
        },
        Exercise {
            id: "chords",
            title: "Chord Ear Training",
            subtitle: "Major, minor, diminished, augmented",
            icon: ExerciseIcon::QueueMusic,
        },
        Exercise {
            id: "notes",
            title: "Note Reading",
            subtitle: "Treble & bass clef drills",
            icon: ExerciseIcon::Piano,
        },
    ]
}

/// Where selecting `exercise` leads. Only the keyboard has a screen so far.
pub fn route_for(exercise: &Exercise) -> Option<Route> {
    match exercise.id {
        KEYBOARD_EXERCISE_ID => Some(Route::Keyboard),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_four_exercises_keyboard_first() {
        let exercises = default_exercises();
        let ids: Vec<&str> = exercises.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["keyboard", "intervals", "chords", "notes"]);
    }

    #[test]
    fn only_keyboard_has_a_route() {
        let routes: Vec<Option<Route>> = default_exercises().iter().map(route_for).collect();
        assert_eq!(routes, vec![Some(Route::Keyboard), None, None, None]);
    }
}
