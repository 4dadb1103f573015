#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Requested display orientation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// No preference; follow the device.
    #[default]
    Unspecified,
    Portrait,
    Landscape,
    /// Landscape, either way up.
    SensorLandscape,
}

impl Orientation {
    pub fn is_landscape(self) -> bool {
        matches!(self, Orientation::Landscape | Orientation::SensorLandscape)
    }

    pub fn label(self) -> &'static str {
        match self {
            Orientation::Unspecified => "unspecified",
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::SensorLandscape => "landscape (sensor)",
        }
    }
}

/// Whatever owns the display's orientation request.
pub trait OrientationControl {
    fn requested(&self) -> Orientation;
    fn request(&mut self, orientation: Orientation);
}

impl<O: OrientationControl + ?Sized> OrientationControl for &mut O {
    fn requested(&self) -> Orientation {
        (**self).requested()
    }

    fn request(&mut self, orientation: Orientation) {
        (**self).request(orientation);
    }
}

/// Holds an orientation for as long as it lives, then puts back the previous one.
pub struct OrientationLock<O: OrientationControl> {
    control: O,
    previous: Orientation,
    restored: bool,
}

impl<O: OrientationControl> OrientationLock<O> {
    pub fn lock(mut control: O, orientation: Orientation) -> Self {
        let previous = control.requested();
        control.request(orientation);
        Self {
            control,
            previous,
            restored: false,
        }
    }

    /// Put back the orientation that was requested before the lock. Idempotent.
    pub fn restore(&mut self) {
        if !self.restored {
            self.control.request(self.previous);
            self.restored = true;
        }
    }

    pub fn previous(&self) -> Orientation {
        self.previous
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    pub fn control(&self) -> &O {
        &self.control
    }
}

impl<O: OrientationControl> Drop for OrientationLock<O> {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Display {
        requested: Orientation,
        requests: usize,
    }

    impl OrientationControl for Display {
        fn requested(&self) -> Orientation {
            self.requested
        }

        fn request(&mut self, orientation: Orientation) {
            self.requested = orientation;
            self.requests += 1;
        }
    }

    #[test]
    fn lock_forces_and_drop_restores() {
        let mut display = Display {
            requested: Orientation::Portrait,
            requests: 0,
        };
        {
            let lock = OrientationLock::lock(&mut display, Orientation::SensorLandscape);
            assert_eq!(lock.control().requested(), Orientation::SensorLandscape);
            assert_eq!(lock.previous(), Orientation::Portrait);
        }
        assert_eq!(display.requested, Orientation::Portrait);
    }

    #[test]
    fn restore_happens_once() {
        let mut display = Display::default();
        {
            let mut lock = OrientationLock::lock(&mut display, Orientation::Landscape);
            lock.restore();
            lock.restore();
            assert!(lock.is_restored());
        }
        assert_eq!(display.requested, Orientation::Unspecified);
        assert_eq!(display.requests, 2);
    }
}
