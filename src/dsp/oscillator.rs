use std::f64::consts::TAU;

/*
Sine Carrier
============

Voices are a single pure sine at the key's frequency. The phase is computed
from the absolute sample index instead of being accumulated, so the value
of sample i never depends on rounding error from samples before it:

    sample(i) = sin(2π · f · i / sample_rate)

That makes a rendered voice bit-identical every time it is generated for
the same pitch.
*/

/// Index-addressed sine oscillator.
#[derive(Debug, Clone, Copy)]
pub struct SineOscillator {
    angular_step: f64,
}

impl SineOscillator {
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        Self {
            angular_step: TAU * frequency / sample_rate,
        }
    }

    /// Carrier value (-1.0 to 1.0) at sample `index`.
    #[inline]
    pub fn sample(&self, index: usize) -> f64 {
        (self.angular_step * index as f64).sin()
    }

    /// Render consecutive samples starting at `start`.
    pub fn render(&self, start: usize, out: &mut [f64]) {
        for (offset, sample) in out.iter_mut().enumerate() {
            *sample = self.sample(start + offset);
        }
    }
}
