/*
Baked Attack-Hold-Release Envelope
==================================

Voices are rendered once into a fixed-length buffer, so the envelope is a
pure function of the sample index rather than a gate-driven state machine.
There is no decay or sustain stage: the note ramps in, holds at full level,
and ramps out before the buffer ends.


The Shape
---------

  Level
    1.0 ┐   ________________________________
        │  ╱                                ╲
        │ ╱                                  ╲
    0.0 └╱────────────────────────────────────╲──→ Sample index
        0  attack                   n-release   n
         (A)          (hold)                (R)


The Math
--------

Times convert to whole sample counts once:

    attack_samples  = round(max(attack  * sample_rate, 1))
    release_samples = round(max(release * sample_rate, 1))

Gain at sample i of a buffer of n samples:

    i <  attack_samples          →  i / attack_samples
    i >  n - release_samples     →  (n - i) / release_samples
    otherwise                    →  1.0

Example: 10ms attack, 150ms release at 44.1kHz, 2s buffer
  - attack_samples  = 441
  - release_samples = 6615
  - n               = 88200
  - samples 441..=81585 play at full level


Note-off
--------

Because the release is baked into the tail of the buffer, stopping playback
early cuts the note abruptly instead of fading it. That is accepted: keys
released before the buffer finishes just stop.
*/

/// Pre-computed sample counts for a linear attack-hold-release curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    attack_samples: usize,
    release_samples: usize,
    total_samples: usize,
}

impl Envelope {
    /// Build from times in seconds.
    pub fn attack_hold_release(
        attack: f64,
        release: f64,
        total_samples: usize,
        sample_rate: f64,
    ) -> Self {
        Self {
            attack_samples: (attack * sample_rate).max(1.0).round() as usize,
            release_samples: (release * sample_rate).max(1.0).round() as usize,
            total_samples,
        }
    }

    /// Gain (0.0 to 1.0) applied to sample `index`.
    #[inline]
    pub fn gain(&self, index: usize) -> f64 {
        let n = self.total_samples;
        if index < self.attack_samples {
            index as f64 / self.attack_samples as f64
        } else if index + self.release_samples > n {
            (n.saturating_sub(index)) as f64 / self.release_samples as f64
        } else {
            1.0
        }
    }

    /// Fill `buffer` with gains for indices `0..buffer.len()`.
    pub fn render(&self, buffer: &mut [f64]) {
        for (index, gain) in buffer.iter_mut().enumerate() {
            *gain = self.gain(index);
        }
    }

    pub fn attack_samples(&self) -> usize {
        self.attack_samples
    }

    pub fn release_samples(&self) -> usize {
        self.release_samples
    }

    pub fn total_samples(&self) -> usize {
        self.total_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 44_100.0;

    fn default_envelope() -> Envelope {
        Envelope::attack_hold_release(0.01, 0.15, 88_200, SAMPLE_RATE)
    }

    #[test]
    fn converts_times_to_samples() {
        let env = default_envelope();
        assert_eq!(env.attack_samples(), 441);
        assert_eq!(env.release_samples(), 6615);
    }

    #[test]
    fn attack_starts_silent_and_ramps_linearly() {
        let env = default_envelope();
        assert_eq!(env.gain(0), 0.0);
        assert!((env.gain(220) - 220.0 / 441.0).abs() < 1e-12);
        assert_eq!(env.gain(441), 1.0);
    }

    #[test]
    fn holds_full_level_between_ramps() {
        let env = default_envelope();
        for index in [441, 10_000, 50_000, 88_200 - 6615] {
            assert_eq!(env.gain(index), 1.0, "index {index}");
        }
    }

    #[test]
    fn release_falls_to_zero_at_end() {
        let env = default_envelope();
        let last = env.gain(88_199);
        assert!(last > 0.0 && last < 0.001);
        assert_eq!(env.gain(88_200), 0.0);
        assert!(env.gain(85_000) < env.gain(82_000));
    }

    #[test]
    fn tiny_times_still_take_one_sample() {
        let env = Envelope::attack_hold_release(0.0, 0.0, 100, 1_000.0);
        assert_eq!(env.attack_samples(), 1);
        assert_eq!(env.release_samples(), 1);
        assert_eq!(env.gain(0), 0.0);
        assert_eq!(env.gain(50), 1.0);
    }
}
