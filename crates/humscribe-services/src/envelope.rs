//! ADSR amplitude envelope

use serde::{Deserialize, Serialize};

/// Attack, decay and release in seconds; sustain as a level in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adsr {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl Adsr {
    pub const fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self { attack, decay, sustain, release }
    }

    /// Envelope gain for a tone of `length` samples.
    ///
    /// Segments are laid out attack, decay, sustain, release. A segment that
    /// does not fit inside the tone is skipped and the samples it would have
    /// covered keep whatever level the earlier segments left (1.0 if none),
    /// so very short notes never index out of bounds.
    pub fn render(&self, length: usize, sample_rate: u32) -> Vec<f64> {
        let sr = sample_rate as f64;
        let attack = (self.attack * sr) as usize;
        let decay = (self.decay * sr) as usize;
        let release = (self.release * sr) as usize;
        let mut env = vec![1.0; length];

        if attack > 0 && attack < length {
            ramp(&mut env[..attack], 0.0, 1.0);
        }
        if decay > 0 && attack + decay < length {
            ramp(&mut env[attack..attack + decay], 1.0, self.sustain);
        }

        let sustain_start = attack + decay;
        let sustain_end = sustain_start.max(length.saturating_sub(release));
        if sustain_start < sustain_end {
            env[sustain_start..sustain_end].fill(self.sustain);
        }

        if release > 0 && release < length {
            ramp(&mut env[length - release..], self.sustain, 0.0);
        }
        env
    }
}

/// Fill `out` with evenly spaced values from `from` to `to`, both inclusive
fn ramp(out: &mut [f64], from: f64, to: f64) {
    let steps = out.len().saturating_sub(1).max(1) as f64;
    for (i, v) in out.iter_mut().enumerate() {
        *v = from + (to - from) * i as f64 / steps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_inclusive() {
        let mut buf = [0.0; 5];
        ramp(&mut buf, 0.0, 1.0);
        assert_eq!(buf, [0.0, 0.25, 0.5, 0.75, 1.0]);
        let mut one = [9.0];
        ramp(&mut one, 0.3, 0.0);
        assert_eq!(one, [0.3]);
    }

    #[test]
    fn test_full_shape() {
        // 1 kHz: 10 attack, 10 decay, 20 release samples in a 100-sample tone
        let adsr = Adsr::new(0.01, 0.01, 0.5, 0.02);
        let env = adsr.render(100, 1000);
        assert_eq!(env.len(), 100);
        assert_eq!(env[0], 0.0);
        assert_eq!(env[9], 1.0);
        assert_eq!(env[10], 1.0);
        assert_eq!(env[19], 0.5);
        assert!(env[20..80].iter().all(|v| *v == 0.5));
        assert_eq!(env[80], 0.5);
        assert_eq!(env[99], 0.0);
    }

    #[test]
    fn test_short_tone_skips_segments() {
        // Attack alone is longer than the tone
        let adsr = Adsr::new(0.3, 0.2, 0.9, 0.5);
        let env = adsr.render(100, 1000);
        assert_eq!(env.len(), 100);
        assert!(env.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(env.iter().all(|v| *v == 1.0));
    }

    #[test]
    fn test_release_only_fits() {
        let adsr = Adsr::new(0.0, 0.0, 0.8, 0.05);
        let env = adsr.render(100, 1000);
        assert!(env[..50].iter().all(|v| *v == 0.8));
        assert_eq!(env[50], 0.8);
        assert_eq!(env[99], 0.0);
    }

    #[test]
    fn test_zero_length() {
        assert!(Adsr::new(0.01, 0.05, 0.7, 0.15).render(0, 44_100).is_empty());
    }
}
