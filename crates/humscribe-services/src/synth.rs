//! Additive tone generation

use std::f64::consts::TAU;

use fastrand::Rng;

use crate::instruments::InstrumentProfile;

/// Maximum random detune applied to each partial, in Hz
pub const DETUNE_HZ: f64 = 0.5;

/// How much a dull instrument (brightness < 1) is attenuated at brightness 0
const SOFTENING: f64 = 0.3;

/// Synthesize `length` samples of `freq` with the profile's partials and envelope.
///
/// Each partial gets its own detune drawn from `rng`. The partial sum is
/// divided by the partial count before the envelope is applied.
pub fn additive_tone(
    freq: f64,
    length: usize,
    sample_rate: u32,
    profile: &InstrumentProfile,
    rng: &mut Rng,
) -> Vec<f64> {
    let sr = sample_rate as f64;
    let mut tone = vec![0.0; length];

    for &(mult, amp) in profile.harmonics {
        let detune = (rng.f64() * 2.0 - 1.0) * DETUNE_HZ;
        let step = TAU * (freq * mult + detune) / sr;
        for (i, s) in tone.iter_mut().enumerate() {
            *s += amp * (step * i as f64).sin();
        }
    }

    let partials = profile.harmonics.len().max(1) as f64;
    let softening = if profile.brightness < 1.0 {
        1.0 - (1.0 - profile.brightness) * SOFTENING
    } else {
        1.0
    };
    let envelope = profile.envelope.render(length, sample_rate);
    for (s, gain) in tone.iter_mut().zip(envelope) {
        *s = *s / partials * gain * softening;
    }
    tone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::Instrument;

    #[test]
    fn test_length_and_bounds() {
        let mut rng = Rng::with_seed(1);
        for inst in Instrument::ALL {
            let tone = additive_tone(440.0, 4410, 44_100, inst.profile(), &mut rng);
            assert_eq!(tone.len(), 4410);
            // Partial amplitudes are at most 1.0 each
            assert!(tone.iter().all(|s| s.abs() <= 1.0));
        }
    }

    #[test]
    fn test_starts_silent_with_attack() {
        let tone = additive_tone(220.0, 2000, 44_100, Instrument::Piano.profile(), &mut Rng::with_seed(4));
        assert_eq!(tone[0], 0.0);
        assert!(tone.iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn test_detune_is_seeded() {
        let p = Instrument::Synth.profile();
        let a = additive_tone(330.0, 500, 44_100, p, &mut Rng::with_seed(9));
        let b = additive_tone(330.0, 500, 44_100, p, &mut Rng::with_seed(9));
        let c = additive_tone(330.0, 500, 44_100, p, &mut Rng::with_seed(10));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_dull_instrument_softened() {
        let strings = Instrument::Strings.profile();
        let bright = InstrumentProfile { brightness: 1.0, ..*strings };
        let a = additive_tone(440.0, 8000, 44_100, strings, &mut Rng::with_seed(2));
        let b = additive_tone(440.0, 8000, 44_100, &bright, &mut Rng::with_seed(2));
        let ratio = a[7000] / b[7000];
        assert!((ratio - 0.97).abs() < 1e-9);
    }
}
