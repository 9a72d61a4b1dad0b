//! Smooth: pull wide leaps back toward stepwise motion

use fastrand::Rng;

use super::MelodyFx;
use crate::note::Note;
use crate::theory::Key;

/// Leaps wider than a perfect fourth are smoothed
const MAX_LEAP: i32 = 5;
/// Largest step the smoothed target moves from the previous note
const TARGET_STEP: i32 = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothFx;

impl MelodyFx for SmoothFx {
    fn name(&self) -> &'static str { "smooth" }

    fn process(&self, notes: &[Note], intensity: f64, key: Key, _rng: &mut Rng) -> Vec<Note> {
        let Some((first, rest)) = notes.split_first() else { return Vec::new() };

        let mut smoothed = Vec::with_capacity(notes.len());
        smoothed.push(*first);
        let mut prev = first.pitch as i32;

        for note in rest {
            let curr = note.pitch as i32;
            let interval = curr - prev;

            let pitch = if interval.abs() > MAX_LEAP {
                let target = prev + interval.signum() * interval.abs().min(TARGET_STEP);
                let blended = (curr as f64 * (1.0 - intensity) + target as f64 * intensity).floor() as i32;
                key.quantize_clamped(blended)
            } else {
                note.pitch
            };

            smoothed.push(note.with_pitch(pitch));
            prev = pitch as i32;
        }

        smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::ScaleMode;

    #[test]
    fn test_full_intensity_caps_leap() {
        let key = Key::new(0, ScaleMode::Major);
        let notes = vec![Note::new(60, 0.0, 0.5), Note::new(72, 0.5, 1.0)];
        let out = SmoothFx.process(&notes, 1.0, key, &mut Rng::with_seed(0));
        // Target 63 (D#) is equidistant from D and E; D comes first in the scale
        assert_eq!(out[1].pitch, 62);
        assert_eq!(out[1].start, 0.5);
    }

    #[test]
    fn test_small_steps_untouched() {
        let notes = vec![Note::new(60, 0.0, 0.5), Note::new(65, 0.5, 1.0), Note::new(61, 1.0, 1.5)];
        let out = SmoothFx.process(&notes, 1.0, Key::default(), &mut Rng::with_seed(0));
        assert_eq!(out, notes);
    }

    #[test]
    fn test_zero_intensity_only_requantizes() {
        let key = Key::new(0, ScaleMode::Major);
        let notes = vec![Note::new(60, 0.0, 0.5), Note::new(73, 0.5, 1.0)];
        let out = SmoothFx.process(&notes, 0.0, key, &mut Rng::with_seed(0));
        assert_eq!(out[1].pitch, 72);
    }

    #[test]
    fn test_compares_against_smoothed_previous() {
        let key = Key::new(0, ScaleMode::Major);
        let notes = vec![Note::new(60, 0.0, 0.5), Note::new(72, 0.5, 1.0), Note::new(72, 1.0, 1.5)];
        let out = SmoothFx.process(&notes, 1.0, key, &mut Rng::with_seed(0));
        // Second note became 62, so the repeated 72 is a leap of 10 again
        assert_eq!(out[2].pitch, 65);
    }
}
