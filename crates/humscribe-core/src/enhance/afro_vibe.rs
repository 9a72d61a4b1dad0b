//! Afro vibe: off-beat syncopation with occasional stutters

use fastrand::Rng;

use super::MelodyFx;
use crate::note::{sort_by_start, Note};
use crate::theory::Key;

/// Syncopation works on a sixteenth grid at an assumed 120 BPM
const SIXTEENTH_AT_120: f64 = 0.5 / 4.0;
const SYNCOPATION_DEPTH: f64 = 0.3;
const SYNCOPATION_THRESHOLD: f64 = 0.3;
const STUTTER_THRESHOLD: f64 = 0.6;
const STUTTER_PROBABILITY: f64 = 0.3;
const STUTTER_MIN_GAP: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default)]
pub struct AfroVibeFx;

impl MelodyFx for AfroVibeFx {
    fn name(&self) -> &'static str { "afro_vibe" }

    fn process(&self, notes: &[Note], intensity: f64, _key: Key, rng: &mut Rng) -> Vec<Note> {
        let offset = SIXTEENTH_AT_120 * SYNCOPATION_DEPTH * intensity;
        let mut out = Vec::with_capacity(notes.len() + notes.len() / 2);

        for (i, note) in notes.iter().enumerate() {
            let pushed = if i % 2 == 1 && intensity > SYNCOPATION_THRESHOLD {
                note.shifted(offset)
            } else {
                *note
            };
            out.push(pushed);

            if intensity <= STUTTER_THRESHOLD {
                continue;
            }
            let Some(next) = notes.get(i + 1) else { continue };
            let gap = next.start - note.end;
            if gap > STUTTER_MIN_GAP && rng.f64() < STUTTER_PROBABILITY {
                let start = note.end + gap * 0.3;
                out.push(Note::new(note.pitch, start, start + (gap * 0.4).min(0.1)));
            }
        }

        sort_by_start(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse() -> Vec<Note> {
        (0..16).map(|i| Note::new(60 + (i % 5) as u8, i as f64, i as f64 + 0.4)).collect()
    }

    #[test]
    fn test_odd_notes_pushed() {
        let out = AfroVibeFx.process(&pulse(), 0.5, Key::default(), &mut Rng::with_seed(2));
        assert_eq!(out.len(), 16);
        let offset = 0.125 * 0.3 * 0.5;
        assert_eq!(out[0].start, 0.0);
        assert!((out[1].start - (1.0 + offset)).abs() < 1e-12);
        assert!((out[1].duration() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_low_intensity_unchanged() {
        let out = AfroVibeFx.process(&pulse(), 0.2, Key::default(), &mut Rng::with_seed(2));
        assert_eq!(out, pulse());
    }

    #[test]
    fn test_stutters_are_short_and_sorted() {
        let out = AfroVibeFx.process(&pulse(), 1.0, Key::default(), &mut Rng::with_seed(9));
        assert!(out.len() >= 16);
        assert!(out.windows(2).all(|w| w[0].start <= w[1].start));
        let stutters = out.len() - 16;
        let short = out.iter().filter(|n| (n.duration() - 0.1).abs() < 1e-12).count();
        assert_eq!(short, stutters);
    }

    #[test]
    fn test_seeded_reproducible() {
        let a = AfroVibeFx.process(&pulse(), 0.9, Key::default(), &mut Rng::with_seed(4));
        let b = AfroVibeFx.process(&pulse(), 0.9, Key::default(), &mut Rng::with_seed(4));
        assert_eq!(a, b);
    }
}
