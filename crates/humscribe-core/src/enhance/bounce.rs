//! Bounce: staccato articulation

use fastrand::Rng;

use super::MelodyFx;
use crate::note::{Note, MIN_NOTE_SECS};
use crate::theory::Key;

/// Full intensity removes this fraction of each note
const MAX_SHORTENING: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default)]
pub struct BounceFx;

impl MelodyFx for BounceFx {
    fn name(&self) -> &'static str { "bounce" }

    fn process(&self, notes: &[Note], intensity: f64, _key: Key, _rng: &mut Rng) -> Vec<Note> {
        notes
            .iter()
            .map(|note| {
                let duration = (note.duration() * (1.0 - intensity * MAX_SHORTENING)).max(MIN_NOTE_SECS);
                Note::new(note.pitch, note.start, note.start + duration)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortens_by_intensity() {
        let notes = vec![Note::new(60, 1.0, 2.0)];
        let out = BounceFx.process(&notes, 1.0, Key::default(), &mut Rng::with_seed(0));
        assert!((out[0].duration() - 0.3).abs() < 1e-12);
        assert_eq!(out[0].start, 1.0);

        let half = BounceFx.process(&notes, 0.5, Key::default(), &mut Rng::with_seed(0));
        assert!((half[0].duration() - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_floor_at_fifty_ms() {
        let notes = vec![Note::new(60, 0.0, 0.06)];
        let out = BounceFx.process(&notes, 1.0, Key::default(), &mut Rng::with_seed(0));
        assert!((out[0].duration() - MIN_NOTE_SECS).abs() < 1e-12);
    }
}
