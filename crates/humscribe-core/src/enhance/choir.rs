//! Choir: stack scale-aware harmony voices over each note

use fastrand::Rng;

use super::MelodyFx;
use crate::note::{sort_by_start, Note};
use crate::theory::Key;

/// One harmony voice: interval above the melody, intensity gate, timing
struct Voice {
    interval: i32,
    threshold: f64,
    delay: f64,
    length: f64,
    quantize: bool,
}

const FIFTH: Voice = Voice { interval: 7, threshold: 0.6, delay: 0.04, length: 0.7, quantize: true };
const OCTAVE: Voice = Voice { interval: 12, threshold: 0.8, delay: 0.01, length: 0.9, quantize: false };

#[derive(Debug, Clone, Copy, Default)]
pub struct ChoirFx;

impl ChoirFx {
    fn third(key: Key) -> Voice {
        let interval = if key.scale.has_major_third() { 4 } else { 3 };
        Voice { interval, threshold: 0.3, delay: 0.02, length: 0.8, quantize: true }
    }
}

impl MelodyFx for ChoirFx {
    fn name(&self) -> &'static str { "choir" }

    fn process(&self, notes: &[Note], intensity: f64, key: Key, _rng: &mut Rng) -> Vec<Note> {
        let voices = [Self::third(key), FIFTH, OCTAVE];
        let mut out = Vec::with_capacity(notes.len() * 4);

        for note in notes {
            out.push(*note);
            for voice in voices.iter().filter(|v| intensity > v.threshold) {
                let raw = note.pitch as i32 + voice.interval;
                let pitch = if voice.quantize { key.quantize_clamped(raw) } else { raw.min(127) as u8 };
                let start = note.start + voice.delay;
                let end = (note.start + note.duration() * voice.length).max(start + 0.01);
                out.push(Note::new(pitch, start, end));
            }
        }

        sort_by_start(&mut out);
        out
    }
}
