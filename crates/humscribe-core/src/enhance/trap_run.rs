//! Trap run: scale runs filling the gaps under wide leaps

use fastrand::Rng;

use super::MelodyFx;
use crate::note::Note;
use crate::theory::Key;

/// Leaps wider than this (semitones) are candidates for a run
const MIN_RUN_INTERVAL: i32 = 3;
/// Runs need at least this much silence between the notes
const MIN_RUN_GAP: f64 = 0.15;
const MAX_FILL_NOTES: i32 = 3;
/// Fill notes sound for this fraction of their slot
const FILL_GATE: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default)]
pub struct TrapRunFx;

impl TrapRunFx {
    /// Equally spaced, scale-quantized fill notes between `from` and `to`
    fn fill(from: &Note, to: &Note, key: Key) -> Vec<Note> {
        let interval = (to.pitch as i32 - from.pitch as i32).abs();
        let gap = to.start - from.end;
        let count = MAX_FILL_NOTES.min(interval / 2);
        let slot = gap / (count + 1) as f64;
        let direction = if to.pitch > from.pitch { 1 } else { -1 };
        let step = interval / (count + 1);

        (0..count)
            .map(|j| {
                let pitch = key.quantize_clamped(from.pitch as i32 + direction * step * (j + 1));
                let start = from.end + slot * j as f64;
                Note::new(pitch, start, start + slot * FILL_GATE)
            })
            .collect()
    }
}

impl MelodyFx for TrapRunFx {
    fn name(&self) -> &'static str { "trap_run" }

    fn process(&self, notes: &[Note], intensity: f64, key: Key, rng: &mut Rng) -> Vec<Note> {
        if notes.len() < 2 {
            return notes.to_vec();
        }

        let mut out = Vec::with_capacity(notes.len() * 2);
        for pair in notes.windows(2) {
            let (curr, next) = (&pair[0], &pair[1]);
            out.push(*curr);

            let interval = (next.pitch as i32 - curr.pitch as i32).abs();
            if interval > MIN_RUN_INTERVAL && rng.f64() < intensity && next.start - curr.end > MIN_RUN_GAP {
                out.extend(Self::fill(curr, next, key));
            }
        }
        out.extend(notes.last().copied());
        out
    }
}
