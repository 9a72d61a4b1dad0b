//! Duration extension by looping the melody with light variation

use fastrand::Rng;

use crate::note::{sort_by_start, total_duration, Note};

/// Default minimum output length in seconds
pub const DEFAULT_MIN_DURATION: f64 = 15.0;

/// Chance that a repeated note is transposed
const VARIATION_PROBABILITY: f64 = 0.2;
/// Octave and fifth shifts (0 keeps the pitch but still clamps it)
const VARIATIONS: [i32; 5] = [12, -12, 7, -7, 0];
const VARIED_PITCH_RANGE: (i32, i32) = (36, 96);

/// Loop `notes` until they cover `min_duration` seconds.
///
/// Repetitions are laid back to back at the original length. Notes starting
/// at or after `min_duration` are dropped, and if that leaves the melody
/// short of the target the final note is held to reach it.
pub fn extend_duration(notes: &[Note], min_duration: f64, rng: &mut Rng) -> Vec<Note> {
    let length = total_duration(notes);
    if notes.is_empty() || length >= min_duration || length <= 0.0 {
        return notes.to_vec();
    }

    let mut extended = notes.to_vec();
    let mut offset = length;
    while offset < min_duration {
        extended.extend(notes.iter().map(|note| {
            let copy = note.shifted(offset);
            if rng.f64() < VARIATION_PROBABILITY {
                let shift = VARIATIONS[rng.usize(..VARIATIONS.len())];
                let pitch = (note.pitch as i32 + shift).clamp(VARIED_PITCH_RANGE.0, VARIED_PITCH_RANGE.1);
                copy.with_pitch(pitch as u8)
            } else {
                copy
            }
        }));
        offset += length;
    }

    extended.retain(|n| n.start < min_duration);
    sort_by_start(&mut extended);

    if total_duration(&extended) < min_duration {
        if let Some(last) = extended.iter_mut().max_by(|a, b| a.end.total_cmp(&b.end)) {
            last.end = min_duration;
        }
    }

    tracing::debug!(before = notes.len(), after = extended.len(), min_duration, "extended melody");
    extended
}
