//! Key and scale inference from segmented notes

use crate::note::Note;
use crate::theory::{Key, ScaleMode};

/// Scales considered during detection, in tie-break order
pub const CANDIDATE_SCALES: [ScaleMode; 7] = [
    ScaleMode::Major,
    ScaleMode::Minor,
    ScaleMode::HarmonicMinor,
    ScaleMode::MinorPentatonic,
    ScaleMode::MajorPentatonic,
    ScaleMode::Dorian,
    ScaleMode::Phrygian,
];

/// Out-of-scale pitch classes cost half their weight
const OUT_OF_SCALE_PENALTY: f64 = 0.5;

/// Summed note duration per pitch class
pub fn pitch_class_weights(notes: &[Note]) -> [f64; 12] {
    let mut weights = [0.0; 12];
    for note in notes {
        weights[(note.pitch % 12) as usize] += note.duration();
    }
    weights
}

/// Normalized fit of a weight profile against a candidate key
pub fn key_fit(weights: &[f64; 12], key: Key) -> f64 {
    let total: f64 = weights.iter().sum();
    let raw: f64 = weights
        .iter()
        .enumerate()
        .filter(|(_, w)| **w != 0.0)
        .map(|(pc, &w)| {
            let relative = ((pc as u8) + 12 - key.root) % 12;
            if key.scale.contains(relative) { w } else { -w * OUT_OF_SCALE_PENALTY }
        })
        .sum();
    if total > 0.0 { raw / total } else { raw }
}

/// Pick the best-fitting key among all roots and [`CANDIDATE_SCALES`].
///
/// Roots are enumerated C..B, scales in candidate order; the first pair
/// reaching the maximum score wins. No notes means C minor.
pub fn detect_key(notes: &[Note]) -> Key {
    if notes.is_empty() {
        return Key::default();
    }

    let weights = pitch_class_weights(notes);
    let mut best = Key::default();
    let mut best_score = f64::NEG_INFINITY;

    for root in 0..12u8 {
        for scale in CANDIDATE_SCALES {
            let candidate = Key::new(root, scale);
            let score = key_fit(&weights, candidate);
            if score > best_score {
                best_score = score;
                best = candidate;
            }
        }
    }

    tracing::debug!(key = %best, score = best_score, "detected key");
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major_triad() {
        let notes = vec![
            Note::new(60, 0.0, 1.0),
            Note::new(64, 1.0, 2.0),
            Note::new(67, 2.0, 3.0),
            Note::new(72, 3.0, 4.0),
        ];
        assert_eq!(detect_key(&notes), Key::new(0, ScaleMode::Major));
    }

    #[test]
    fn test_empty_defaults_to_c_minor() {
        assert_eq!(detect_key(&[]), Key::new(0, ScaleMode::Minor));
    }

    #[test]
    fn test_a_minor_pentatonic_line() {
        // A C D E G fits many keys perfectly; C major is enumerated first
        let notes: Vec<Note> = [57, 60, 62, 64, 67]
            .iter()
            .enumerate()
            .map(|(i, &p)| Note::new(p, i as f64 * 0.5, i as f64 * 0.5 + 0.5))
            .collect();
        assert_eq!(detect_key(&notes), Key::new(0, ScaleMode::Major));
    }

    #[test]
    fn test_out_of_scale_penalized() {
        let mut weights = [0.0; 12];
        weights[0] = 1.0;
        weights[1] = 1.0;
        // C in scale, C# out: (1 - 0.5) / 2
        assert!((key_fit(&weights, Key::new(0, ScaleMode::Major)) - 0.25).abs() < 1e-12);
        // Phrygian contains both
        assert!((key_fit(&weights, Key::new(0, ScaleMode::Phrygian)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_duration_weighting() {
        // A long F# dominates: G major would need F#, C major does not have it
        let notes = vec![
            Note::new(66, 0.0, 4.0),
            Note::new(67, 4.0, 5.0),
            Note::new(71, 5.0, 6.0),
        ];
        let key = detect_key(&notes);
        let relative = (6 + 12 - key.root) % 12;
        assert!(key.scale.contains(relative));
    }
}
