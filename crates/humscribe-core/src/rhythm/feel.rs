//! Articulation, groove-template and triplet-feel helpers

use std::str::FromStr;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use super::groove::{Groove, QuantizeGrid};
use super::quantize::RhythmQuantizer;
use super::tempo::detect_tempo;
use crate::error::{parse_or_fallback, HumscribeError, Result};
use crate::note::{Note, MIN_NOTE_SECS};

/// Default cap on legato notes as a fraction of the gap to the next onset
pub const DEFAULT_LEGATO: f64 = 0.95;

/// Note-length style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Articulation {
    Staccato,
    #[default]
    Normal,
    Legato,
}

impl Articulation {
    /// Fraction of the original duration kept
    pub fn length_multiplier(&self) -> f64 {
        match self {
            Self::Staccato => 0.3,
            Self::Normal => 0.8,
            Self::Legato => 0.95,
        }
    }

    pub fn from_name_or_default(name: &str) -> Self {
        parse_or_fallback(name, Self::Normal)
    }
}

impl FromStr for Articulation {
    type Err = HumscribeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staccato" => Ok(Self::Staccato),
            "normal" => Ok(Self::Normal),
            "legato" => Ok(Self::Legato),
            _ => Err(HumscribeError::UnknownArticulation(s.to_string())),
        }
    }
}

/// Rescale note lengths by articulation style.
///
/// Legato notes are additionally capped at `legato` times the distance to
/// the next onset so they never run into it.
pub fn adjust_note_lengths(notes: &[Note], style: Articulation, legato: f64) -> Vec<Note> {
    let multiplier = style.length_multiplier();
    notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            let mut duration = note.duration() * multiplier;
            if style == Articulation::Legato {
                if let Some(next) = notes.get(i + 1) {
                    duration = duration.min((next.start - note.start) * legato);
                }
            }
            let duration = duration.max(MIN_NOTE_SECS);
            Note::new(note.pitch, note.start, note.start + duration)
        })
        .collect()
}

/// Apply a groove at the melody's own tempo on a sixteenth grid.
///
/// Humanization scales with `intensity` (30% of it); zero intensity is a no-op.
pub fn apply_groove_template(notes: &[Note], groove: Groove, intensity: f64, rng: &mut Rng) -> Vec<Note> {
    if notes.is_empty() || intensity == 0.0 {
        return notes.to_vec();
    }
    RhythmQuantizer::new(QuantizeGrid::Sixteenth, detect_tempo(notes))
        .with_groove(groove)
        .with_humanize(intensity * 0.3)
        .process(notes, rng)
}

/// Pull onsets toward a beat-triplet grid, keeping each duration
pub fn add_triplet_feel(notes: &[Note], strength: f64) -> Vec<Note> {
    if notes.is_empty() || strength == 0.0 {
        return notes.to_vec();
    }
    let triplet = 60.0 / detect_tempo(notes) / 3.0;
    notes
        .iter()
        .map(|note| {
            let snapped = (note.start / triplet).round() * triplet;
            let start = note.start * (1.0 - strength) + snapped * strength;
            Note::new(note.pitch, start, start + note.duration())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staccato_shortens() {
        let notes = vec![Note::new(60, 0.0, 1.0), Note::new(62, 1.0, 1.1)];
        let out = adjust_note_lengths(&notes, Articulation::Staccato, 0.95);
        assert!((out[0].end - 0.3).abs() < 1e-12);
        // 0.03 s is below the floor
        assert!((out[1].duration() - MIN_NOTE_SECS).abs() < 1e-12);
    }

    #[test]
    fn test_legato_capped_by_next_onset() {
        let notes = vec![Note::new(60, 0.0, 2.0), Note::new(62, 0.5, 1.0)];
        let out = adjust_note_lengths(&notes, Articulation::Legato, 0.9);
        assert!((out[0].end - 0.45).abs() < 1e-12);
        assert!((out[1].end - 0.975).abs() < 1e-12);
    }

    #[test]
    fn test_groove_template_zero_intensity_noop() {
        let notes = vec![Note::new(60, 0.13, 0.4)];
        assert_eq!(apply_groove_template(&notes, Groove::Trap, 0.0, &mut Rng::with_seed(1)), notes);
    }

    #[test]
    fn test_groove_template_reproducible() {
        let notes: Vec<Note> = (0..8).map(|i| Note::new(60 + i, i as f64 * 0.5, i as f64 * 0.5 + 0.3)).collect();
        let a = apply_groove_template(&notes, Groove::Afrobeat, 0.8, &mut Rng::with_seed(5));
        let b = apply_groove_template(&notes, Groove::Afrobeat, 0.8, &mut Rng::with_seed(5));
        assert_eq!(a, b);
        assert_eq!(a.len(), notes.len());
    }

    #[test]
    fn test_full_triplet_feel_snaps() {
        // 120 BPM pulse: triplet cell = 1/6 s
        let notes: Vec<Note> = (0..5).map(|i| Note::new(60, i as f64 * 0.5 + 0.05, i as f64 * 0.5 + 0.3)).collect();
        let out = add_triplet_feel(&notes, 1.0);
        let cell = 0.5 / 3.0;
        for (orig, n) in notes.iter().zip(&out) {
            let steps = n.start / cell;
            assert!((steps - steps.round()).abs() < 1e-9);
            assert!((n.duration() - orig.duration()).abs() < 1e-12);
        }
    }
}
