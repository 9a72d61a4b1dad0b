//! Ornamentation: grace notes and trills

use std::str::FromStr;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{parse_or_fallback, HumscribeError, Result};
use crate::note::Note;
use crate::theory::Key;

const GRACE_SECS: f64 = 0.05;
const TRILL_STEP_SECS: f64 = 0.06;
/// Only notes longer than this are trilled
const TRILL_MIN_SECS: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ornament {
    Grace,
    Trill,
}

impl Ornament {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grace => "grace",
            Self::Trill => "trill",
        }
    }

    pub fn from_name_or_default(name: &str) -> Self {
        parse_or_fallback(name, Self::Grace)
    }
}

impl FromStr for Ornament {
    type Err = HumscribeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grace" => Ok(Self::Grace),
            "trill" => Ok(Self::Trill),
            _ => Err(HumscribeError::UnknownOrnament(s.to_string())),
        }
    }
}

/// Ornament roughly `density` of the notes with the given style
pub fn add_ornamentation(notes: &[Note], style: Ornament, density: f64, key: Key, rng: &mut Rng) -> Vec<Note> {
    match style {
        Ornament::Grace => add_grace_notes(notes, density, key, rng),
        Ornament::Trill => add_trills(notes, density, key, rng),
    }
}

/// Next scale tone above the note
fn upper_neighbour(note: &Note, key: Key) -> u8 {
    (note.pitch as i32 + 1..=note.pitch as i32 + 12)
        .filter(|p| *p <= 127)
        .find(|p| key.scale.contains(((p - key.root as i32).rem_euclid(12)) as u8))
        .map_or_else(|| key.quantize_clamped(note.pitch as i32 + 1), |p| p as u8)
}

/// Precede notes with a quick upper-neighbour grace note
pub fn add_grace_notes(notes: &[Note], density: f64, key: Key, rng: &mut Rng) -> Vec<Note> {
    let mut out = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        // A grace note squeezed against t = 0 would have no length
        if rng.f64() < density && note.start > 0.0 {
            let start = (note.start - GRACE_SECS).max(0.0);
            out.push(Note::new(upper_neighbour(note, key), start, note.start));
        }
        out.push(*note);
    }
    out
}

/// Replace long notes with alternating main / upper-neighbour notes
pub fn add_trills(notes: &[Note], density: f64, key: Key, rng: &mut Rng) -> Vec<Note> {
    let mut out = Vec::with_capacity(notes.len());
    for note in notes {
        if note.duration() > TRILL_MIN_SECS && rng.f64() < density {
            let upper = upper_neighbour(note, key);
            let steps = (note.duration() / TRILL_STEP_SECS) as usize;
            out.extend((0..steps).map(|i| {
                let start = note.start + i as f64 * TRILL_STEP_SECS;
                let pitch = if i % 2 == 0 { note.pitch } else { upper };
                Note::new(pitch, start, (start + TRILL_STEP_SECS).min(note.end))
            }));
        } else {
            out.push(*note);
        }
    }
    out
}
