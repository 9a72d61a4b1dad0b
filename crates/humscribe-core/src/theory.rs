//! Scale catalog, keys, and pitch quantization

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{parse_or_fallback, HumscribeError, Result};
use crate::note::Note;

/// Canonical pitch-class names, index = semitones above C
pub const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

// ============================================================================
// Scales
// ============================================================================

/// Display grouping for the scale catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleCategory {
    Western,
    Modes,
    Pentatonic,
    Blues,
    Afrobeat,
    Trap,
    World,
}

impl ScaleCategory {
    pub const ALL: [Self; 7] = [
        Self::Western,
        Self::Modes,
        Self::Pentatonic,
        Self::Blues,
        Self::Afrobeat,
        Self::Trap,
        Self::World,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Western => "Western",
            Self::Modes => "Modes",
            Self::Pentatonic => "Pentatonic",
            Self::Blues => "Blues",
            Self::Afrobeat => "Afrobeat",
            Self::Trap => "Trap/Hip-hop",
            Self::World => "World",
        }
    }
}

/// Scale/mode types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    Major,
    #[default]
    Minor,
    HarmonicMinor,
    MelodicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
    MajorBlues,
    Afrobeat,
    AfroPentatonic,
    Trap,
    TrapPentatonic,
    Arabic,
    Japanese,
    HungarianMinor,
    Spanish,
}

impl ScaleMode {
    /// Every catalog entry, in display order
    pub const ALL: [Self; 21] = [
        Self::Major,
        Self::Minor,
        Self::HarmonicMinor,
        Self::MelodicMinor,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Locrian,
        Self::MajorPentatonic,
        Self::MinorPentatonic,
        Self::Blues,
        Self::MajorBlues,
        Self::Afrobeat,
        Self::AfroPentatonic,
        Self::Trap,
        Self::TrapPentatonic,
        Self::Arabic,
        Self::Japanese,
        Self::HungarianMinor,
        Self::Spanish,
    ];

    /// Get scale intervals (semitones from root, ascending, always starting at 0)
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Self::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Self::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            Self::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Self::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Self::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Self::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Self::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Self::MajorPentatonic => &[0, 2, 4, 7, 9],
            Self::MinorPentatonic => &[0, 3, 5, 7, 10],
            Self::Blues => &[0, 3, 5, 6, 7, 10],
            Self::MajorBlues => &[0, 2, 3, 4, 7, 9],
            // Minor with a major sixth
            Self::Afrobeat => &[0, 2, 3, 5, 7, 9, 10],
            Self::AfroPentatonic => &[0, 2, 5, 7, 10],
            // Harmonic minor variant
            Self::Trap => &[0, 2, 3, 5, 7, 8, 11],
            Self::TrapPentatonic => &[0, 3, 5, 7, 10],
            Self::Arabic => &[0, 1, 4, 5, 7, 8, 11],
            Self::Japanese => &[0, 1, 5, 7, 8],
            Self::HungarianMinor => &[0, 2, 3, 6, 7, 8, 11],
            // Phrygian dominant
            Self::Spanish => &[0, 1, 4, 5, 7, 8, 10],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::HarmonicMinor => "harmonic_minor",
            Self::MelodicMinor => "melodic_minor",
            Self::Dorian => "dorian",
            Self::Phrygian => "phrygian",
            Self::Lydian => "lydian",
            Self::Mixolydian => "mixolydian",
            Self::Locrian => "locrian",
            Self::MajorPentatonic => "major_pentatonic",
            Self::MinorPentatonic => "minor_pentatonic",
            Self::Blues => "blues",
            Self::MajorBlues => "major_blues",
            Self::Afrobeat => "afrobeat",
            Self::AfroPentatonic => "afro_pentatonic",
            Self::Trap => "trap",
            Self::TrapPentatonic => "trap_pentatonic",
            Self::Arabic => "arabic",
            Self::Japanese => "japanese",
            Self::HungarianMinor => "hungarian_minor",
            Self::Spanish => "spanish",
        }
    }

    pub fn category(&self) -> ScaleCategory {
        match self {
            Self::Major | Self::Minor | Self::HarmonicMinor | Self::MelodicMinor => ScaleCategory::Western,
            Self::Dorian | Self::Phrygian | Self::Lydian | Self::Mixolydian | Self::Locrian => ScaleCategory::Modes,
            Self::MajorPentatonic | Self::MinorPentatonic => ScaleCategory::Pentatonic,
            Self::Blues | Self::MajorBlues => ScaleCategory::Blues,
            Self::Afrobeat | Self::AfroPentatonic => ScaleCategory::Afrobeat,
            Self::Trap | Self::TrapPentatonic => ScaleCategory::Trap,
            Self::Arabic | Self::Japanese | Self::HungarianMinor | Self::Spanish => ScaleCategory::World,
        }
    }

    /// Scales whose third degree is major (used when stacking harmony)
    pub fn has_major_third(&self) -> bool {
        matches!(self, Self::Major | Self::MajorPentatonic | Self::Lydian | Self::Mixolydian)
    }

    /// Whether a root-relative pitch class (0-11) belongs to the scale
    pub fn contains(&self, relative: u8) -> bool {
        self.intervals().contains(&(relative % 12))
    }

    /// Parse a scale name, falling back to minor
    pub fn from_name_or_default(name: &str) -> Self {
        parse_or_fallback(name, Self::Minor)
    }

    pub fn info(&self) -> ScaleInfo {
        ScaleInfo {
            name: self.name(),
            intervals: self.intervals(),
            num_notes: self.intervals().len(),
            category: self.category(),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = HumscribeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| HumscribeError::UnknownScale(s.to_string()))
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only description of a catalog scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleInfo {
    pub name: &'static str,
    pub intervals: &'static [u8],
    pub num_notes: usize,
    pub category: ScaleCategory,
}

/// Scales grouped by display category, in catalog order
pub fn scales_by_category() -> Vec<(ScaleCategory, Vec<ScaleMode>)> {
    ScaleCategory::ALL
        .into_iter()
        .map(|cat| (cat, ScaleMode::ALL.into_iter().filter(|m| m.category() == cat).collect()))
        .collect()
}

// ============================================================================
// Keys
// ============================================================================

/// Parse a root name ("C", "F#", "Bb") to a pitch class 0-11
pub fn parse_root(name: &str) -> Result<u8> {
    let trimmed = name.trim();
    if let Some(idx) = NOTE_NAMES.iter().position(|n| n.eq_ignore_ascii_case(trimmed)) {
        return Ok(idx as u8);
    }
    // Flat spellings map onto the sharp names
    let mut chars = trimmed.chars();
    if let (Some(letter), Some('b'), None) = (chars.next(), chars.next(), chars.next()) {
        let natural = letter.to_ascii_uppercase().to_string();
        if let Some(idx) = NOTE_NAMES.iter().position(|n| *n == natural) {
            return Ok(((idx + 11) % 12) as u8);
        }
    }
    Err(HumscribeError::UnknownRoot(name.to_string()))
}

/// Parse a root name, falling back to C
pub fn parse_root_or_default(name: &str) -> u8 {
    parse_root(name).unwrap_or_else(|e| {
        tracing::warn!("{e}, falling back to C");
        0
    })
}

/// A root pitch class paired with a scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    /// Root pitch class (0 = C ... 11 = B)
    pub root: u8,
    pub scale: ScaleMode,
}

impl Default for Key {
    fn default() -> Self {
        Self { root: 0, scale: ScaleMode::Minor }
    }
}

impl Key {
    pub fn new(root: u8, scale: ScaleMode) -> Self {
        Self { root: root % 12, scale }
    }

    /// Build a key from names, applying the C / minor fallbacks
    pub fn from_names(root: &str, scale: &str) -> Self {
        Self::new(parse_root_or_default(root), ScaleMode::from_name_or_default(scale))
    }

    pub fn root_name(&self) -> &'static str {
        NOTE_NAMES[self.root as usize % 12]
    }

    /// Snap a pitch into this key
    pub fn quantize(&self, pitch: u8) -> u8 {
        quantize_to_scale(pitch, self.root, self.scale)
    }

    /// Quantize an arbitrary (possibly out-of-range) pitch after clamping to 0-127
    pub fn quantize_clamped(&self, pitch: i32) -> u8 {
        self.quantize(pitch.clamp(0, 127) as u8)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root_name(), self.scale)
    }
}

// ============================================================================
// Quantization
// ============================================================================

/// Quantize a note to the nearest scale note
///
/// The distance to each interval is measured within the octave (no
/// wrap-around); ties go to whichever interval comes first in the scale.
/// The octave of the input pitch is kept.
pub fn quantize_to_scale(note: u8, root: u8, mode: ScaleMode) -> u8 {
    let root_in_octave = root % 12;
    let octave = note / 12;
    let relative = (note % 12 + 12 - root_in_octave) % 12;

    let nearest = mode
        .intervals()
        .iter()
        .copied()
        .min_by_key(|&interval| (interval as i16 - relative as i16).abs())
        .unwrap_or(0);

    let quantized = octave as u16 * 12 + ((root_in_octave + nearest) % 12) as u16;
    // The top octave is partial; drop an octave rather than leave the scale
    if quantized > 127 { (quantized - 12) as u8 } else { quantized as u8 }
}

/// Transpose every note, clamping to the MIDI range
pub fn transpose_notes(notes: &[Note], semitones: i32) -> Vec<Note> {
    notes
        .iter()
        .map(|n| n.with_pitch((n.pitch as i32 + semitones).clamp(0, 127) as u8))
        .collect()
}
