//! Note and pitch-frame representations

use serde::{Deserialize, Serialize};

/// Shortest note any transform is allowed to emit, in seconds
pub const MIN_NOTE_SECS: f64 = 0.05;

/// A single melody note in wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI note number (0-127, 60 = middle C)
    #[serde(alias = "midi")]
    pub pitch: u8,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (always > start)
    pub end: f64,
}

impl Note {
    pub fn new(pitch: u8, start: f64, end: f64) -> Self {
        Self { pitch, start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Same note moved in time by `offset` seconds
    pub fn shifted(&self, offset: f64) -> Self {
        Self { start: self.start + offset, end: self.end + offset, ..*self }
    }

    pub fn with_pitch(&self, pitch: u8) -> Self {
        Self { pitch, ..*self }
    }
}

/// One frame of the external fundamental-frequency estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchFrame {
    /// Frame time in seconds
    pub time: f64,
    /// Estimated frequency in Hz, `None` when the frame is unvoiced
    pub frequency: Option<f64>,
}

impl PitchFrame {
    pub fn voiced(time: f64, frequency: f64) -> Self {
        Self { time, frequency: Some(frequency) }
    }

    pub fn silent(time: f64) -> Self {
        Self { time, frequency: None }
    }

    /// Nearest MIDI pitch for this frame, `None` for silence.
    ///
    /// NaN and non-positive frequencies count as silence.
    pub fn midi_pitch(&self) -> Option<u8> {
        let freq = self.frequency.filter(|f| f.is_finite() && *f > 0.0)?;
        Some(hz_to_midi(freq).round().clamp(0.0, 127.0) as u8)
    }
}

/// Fractional MIDI note number for a frequency
pub fn hz_to_midi(freq: f64) -> f64 {
    69.0 + 12.0 * (freq / 440.0).log2()
}

/// Frequency in Hz of a MIDI note number
pub fn midi_to_hz(pitch: u8) -> f64 {
    440.0 * 2.0_f64.powf((pitch as f64 - 69.0) / 12.0)
}

/// End time of the last sounding note (0.0 for an empty melody)
pub fn total_duration(notes: &[Note]) -> f64 {
    notes.iter().map(|n| n.end).fold(0.0, f64::max)
}

/// Stable sort by start time
pub fn sort_by_start(notes: &mut [Note]) {
    notes.sort_by(|a, b| a.start.total_cmp(&b.start));
}

/// Shift every note so the earliest start lands on 0.0
pub fn rebase_to_zero(notes: &[Note]) -> Vec<Note> {
    let Some(first) = notes.iter().map(|n| n.start).reduce(f64::min) else {
        return Vec::new();
    };
    notes.iter().map(|n| n.shifted(-first)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_pitch() {
        assert_eq!(PitchFrame::voiced(0.0, 440.0).midi_pitch(), Some(69));
        assert_eq!(PitchFrame::voiced(0.0, 261.63).midi_pitch(), Some(60));
        // 450 Hz is ~69.4 -> rounds to A4
        assert_eq!(PitchFrame::voiced(0.0, 450.0).midi_pitch(), Some(69));
        assert_eq!(PitchFrame::silent(0.0).midi_pitch(), None);
        assert_eq!(PitchFrame::voiced(0.0, f64::NAN).midi_pitch(), None);
        assert_eq!(PitchFrame::voiced(0.0, 0.0).midi_pitch(), None);
    }

    #[test]
    fn test_midi_to_hz() {
        assert!((midi_to_hz(69) - 440.0).abs() < 1e-9);
        assert!((midi_to_hz(81) - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_rebase_and_duration() {
        let notes = vec![Note::new(60, 1.5, 2.0), Note::new(62, 1.0, 1.25)];
        let rebased = rebase_to_zero(&notes);
        assert_eq!(rebased[0].start, 0.5);
        assert_eq!(rebased[1].start, 0.0);
        assert_eq!(total_duration(&rebased), 1.0);
        assert!(rebase_to_zero(&[]).is_empty());
        assert_eq!(total_duration(&[]), 0.0);
    }

    #[test]
    fn test_note_accepts_midi_alias() {
        let note: Note = serde_json::from_str(r#"{"midi": 64, "start": 0.0, "end": 0.5}"#).unwrap();
        assert_eq!(note.pitch, 64);
    }
}
