//! Note segmentation from a frame-wise pitch estimate

use serde::{Deserialize, Serialize};

use crate::note::{rebase_to_zero, Note, PitchFrame};

/// Default shortest note kept after segmentation (80 ms)
pub const DEFAULT_MIN_NOTE_DURATION: f64 = 0.08;

/// Splits a pitch track into discrete notes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Segmenter {
    /// Notes shorter than this (seconds) are discarded
    pub min_note_duration: f64,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self { min_note_duration: DEFAULT_MIN_NOTE_DURATION }
    }
}

/// Note being accumulated while walking the frames
struct OpenNote {
    pitch: u8,
    start: f64,
    end: f64,
}

impl OpenNote {
    fn close(self, end: f64) -> Note {
        Note::new(self.pitch, self.start, end)
    }
}

impl Segmenter {
    pub fn new(min_note_duration: f64) -> Self {
        Self { min_note_duration }
    }

    /// Segment frames into notes rebased so the first note starts at 0.
    ///
    /// An unvoiced input yields an empty list ("no melody detected").
    pub fn segment(&self, frames: &[PitchFrame]) -> Vec<Note> {
        let mut closed = Vec::new();
        let mut open: Option<OpenNote> = None;

        for frame in frames {
            let t = frame.time;
            match (frame.midi_pitch(), open.take()) {
                (None, Some(current)) => closed.push(current.close(t)),
                (None, None) => {}
                (Some(pitch), Some(mut current)) if current.pitch == pitch => {
                    current.end = t;
                    open = Some(current);
                }
                (Some(pitch), current) => {
                    if let Some(current) = current {
                        closed.push(current.close(t));
                    }
                    open = Some(OpenNote { pitch, start: t, end: t });
                }
            }
        }

        if let Some(current) = open {
            let last_time = frames.last().map_or(current.end, |f| f.time);
            closed.push(current.close(last_time));
        }

        let kept: Vec<Note> = closed
            .into_iter()
            .filter(|n| n.duration() > 0.0 && n.duration() >= self.min_note_duration)
            .collect();

        tracing::debug!(frames = frames.len(), notes = kept.len(), "segmented pitch track");
        rebase_to_zero(&kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOP: f64 = 512.0 / 22050.0;

    fn frames_for(pitches: &[Option<f64>]) -> Vec<PitchFrame> {
        pitches
            .iter()
            .enumerate()
            .map(|(i, f)| PitchFrame { time: i as f64 * HOP, frequency: *f })
            .collect()
    }

    #[test]
    fn test_silence_yields_no_notes() {
        let frames = frames_for(&[None; 50]);
        assert!(Segmenter::default().segment(&frames).is_empty());
        assert!(Segmenter::default().segment(&[]).is_empty());
    }

    #[test]
    fn test_two_notes_rebased() {
        // 10 frames of silence, 10 of A4, 10 of C5, then silence
        let mut pitches = vec![None; 10];
        pitches.extend(vec![Some(440.0); 10]);
        pitches.extend(vec![Some(523.25); 10]);
        pitches.extend(vec![None; 5]);
        let notes = Segmenter::default().segment(&frames_for(&pitches));

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].pitch, 69);
        assert_eq!(notes[1].pitch, 72);
        assert_eq!(notes[0].start, 0.0);
        // A4 closes when C5 begins
        assert!((notes[0].end - 10.0 * HOP).abs() < 1e-9);
        assert!((notes[1].start - 10.0 * HOP).abs() < 1e-9);
        assert!((notes[1].end - 20.0 * HOP).abs() < 1e-9);
    }

    #[test]
    fn test_short_blips_filtered() {
        // A 2-frame blip (~46 ms) between two long notes is dropped
        let mut pitches = vec![Some(440.0); 10];
        pitches.extend(vec![Some(600.0); 2]);
        pitches.extend(vec![Some(440.0); 10]);
        let notes = Segmenter::default().segment(&frames_for(&pitches));
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.pitch == 69));
    }

    #[test]
    fn test_trailing_note_closed_at_last_frame() {
        let notes = Segmenter::default().segment(&frames_for(&[Some(440.0); 20]));
        assert_eq!(notes.len(), 1);
        assert!((notes[0].end - 19.0 * HOP).abs() < 1e-9);
    }

    #[test]
    fn test_min_duration_threshold() {
        let frames = frames_for(&[Some(440.0); 20]);
        assert!(Segmenter::new(1.0).segment(&frames).is_empty());
    }
}
