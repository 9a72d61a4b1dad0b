//! Tick-based note event stream

use serde::{Deserialize, Serialize};

use crate::note::{sort_by_start, Note, MIN_NOTE_SECS};

pub const DEFAULT_TICKS_PER_BEAT: u16 = 480;
pub const NOTE_VELOCITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEventKind {
    NoteOn { pitch: u8, velocity: u8 },
    NoteOff { pitch: u8 },
}

/// One event, timed relative to the previous event in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub delta_ticks: u32,
    pub kind: ScoreEventKind,
}

/// A single-track score at a fixed tempo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub ticks_per_beat: u16,
    pub bpm: f64,
    pub events: Vec<ScoreEvent>,
}

impl Score {
    /// Lay notes out as note-on/note-off pairs.
    ///
    /// Each note-on waits for the previous note-off, so overlapping input
    /// notes are played back to back and the stream never runs backwards.
    pub fn from_notes(notes: &[Note], bpm: f64, ticks_per_beat: u16) -> Self {
        // SMF division is a non-zero 15-bit value
        let ticks_per_beat = ticks_per_beat.clamp(1, 0x7FFF);
        let mut sorted = notes.to_vec();
        sort_by_start(&mut sorted);

        let ticks_per_second = ticks_per_beat as f64 / (60.0 / bpm);
        let to_ticks = |secs: f64| (secs * ticks_per_second).round().max(0.0) as u64;

        let mut events = Vec::with_capacity(sorted.len() * 2);
        let mut cursor: u64 = 0;
        for note in &sorted {
            let start_tick = to_ticks(note.start);
            let end_tick = to_ticks(note.start + note.duration().max(MIN_NOTE_SECS));
            let dur_ticks = end_tick.saturating_sub(start_tick).max(1);
            let delta = start_tick.saturating_sub(cursor);

            events.push(ScoreEvent {
                delta_ticks: clamp_u32(delta),
                kind: ScoreEventKind::NoteOn { pitch: note.pitch, velocity: NOTE_VELOCITY },
            });
            events.push(ScoreEvent {
                delta_ticks: clamp_u32(dur_ticks),
                kind: ScoreEventKind::NoteOff { pitch: note.pitch },
            });
            cursor += delta + dur_ticks;
        }

        tracing::debug!(notes = sorted.len(), ticks = cursor, bpm, "built score");
        Self { ticks_per_beat, bpm, events }
    }

    /// Tempo meta value in microseconds per quarter note
    pub fn micros_per_beat(&self) -> u32 {
        if self.bpm <= 0.0 {
            return 500_000;
        }
        (60_000_000.0 / self.bpm).round() as u32
    }

    /// Absolute tick of every event, in stream order
    pub fn absolute_ticks(&self) -> Vec<u64> {
        self.events
            .iter()
            .scan(0u64, |tick, e| {
                *tick += e.delta_ticks as u64;
                Some(*tick)
            })
            .collect()
    }

    pub fn total_ticks(&self) -> u64 {
        self.absolute_ticks().last().copied().unwrap_or(0)
    }
}

fn clamp_u32(ticks: u64) -> u32 {
    ticks.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_notes() {
        let notes = vec![Note::new(60, 0.0, 0.5), Note::new(64, 0.5, 1.0), Note::new(67, 1.5, 2.0)];
        let score = Score::from_notes(&notes, 120.0, 480);
        // 120 bpm at 480 tpb: 960 ticks per second
        let deltas: Vec<u32> = score.events.iter().map(|e| e.delta_ticks).collect();
        assert_eq!(deltas, vec![0, 480, 0, 480, 480, 480]);
        assert_eq!(
            score.events[0].kind,
            ScoreEventKind::NoteOn { pitch: 60, velocity: NOTE_VELOCITY }
        );
        assert_eq!(score.events[5].kind, ScoreEventKind::NoteOff { pitch: 67 });
        assert_eq!(score.micros_per_beat(), 500_000);
    }

    #[test]
    fn test_overlapping_notes_stay_monotonic() {
        let notes = vec![
            Note::new(60, 0.0, 1.0),
            Note::new(64, 0.02, 0.8),
            Note::new(67, 0.05, 0.9),
            Note::new(72, 0.5, 1.5),
        ];
        let score = Score::from_notes(&notes, 100.0, 480);
        let ticks = score.absolute_ticks();
        assert_eq!(ticks.len(), 8);
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
        // Every note-on is followed by its own note-off
        for pair in score.events.chunks(2) {
            match (pair[0].kind, pair[1].kind) {
                (ScoreEventKind::NoteOn { pitch: a, .. }, ScoreEventKind::NoteOff { pitch: b }) => assert_eq!(a, b),
                other => panic!("unexpected pair {other:?}"),
            }
        }
    }

    #[test]
    fn test_minimum_length() {
        let notes = vec![Note::new(60, 0.0, 0.001)];
        let score = Score::from_notes(&notes, 120.0, 480);
        // Held for at least 50 ms = 48 ticks
        assert_eq!(score.events[1].delta_ticks, 48);
    }

    #[test]
    fn test_unsorted_input() {
        let notes = vec![Note::new(67, 1.0, 1.5), Note::new(60, 0.0, 0.5)];
        let score = Score::from_notes(&notes, 120.0, 480);
        assert_eq!(
            score.events[0].kind,
            ScoreEventKind::NoteOn { pitch: 60, velocity: NOTE_VELOCITY }
        );
        assert_eq!(score.total_ticks(), 1440);
    }

    #[test]
    fn test_zero_division_clamped() {
        let notes = vec![Note::new(60, 0.0, 1.0)];
        let score = Score::from_notes(&notes, 60.0, 0);
        assert_eq!(score.ticks_per_beat, 1);
        assert_eq!(score.events[1].delta_ticks, 1);
    }

    #[test]
    fn test_empty() {
        let score = Score::from_notes(&[], 120.0, 480);
        assert!(score.events.is_empty());
        assert_eq!(score.total_ticks(), 0);
    }
}
