//! Grid quantization with groove offsets and humanized timing

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use super::groove::{Groove, QuantizeGrid};
use crate::note::{rebase_to_zero, sort_by_start, Note, MIN_NOTE_SECS};

/// Humanize jitter spans at most this fraction of a grid cell either way
const HUMANIZE_SPREAD: f64 = 0.3;

/// Snaps note timing onto a tempo grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RhythmQuantizer {
    pub grid: QuantizeGrid,
    pub bpm: f64,
    pub groove: Groove,
    /// Random timing spread, 0.0 (strict) to 1.0 (loose)
    pub humanize: f64,
}

impl Default for RhythmQuantizer {
    fn default() -> Self {
        Self {
            grid: QuantizeGrid::Eighth,
            bpm: 120.0,
            groove: Groove::Straight,
            humanize: 0.0,
        }
    }
}

impl RhythmQuantizer {
    pub fn new(grid: QuantizeGrid, bpm: f64) -> Self {
        Self { grid, bpm, ..Default::default() }
    }

    pub fn with_groove(mut self, groove: Groove) -> Self {
        self.groove = groove;
        self
    }

    pub fn with_humanize(mut self, humanize: f64) -> Self {
        self.humanize = humanize.clamp(0.0, 1.0);
        self
    }

    /// Grid cell length in seconds
    pub fn cell_secs(&self) -> f64 {
        self.grid.cell_secs(self.bpm)
    }

    /// Quantize notes, returning them sorted and rebased to start at 0.
    ///
    /// `rng` is only drawn from when humanize is above zero.
    pub fn process(&self, notes: &[Note], rng: &mut Rng) -> Vec<Note> {
        if notes.is_empty() {
            return Vec::new();
        }

        let cell = self.cell_secs();
        let max_jitter = cell * HUMANIZE_SPREAD * self.humanize;

        let mut quantized: Vec<Note> = notes
            .iter()
            .map(|note| {
                let grid_index = (note.start / cell).round() as i64;
                let mut start = grid_index as f64 * cell + self.groove.offset_at(grid_index) * cell;

                if self.humanize > 0.0 {
                    start += (rng.f64() * 2.0 - 1.0) * max_jitter;
                }

                // Length is laid from the unclamped start, so a note pushed
                // before zero loses the part that would sound before it.
                let cells = (note.duration() / cell).round().max(1.0);
                let end = start + cells * cell;
                let start = start.max(0.0);
                let end = end.max(start + MIN_NOTE_SECS);
                Note::new(note.pitch, start, end)
            })
            .collect();

        sort_by_start(&mut quantized);
        rebase_to_zero(&quantized)
    }
}
