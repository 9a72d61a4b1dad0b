//! Summary statistics over a finished melody

use serde::{Deserialize, Serialize};

use crate::note::{total_duration, Note};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MelodyAnalysis {
    pub num_notes: usize,
    /// Seconds until the last note ends
    pub duration: f64,
    /// Semitones between the lowest and highest note
    pub pitch_range: u8,
    /// Mean absolute interval between consecutive notes
    pub avg_interval: f64,
    pub lowest_note: u8,
    pub highest_note: u8,
}

pub fn analyze_melody(notes: &[Note]) -> MelodyAnalysis {
    let (Some(lowest), Some(highest)) = (
        notes.iter().map(|n| n.pitch).min(),
        notes.iter().map(|n| n.pitch).max(),
    ) else {
        return MelodyAnalysis::default();
    };

    let intervals: Vec<f64> = notes
        .windows(2)
        .map(|w| (w[1].pitch as f64 - w[0].pitch as f64).abs())
        .collect();
    let avg_interval = if intervals.is_empty() {
        0.0
    } else {
        intervals.iter().sum::<f64>() / intervals.len() as f64
    };

    MelodyAnalysis {
        num_notes: notes.len(),
        duration: total_duration(notes),
        pitch_range: highest - lowest,
        avg_interval,
        lowest_note: lowest,
        highest_note: highest,
    }
}
