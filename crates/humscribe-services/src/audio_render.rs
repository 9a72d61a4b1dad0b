//! Melody to PCM rendering

use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use humscribe_core::{midi_to_hz, total_duration, Note, DEFAULT_TICKS_PER_BEAT};

use crate::error::{RenderError, Result};
use crate::instruments::Instrument;
use crate::synth::additive_tone;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Silence appended after the last note, in seconds
const TAIL_SECS: f64 = 0.5;
/// Per-note mix gain, leaving headroom for overlapping notes
const MIX_GAIN: f64 = 0.5;
/// Output peak as a fraction of full scale
const PEAK_LEVEL: f64 = 0.85;

/// Output settings shared by the audio and MIDI renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub instrument: String,
    pub sample_rate: u32,
    pub ticks_per_beat: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            instrument: Instrument::Piano.name().to_string(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            ticks_per_beat: DEFAULT_TICKS_PER_BEAT,
        }
    }
}

/// Additive-synthesis renderer for one instrument
#[derive(Debug, Clone, Copy)]
pub struct AudioRenderer {
    pub instrument: Instrument,
    pub sample_rate: u32,
}

impl Default for AudioRenderer {
    fn default() -> Self {
        Self { instrument: Instrument::Piano, sample_rate: DEFAULT_SAMPLE_RATE }
    }
}

impl AudioRenderer {
    pub fn new(instrument: Instrument, sample_rate: u32) -> Self {
        Self { instrument, sample_rate }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(Instrument::from_name_or_default(&config.instrument), config.sample_rate.max(1))
    }

    /// Mix every note into a normalized float buffer peaking at 0.85
    pub fn render_float(&self, notes: &[Note], rng: &mut Rng) -> Result<Vec<f64>> {
        if notes.is_empty() {
            return Err(RenderError::EmptyMelody);
        }

        let sr = self.sample_rate as f64;
        let total = (sr * (total_duration(notes) + TAIL_SECS)).ceil() as usize;
        let mut buffer = vec![0.0; total];
        let profile = self.instrument.profile();

        for note in notes {
            let start = (sr * note.start.max(0.0)) as usize;
            let end = ((sr * note.end) as usize).max(start + 1);
            let end = end.min(total);
            if start >= end {
                continue;
            }
            let tone = additive_tone(midi_to_hz(note.pitch), end - start, self.sample_rate, profile, rng);
            for (out, s) in buffer[start..end].iter_mut().zip(tone) {
                *out += s * MIX_GAIN;
            }
        }

        let peak = buffer.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        if peak > 0.0 {
            let gain = PEAK_LEVEL / peak;
            buffer.iter_mut().for_each(|s| *s *= gain);
        }

        debug!(
            instrument = self.instrument.name(),
            notes = notes.len(),
            samples = buffer.len(),
            "rendered audio"
        );
        Ok(buffer)
    }

    /// Render to mono 16-bit PCM
    pub fn render(&self, notes: &[Note], rng: &mut Rng) -> Result<Vec<i16>> {
        let buffer = self.render_float(notes, rng)?;
        Ok(buffer.iter().map(|s| (s * i16::MAX as f64) as i16).collect())
    }
}
