//! End-to-end hum-to-melody pipeline
//!
//! Stages run strictly in order over owned note lists:
//! segment, key, scale-quantize, rhythm, enhance, ornament, articulate,
//! extend, analyze.

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_melody, MelodyAnalysis};
use crate::enhance::{add_ornamentation, EnhanceMode, Ornament, DEFAULT_INTENSITY};
use crate::extend::{extend_duration, DEFAULT_MIN_DURATION};
use crate::key_detect::detect_key;
use crate::note::{rebase_to_zero, Note, PitchFrame};
use crate::rhythm::{adjust_note_lengths, detect_tempo, Articulation, Groove, QuantizeGrid, RhythmQuantizer, DEFAULT_LEGATO};
use crate::score::Score;
use crate::segment::{Segmenter, DEFAULT_MIN_NOTE_DURATION};
use crate::theory::{parse_root_or_default, Key, ScaleMode};

// ============================================================================
// Configuration
// ============================================================================

/// Pipeline settings; names are resolved leniently with logged fallbacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub min_note_duration: f64,
    pub root: Option<String>,
    pub scale: Option<String>,
    /// Detect whichever of root/scale is not given
    pub auto_detect_key: bool,
    /// "1/4", "1/8", "1/16" or "1/32"; no rhythm quantization when absent
    pub quantize_grid: Option<String>,
    /// Explicit tempo; estimated from the melody when absent
    pub bpm: Option<f64>,
    pub groove: String,
    pub humanize: f64,
    /// Enhancement mode; smooth at the default intensity when absent
    pub enhancement: Option<String>,
    pub intensity: f64,
    pub ornament: Option<String>,
    pub ornament_density: f64,
    pub articulation: Option<String>,
    pub min_duration: f64,
    /// Seed for every stochastic stage; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_note_duration: DEFAULT_MIN_NOTE_DURATION,
            root: None,
            scale: None,
            auto_detect_key: true,
            quantize_grid: None,
            bpm: None,
            groove: "straight".to_string(),
            humanize: 0.0,
            enhancement: None,
            intensity: 0.7,
            ornament: None,
            ornament_density: 0.5,
            articulation: None,
            min_duration: DEFAULT_MIN_DURATION,
            seed: None,
        }
    }
}

impl PipelineConfig {
    /// Random source for one run
    pub fn rng(&self) -> Rng {
        match self.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        }
    }

    fn resolve_key(&self, raw: &[Note]) -> Key {
        let detected = match (&self.root, &self.scale) {
            (Some(_), Some(_)) => None,
            _ if self.auto_detect_key => Some(detect_key(raw)),
            _ => None,
        };
        let fallback = detected.unwrap_or_default();
        let root = self.root.as_deref().map_or(fallback.root, parse_root_or_default);
        let scale = self.scale.as_deref().map_or(fallback.scale, ScaleMode::from_name_or_default);
        Key::new(root, scale)
    }
}

// ============================================================================
// Output
// ============================================================================

/// A finished melody and what was inferred along the way
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Melody {
    pub notes: Vec<Note>,
    pub key: Key,
    pub bpm: f64,
    /// Notes found by segmentation, before enhancement and extension
    pub original_note_count: usize,
    pub analysis: MelodyAnalysis,
}

impl Melody {
    pub fn score(&self, ticks_per_beat: u16) -> Score {
        Score::from_notes(&self.notes, self.bpm, ticks_per_beat)
    }
}

// ============================================================================
// Run
// ============================================================================

/// Turn a pitch track into a melody.
///
/// Returns `None` when no note survives segmentation.
pub fn run(frames: &[PitchFrame], config: &PipelineConfig, rng: &mut Rng) -> Option<Melody> {
    let raw = Segmenter::new(config.min_note_duration).segment(frames);
    if raw.is_empty() {
        tracing::debug!(frames = frames.len(), "no melody detected");
        return None;
    }

    let key = config.resolve_key(&raw);
    let quantized: Vec<Note> = raw.iter().map(|n| n.with_pitch(key.quantize(n.pitch))).collect();
    let mut notes = rebase_to_zero(&quantized);
    let original_note_count = notes.len();

    let bpm = config.bpm.filter(|b| *b > 0.0).unwrap_or_else(|| detect_tempo(&notes));
    tracing::info!(key = %key, bpm, notes = original_note_count, "segmented melody");

    if let Some(grid) = config.quantize_grid.as_deref() {
        notes = RhythmQuantizer::new(QuantizeGrid::from_name_or_default(grid), bpm)
            .with_groove(Groove::from_name_or_default(&config.groove))
            .with_humanize(config.humanize)
            .process(&notes, rng);
    }

    let (mode, intensity) = match config.enhancement.as_deref() {
        Some(name) => (EnhanceMode::from_name_or_default(name), config.intensity),
        None => (EnhanceMode::Smooth, DEFAULT_INTENSITY),
    };
    notes = mode.apply(&notes, intensity, key, rng);

    if let Some(style) = config.ornament.as_deref() {
        notes = add_ornamentation(&notes, Ornament::from_name_or_default(style), config.ornament_density, key, rng);
    }
    if let Some(style) = config.articulation.as_deref() {
        notes = adjust_note_lengths(&notes, Articulation::from_name_or_default(style), DEFAULT_LEGATO);
    }

    notes = extend_duration(&notes, config.min_duration, rng);
    let analysis = analyze_melody(&notes);
    tracing::debug!(notes = notes.len(), duration = analysis.duration, "melody complete");

    Some(Melody { notes, key, bpm, original_note_count, analysis })
}
