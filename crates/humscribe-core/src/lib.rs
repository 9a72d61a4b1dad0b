//! humscribe-core: turning a hummed pitch track into a melody

pub mod analysis;
pub mod enhance;
mod error;
pub mod extend;
pub mod key_detect;
mod note;
pub mod pipeline;
pub mod rhythm;
pub mod score;
pub mod segment;
pub mod theory;

pub use analysis::{analyze_melody, MelodyAnalysis};
pub use enhance::{EnhanceMode, MelodyFx, Ornament};
pub use error::{HumscribeError, Result};
pub use extend::extend_duration;
pub use key_detect::detect_key;
pub use note::{hz_to_midi, midi_to_hz, rebase_to_zero, sort_by_start, total_duration, Note, PitchFrame, MIN_NOTE_SECS};
pub use pipeline::{Melody, PipelineConfig};
pub use rhythm::{detect_tempo, Articulation, Groove, QuantizeGrid, RhythmQuantizer};
pub use score::{Score, ScoreEvent, ScoreEventKind, DEFAULT_TICKS_PER_BEAT};
pub use segment::Segmenter;
pub use theory::{quantize_to_scale, scales_by_category, transpose_notes, Key, ScaleCategory, ScaleInfo, ScaleMode, NOTE_NAMES};
