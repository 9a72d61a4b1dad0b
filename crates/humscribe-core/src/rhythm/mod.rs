//! Rhythm processing: grid quantization, grooves, tempo, and feel

mod feel;
mod groove;
mod quantize;
mod tempo;

pub use feel::{add_triplet_feel, adjust_note_lengths, apply_groove_template, Articulation, DEFAULT_LEGATO};
pub use groove::{Groove, QuantizeGrid, GROOVE_STEPS};
pub use quantize::RhythmQuantizer;
pub use tempo::{detect_tempo, DEFAULT_BPM};
