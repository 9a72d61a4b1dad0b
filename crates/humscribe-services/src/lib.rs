//! humscribe-services: synthesis, rendering and file I/O

pub mod audio_render;
mod envelope;
mod error;
pub mod frames;
pub mod instruments;
pub mod midi_file;
mod publish;
pub mod synth;
pub mod wav_writer;

pub use audio_render::{AudioRenderer, RenderConfig, DEFAULT_SAMPLE_RATE};
pub use envelope::Adsr;
pub use error::{RenderError, Result};
pub use frames::{load_frames, load_frames_file};
pub use instruments::{Instrument, InstrumentProfile};
pub use midi_file::{midi_bytes, score_to_smf, write_midi_file};
pub use publish::publish_atomically;
pub use wav_writer::{wav_bytes, write_wav, write_wav_file};
