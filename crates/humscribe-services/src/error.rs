//! Error types for rendering and file output

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No notes to render")]
    EmptyMelody,
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("MIDI error: {0}")]
    Midi(String),
    #[error("Invalid pitch frames: {0}")]
    Frames(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
