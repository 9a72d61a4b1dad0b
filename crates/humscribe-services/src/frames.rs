//! Pitch-frame input

use std::io::Read;
use std::path::Path;

use humscribe_core::PitchFrame;

use crate::error::Result;

/// Parse a JSON array of `{"time": .., "frequency": ..}` frames.
///
/// A null or missing frequency is an unvoiced frame.
pub fn load_frames<R: Read>(reader: R) -> Result<Vec<PitchFrame>> {
    let frames: Vec<PitchFrame> = serde_json::from_reader(reader)?;
    tracing::debug!(frames = frames.len(), "loaded pitch frames");
    Ok(frames)
}

pub fn load_frames_file(path: &Path) -> Result<Vec<PitchFrame>> {
    let file = std::fs::File::open(path)?;
    load_frames(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn test_voiced_and_silent() {
        let json = r#"[
            {"time": 0.0, "frequency": 261.63},
            {"time": 0.01, "frequency": null},
            {"time": 0.02}
        ]"#;
        let frames = load_frames(json.as_bytes()).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].midi_pitch(), Some(60));
        assert_eq!(frames[1].midi_pitch(), None);
        assert_eq!(frames[2].midi_pitch(), None);
    }

    #[test]
    fn test_malformed() {
        let err = load_frames("{\"time\": 1}".as_bytes()).unwrap_err();
        assert!(matches!(err, RenderError::Frames(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_frames_file(Path::new("/nonexistent/humscribe/frames.json")).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
