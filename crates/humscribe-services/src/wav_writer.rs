//! Mono 16-bit WAV output

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use crate::error::Result;
use crate::publish::publish_atomically;

pub fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode PCM samples as WAV into any seekable writer
pub fn write_wav<W: Write + Seek>(out: W, samples: &[i16], sample_rate: u32) -> Result<()> {
    let mut writer = hound::WavWriter::new(out, wav_spec(sample_rate))?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

pub fn wav_bytes(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav(&mut cursor, samples, sample_rate)?;
    Ok(cursor.into_inner())
}

/// Encode in memory, then publish to `path` atomically
pub fn write_wav_file(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    publish_atomically(path, &wav_bytes(samples, sample_rate)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_samples() {
        let samples = [0i16, 1000, -1000, i16::MAX, i16::MIN];
        let bytes = wav_bytes(&samples, 22_050).unwrap();

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22_050);
        assert_eq!(spec.bits_per_sample, 16);
        let read: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        write_wav_file(&path, &[1, 2, 3], 8_000).unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 3);
    }
}
