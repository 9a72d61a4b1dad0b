//! Standard MIDI File output (format 0)

use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

use humscribe_core::{Score, ScoreEventKind};

use crate::error::{RenderError, Result};
use crate::publish::publish_atomically;

const CHANNEL: u8 = 0;

/// Build a single-track SMF: tempo meta, note events, end of track
pub fn score_to_smf(score: &Score) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(score.ticks_per_beat.clamp(1, 0x7FFF))),
    ));

    let mut track = Vec::with_capacity(score.events.len() + 2);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(score.micros_per_beat().min(0xFF_FFFF)))),
    });

    for event in &score.events {
        let message = match event.kind {
            ScoreEventKind::NoteOn { pitch, velocity } => MidiMessage::NoteOn {
                key: u7::new(pitch.min(127)),
                vel: u7::new(velocity.min(127)),
            },
            ScoreEventKind::NoteOff { pitch } => MidiMessage::NoteOff {
                key: u7::new(pitch.min(127)),
                vel: u7::new(0),
            },
        };
        track.push(TrackEvent {
            delta: u28::new(event.delta_ticks.min(0x0FFF_FFFF)),
            kind: TrackEventKind::Midi { channel: u4::new(CHANNEL), message },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);
    smf
}

pub fn midi_bytes(score: &Score) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    score_to_smf(score)
        .write(&mut buf)
        .map_err(|e| RenderError::Midi(e.to_string()))?;
    Ok(buf)
}

/// Serialize and publish to `path` atomically
pub fn write_midi_file(path: &Path, score: &Score) -> Result<()> {
    publish_atomically(path, &midi_bytes(score)?)
}
