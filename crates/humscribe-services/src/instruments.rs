//! Additive instrument catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::envelope::Adsr;
use crate::error::RenderError;

/// Harmonic recipe and amplitude shaping for one instrument
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstrumentProfile {
    /// (frequency multiplier, relative amplitude) per partial
    pub harmonics: &'static [(f64, f64)],
    pub envelope: Adsr,
    /// Below 1.0 the whole tone is softened
    pub brightness: f64,
}

const PIANO: InstrumentProfile = InstrumentProfile {
    harmonics: &[(1.0, 1.0), (2.0, 0.4), (3.0, 0.2), (4.0, 0.15), (5.0, 0.1)],
    envelope: Adsr::new(0.01, 0.05, 0.7, 0.15),
    brightness: 1.2,
};

const GUITAR: InstrumentProfile = InstrumentProfile {
    harmonics: &[(1.0, 1.0), (2.0, 0.6), (3.0, 0.4), (4.0, 0.25), (5.0, 0.15), (6.0, 0.1)],
    envelope: Adsr::new(0.005, 0.1, 0.6, 0.2),
    brightness: 1.5,
};

const STRINGS: InstrumentProfile = InstrumentProfile {
    harmonics: &[(1.0, 1.0), (2.0, 0.5), (3.0, 0.35), (4.0, 0.25), (5.0, 0.2), (6.0, 0.15)],
    envelope: Adsr::new(0.15, 0.1, 0.85, 0.3),
    brightness: 0.9,
};

// Inharmonic partials
const BELLS: InstrumentProfile = InstrumentProfile {
    harmonics: &[(1.0, 1.0), (2.7, 0.7), (4.1, 0.5), (5.8, 0.3), (7.2, 0.2)],
    envelope: Adsr::new(0.001, 0.3, 0.3, 0.8),
    brightness: 2.0,
};

const SYNTH: InstrumentProfile = InstrumentProfile {
    harmonics: &[(1.0, 1.0), (2.0, 0.8), (3.0, 0.6), (4.0, 0.4), (5.0, 0.2)],
    envelope: Adsr::new(0.02, 0.05, 0.8, 0.1),
    brightness: 1.8,
};

const PADS: InstrumentProfile = InstrumentProfile {
    harmonics: &[(1.0, 1.0), (2.0, 0.7), (3.0, 0.5), (4.0, 0.4), (5.0, 0.3), (6.0, 0.2)],
    envelope: Adsr::new(0.3, 0.2, 0.9, 0.5),
    brightness: 0.7,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    #[default]
    Piano,
    Guitar,
    Strings,
    Bells,
    Synth,
    Pads,
}

impl Instrument {
    pub const ALL: [Self; 6] = [Self::Piano, Self::Guitar, Self::Strings, Self::Bells, Self::Synth, Self::Pads];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Piano => "piano",
            Self::Guitar => "guitar",
            Self::Strings => "strings",
            Self::Bells => "bells",
            Self::Synth => "synth",
            Self::Pads => "pads",
        }
    }

    pub fn profile(&self) -> &'static InstrumentProfile {
        match self {
            Self::Piano => &PIANO,
            Self::Guitar => &GUITAR,
            Self::Strings => &STRINGS,
            Self::Bells => &BELLS,
            Self::Synth => &SYNTH,
            Self::Pads => &PADS,
        }
    }

    /// Parse an instrument name, falling back to piano
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|e| {
            tracing::warn!("{e}, falling back to piano");
            Self::Piano
        })
    }
}

impl FromStr for Instrument {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|i| i.name() == lower)
            .ok_or_else(|| RenderError::UnknownInstrument(s.to_string()))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
