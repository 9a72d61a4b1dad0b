//! Melody enhancement transforms
//!
//! Every transform takes the melody by reference and returns a new note
//! list; stochastic ones draw from the caller's generator.

mod afro_vibe;
mod bounce;
mod choir;
mod ornament;
mod smooth;
mod trap_run;

pub use afro_vibe::AfroVibeFx;
pub use bounce::BounceFx;
pub use choir::ChoirFx;
pub use ornament::{add_grace_notes, add_ornamentation, add_trills, Ornament};
pub use smooth::SmoothFx;
pub use trap_run::TrapRunFx;

use std::fmt;
use std::str::FromStr;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{parse_or_fallback, HumscribeError, Result};
use crate::note::Note;
use crate::theory::Key;

/// Intensity used when no enhancement mode is requested
pub const DEFAULT_INTENSITY: f64 = 0.5;

/// Trait for melody transforms
pub trait MelodyFx {
    fn name(&self) -> &'static str;
    fn process(&self, notes: &[Note], intensity: f64, key: Key, rng: &mut Rng) -> Vec<Note>;
}

/// Closed set of enhancement modes; unknown names resolve to `Smooth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhanceMode {
    #[default]
    Smooth,
    Bounce,
    TrapRun,
    AfroVibe,
    Choir,
}

impl EnhanceMode {
    pub const ALL: [Self; 5] = [Self::Smooth, Self::Bounce, Self::TrapRun, Self::AfroVibe, Self::Choir];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Smooth => SmoothFx.name(),
            Self::Bounce => BounceFx.name(),
            Self::TrapRun => TrapRunFx.name(),
            Self::AfroVibe => AfroVibeFx.name(),
            Self::Choir => ChoirFx.name(),
        }
    }

    /// Run the transform; an empty melody stays empty
    pub fn apply(&self, notes: &[Note], intensity: f64, key: Key, rng: &mut Rng) -> Vec<Note> {
        if notes.is_empty() {
            return Vec::new();
        }
        let out = match self {
            Self::Smooth => SmoothFx.process(notes, intensity, key, rng),
            Self::Bounce => BounceFx.process(notes, intensity, key, rng),
            Self::TrapRun => TrapRunFx.process(notes, intensity, key, rng),
            Self::AfroVibe => AfroVibeFx.process(notes, intensity, key, rng),
            Self::Choir => ChoirFx.process(notes, intensity, key, rng),
        };
        tracing::debug!(mode = self.name(), intensity, before = notes.len(), after = out.len(), "enhanced melody");
        out
    }

    pub fn from_name_or_default(name: &str) -> Self {
        parse_or_fallback(name, Self::Smooth)
    }
}

impl FromStr for EnhanceMode {
    type Err = HumscribeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| HumscribeError::UnknownMode(s.to_string()))
    }
}

impl fmt::Display for EnhanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        for mode in EnhanceMode::ALL {
            assert_eq!(mode.name().parse::<EnhanceMode>(), Ok(mode));
        }
        assert_eq!("trap_run".parse::<EnhanceMode>(), Ok(EnhanceMode::TrapRun));
        assert_eq!(EnhanceMode::from_name_or_default("dubstep"), EnhanceMode::Smooth);
    }

    #[test]
    fn test_empty_melody_passthrough() {
        let mut rng = Rng::with_seed(0);
        for mode in EnhanceMode::ALL {
            assert!(mode.apply(&[], 1.0, Key::default(), &mut rng).is_empty());
        }
    }

    #[test]
    fn test_every_mode_keeps_valid_notes() {
        let notes: Vec<Note> = [60, 72, 55, 67, 62, 74]
            .iter()
            .enumerate()
            .map(|(i, &p)| Note::new(p, i as f64 * 0.6, i as f64 * 0.6 + 0.3))
            .collect();
        let mut rng = Rng::with_seed(11);
        for mode in EnhanceMode::ALL {
            for intensity in [0.0, 0.5, 1.0] {
                let out = mode.apply(&notes, intensity, Key::default(), &mut rng);
                assert!(!out.is_empty());
                assert!(out.iter().all(|n| n.end > n.start && n.pitch <= 127), "{mode} @ {intensity}");
            }
        }
    }
}
