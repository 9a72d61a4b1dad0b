//! Quantize grids and groove templates

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{parse_or_fallback, HumscribeError, Result};

/// Number of steps in every groove pattern
pub const GROOVE_STEPS: usize = 8;

/// Rhythmic grid resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantizeGrid {
    Quarter,
    #[default]
    Eighth,
    Sixteenth,
    ThirtySecond,
}

impl QuantizeGrid {
    pub const ALL: [Self; 4] = [Self::Quarter, Self::Eighth, Self::Sixteenth, Self::ThirtySecond];

    /// Grid cell as a fraction of one beat
    pub fn beat_fraction(&self) -> f64 {
        match self {
            Self::Quarter => 1.0,
            Self::Eighth => 0.5,
            Self::Sixteenth => 0.25,
            Self::ThirtySecond => 0.125,
        }
    }

    /// Grid cell length in seconds at `bpm`
    pub fn cell_secs(&self, bpm: f64) -> f64 {
        60.0 / bpm * self.beat_fraction()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Quarter => "1/4",
            Self::Eighth => "1/8",
            Self::Sixteenth => "1/16",
            Self::ThirtySecond => "1/32",
        }
    }

    /// Parse a grid name, falling back to eighth notes
    pub fn from_name_or_default(name: &str) -> Self {
        parse_or_fallback(name, Self::Eighth)
    }
}

impl FromStr for QuantizeGrid {
    type Err = HumscribeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1/4" | "quarter" => Ok(Self::Quarter),
            "1/8" | "eighth" => Ok(Self::Eighth),
            "1/16" | "sixteenth" => Ok(Self::Sixteenth),
            "1/32" | "thirty_second" | "thirtysecond" => Ok(Self::ThirtySecond),
            _ => Err(HumscribeError::UnknownGrid(s.to_string())),
        }
    }
}

impl fmt::Display for QuantizeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named rhythmic feel: a cyclic table of per-step grid offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Groove {
    #[default]
    Straight,
    Swing,
    Afrobeat,
    Trap,
    Shuffle,
    Drunk,
}

impl Groove {
    pub const ALL: [Self; 6] = [Self::Straight, Self::Swing, Self::Afrobeat, Self::Trap, Self::Shuffle, Self::Drunk];

    /// Offsets as fractions of a grid cell, indexed by grid step mod 8
    pub fn pattern(&self) -> &'static [f64; GROOVE_STEPS] {
        match self {
            Self::Straight => &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            // Every other step delayed
            Self::Swing => &[0.0, 0.15, 0.0, 0.15, 0.0, 0.15, 0.0, 0.15],
            // Pushes on the off-beats
            Self::Afrobeat => &[0.0, 0.05, 0.1, 0.0, 0.08, 0.0, 0.12, 0.05],
            Self::Trap => &[0.0, 0.0, 0.2, 0.0, 0.1, 0.0, 0.15, 0.0],
            // Strong triplet swing
            Self::Shuffle => &[0.0, 0.25, 0.0, 0.25, 0.0, 0.25, 0.0, 0.25],
            Self::Drunk => &[0.02, -0.03, 0.04, -0.02, 0.03, -0.04, 0.01, -0.01],
        }
    }

    /// Offset for an absolute grid index (negative indices wrap)
    pub fn offset_at(&self, grid_index: i64) -> f64 {
        self.pattern()[grid_index.rem_euclid(GROOVE_STEPS as i64) as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Swing => "swing",
            Self::Afrobeat => "afrobeat",
            Self::Trap => "trap",
            Self::Shuffle => "shuffle",
            Self::Drunk => "drunk",
        }
    }

    /// Parse a groove name, falling back to straight
    pub fn from_name_or_default(name: &str) -> Self {
        parse_or_fallback(name, Self::Straight)
    }
}

impl FromStr for Groove {
    type Err = HumscribeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name() == wanted)
            .ok_or_else(|| HumscribeError::UnknownGroove(s.to_string()))
    }
}

impl fmt::Display for Groove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cells() {
        assert_eq!(QuantizeGrid::Eighth.cell_secs(120.0), 0.25);
        assert_eq!(QuantizeGrid::Quarter.cell_secs(60.0), 1.0);
        assert_eq!("1/16".parse::<QuantizeGrid>(), Ok(QuantizeGrid::Sixteenth));
        assert_eq!(QuantizeGrid::from_name_or_default("1/3"), QuantizeGrid::Eighth);
    }

    #[test]
    fn test_groove_lookup() {
        assert_eq!("Swing".parse::<Groove>(), Ok(Groove::Swing));
        assert_eq!(Groove::from_name_or_default("polka"), Groove::Straight);
        assert_eq!(Groove::Swing.offset_at(9), 0.15);
        assert_eq!(Groove::Swing.offset_at(-1), 0.15);
        assert!(Groove::Straight.pattern().iter().all(|&o| o == 0.0));
    }
}
