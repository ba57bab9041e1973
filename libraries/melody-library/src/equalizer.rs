//! Equalizer settings
//!
//! Stores ten per-band gains and the fixed named presets:
//! - Bands: 60Hz to 16kHz, one gain each
//! - Gain range: -10 to +10, clamped on every write
//!
//! Nothing here processes audio; the settings are kept for whichever output
//! stage reads them.

use crate::error::LibraryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of equalizer bands
pub const BAND_COUNT: usize = 10;

/// Band labels, lowest frequency first
pub const BAND_LABELS: [&str; BAND_COUNT] = [
    "60Hz", "170Hz", "310Hz", "600Hz", "1kHz", "3kHz", "6kHz", "12kHz", "14kHz", "16kHz",
];

/// Lowest band gain
pub const MIN_GAIN: i8 = -10;

/// Highest band gain
pub const MAX_GAIN: i8 = 10;

/// Named equalizer preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EqualizerPreset {
    /// Punchy lows and bright highs
    Rock,

    /// Lifted bass and treble, slightly recessed mids
    Pop,

    /// Warm lows with an open top end
    Jazz,

    /// Broad low and high shelf
    Classical,

    /// Deep bass with presence boost
    Electronic,
}

impl EqualizerPreset {
    /// Every preset, in display order
    pub const ALL: [Self; 5] = [
        Self::Rock,
        Self::Pop,
        Self::Jazz,
        Self::Classical,
        Self::Electronic,
    ];

    /// Gain values for this preset
    pub fn gains(self) -> [i8; BAND_COUNT] {
        match self {
            Self::Rock => [5, 4, -1, -2, 1, 3, 4, 3, 2, 1],
            Self::Pop => [2, 3, 2, 0, -1, -1, 0, 2, 3, 3],
            Self::Jazz => [4, 3, 1, 2, -1, -1, 0, 1, 2, 3],
            Self::Classical => [5, 4, 3, 2, -1, -2, -1, 2, 3, 4],
            Self::Electronic => [4, 3, 1, 0, -1, 2, 1, 2, 3, 4],
        }
    }

    /// Get preset name
    pub fn name(self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Pop => "Pop",
            Self::Jazz => "Jazz",
            Self::Classical => "Classical",
            Self::Electronic => "Electronic",
        }
    }
}

impl fmt::Display for EqualizerPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EqualizerPreset {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LibraryError::UnknownPreset(s.to_string()))
    }
}

/// Current equalizer gains, all bands flat by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualizerSettings {
    gains: [i8; BAND_COUNT],
}

impl EqualizerSettings {
    /// Flat settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Gains, lowest band first
    pub fn gains(&self) -> [i8; BAND_COUNT] {
        self.gains
    }

    /// Set one band; false when `band` is out of range
    pub fn set_band(&mut self, band: usize, gain: i8) -> bool {
        let Some(slot) = self.gains.get_mut(band) else {
            return false;
        };

        *slot = clamp_gain(gain);
        true
    }

    /// Replace every band at once
    pub fn set_gains(&mut self, gains: [i8; BAND_COUNT]) {
        self.gains = gains.map(clamp_gain);
    }

    /// Apply a preset wholesale
    pub fn apply_preset(&mut self, preset: EqualizerPreset) {
        self.set_gains(preset.gains());
    }

    /// Zero every band
    pub fn reset(&mut self) {
        self.gains = [0; BAND_COUNT];
    }

    /// Whether every band is zero
    pub fn is_flat(&self) -> bool {
        self.gains.iter().all(|&gain| gain == 0)
    }

    /// Band labels paired with their gains
    pub fn bands(&self) -> impl Iterator<Item = (&'static str, i8)> + '_ {
        BAND_LABELS.iter().copied().zip(self.gains.iter().copied())
    }
}

fn clamp_gain(gain: i8) -> i8 {
    gain.clamp(MIN_GAIN, MAX_GAIN)
}
