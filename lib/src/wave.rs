// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::time::Duration;

/// The default half-period of the free running square wave, in microseconds.
///
/// Gives a 10µs period, i.e. 100kHz, before delay overheads.
pub const DEFAULT_HALF_PERIOD_US: u32 = 5;

/// Middle C, in Hz.
pub const C4: f64 = 261.6;

/// The default idle gap between tone bursts, in milliseconds.
pub const DEFAULT_GAP_MS: u32 = 20;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Errors returned when waveform parameters are out of range.
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq)]
pub enum ParamError {
    /// The square wave half-period must be non-zero.
    #[error("half-period must be at least 1us")]
    HalfPeriod,

    /// The tone frequency must be positive and no more than 500kHz, and its
    /// half cycle must fit in a u32 count of microseconds.
    #[error("frequency {0}Hz is out of range")]
    Frequency(f64),

    /// The tone duration must be finite and not negative.
    #[error("duration {0}s is out of range")]
    Duration(f64),
}

/// A free running square wave with 50% duty cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SquareWave {
    /// The time spent at each level, in microseconds.
    pub half_period_us: u32,
}

impl SquareWave {
    /// Create a square wave with the given half-period.
    pub fn new(half_period_us: u32) -> Result<Self, ParamError> {
        let sw = SquareWave { half_period_us };
        sw.validate()?;
        Ok(sw)
    }

    /// Check the parameters are in range.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.half_period_us == 0 {
            return Err(ParamError::HalfPeriod);
        }
        Ok(())
    }

    /// The full period of the wave.
    pub fn period(&self) -> Duration {
        Duration::from_micros(2 * u64::from(self.half_period_us))
    }
}

impl Default for SquareWave {
    fn default() -> Self {
        SquareWave {
            half_period_us: DEFAULT_HALF_PERIOD_US,
        }
    }
}

/// A finite burst of square wave at an audio frequency.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tone {
    /// The tone frequency, in Hz.
    pub frequency_hz: f64,

    /// The length of the burst, in seconds.
    pub duration_s: f64,
}

impl Tone {
    /// Create a tone with the given frequency and duration.
    pub fn new(frequency_hz: f64, duration_s: f64) -> Result<Self, ParamError> {
        let tone = Tone {
            frequency_hz,
            duration_s,
        };
        tone.validate()?;
        Ok(tone)
    }

    /// Check the parameters are in range.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(ParamError::Frequency(self.frequency_hz));
        }
        // the half cycle must fit the delay without saturating or truncating to 0
        let half_cycle = MICROS_PER_SECOND / (2.0 * self.frequency_hz);
        if half_cycle < 1.0 || half_cycle > f64::from(u32::MAX) {
            return Err(ParamError::Frequency(self.frequency_hz));
        }
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(ParamError::Duration(self.duration_s));
        }
        Ok(())
    }

    /// The time spent at each level, truncated to whole microseconds.
    pub fn half_cycle_us(&self) -> u32 {
        (MICROS_PER_SECOND / (2.0 * self.frequency_hz)) as u32
    }

    /// The number of full cycles in the burst.
    ///
    /// Computed as frequency × duration, truncated.
    pub fn cycles(&self) -> u64 {
        (self.frequency_hz * self.duration_s) as u64
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone {
            frequency_hz: C4,
            duration_s: 1.0,
        }
    }
}

/// A tone repeated indefinitely with an idle gap between bursts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToneLoop {
    /// The repeated burst.
    pub tone: Tone,

    /// The idle time after each burst, in milliseconds.
    pub gap_ms: u32,
}

impl ToneLoop {
    /// Create a loop of the given tone separated by `gap_ms`.
    pub fn new(tone: Tone, gap_ms: u32) -> Self {
        ToneLoop { tone, gap_ms }
    }
}

impl Default for ToneLoop {
    fn default() -> Self {
        ToneLoop {
            tone: Tone::default(),
            gap_ms: DEFAULT_GAP_MS,
        }
    }
}
