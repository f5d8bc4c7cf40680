// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for generating square waves and tones on a single GPIO line.
//!
//! The [`Generator`] drives any [`embedded_hal::digital::OutputPin`] with
//! timing from any [`embedded_hal::delay::DelayNs`].
//! [`OutputLine`] provides the pin for Linux platforms supporting the GPIO
//! character device, and [`ThreadDelay`] provides the timing.
//!
//! Generating a 100kHz square wave on line 17 of gpiochip0:
//!
//! ```no_run
//! # fn example() -> anyhow::Result<()> {
//! use gpiocdev_squarewave::{CancelToken, Generator, OutputLine, SquareWave, ThreadDelay};
//!
//! let line = OutputLine::new("/dev/gpiochip0", 17)?;
//! let mut generator = Generator::new(line, ThreadDelay::new());
//! generator.configure()?;
//!
//! // only returns if the token is cancelled elsewhere
//! generator.run_square_wave(&SquareWave::default(), &CancelToken::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! A tone is a finite burst of square wave:
//!
//! ```no_run
//! # fn example() -> anyhow::Result<()> {
//! use gpiocdev_squarewave::{CancelToken, Generator, OutputLine, ThreadDelay, Tone};
//!
//! let line = OutputLine::new("/dev/gpiochip0", 17)?;
//! let mut generator = Generator::new(line, ThreadDelay::new());
//! let stats = generator.run_tone(&Tone::new(440.0, 0.5)?, &CancelToken::new())?;
//! assert_eq!(stats.cycles, 220);
//! # Ok(())
//! # }
//! ```

mod cancel;
pub use cancel::CancelToken;

/// Best-effort blocking delays.
pub mod delay;
pub use delay::ThreadDelay;

/// Waveform generation over an output pin.
pub mod generator;
pub use generator::{Generator, Stats};

/// Output pins backed by the GPIO character device.
pub mod pin;
pub use pin::{ConfigureOutput, LineOptions, OutputLine};

/// Waveform parameters.
pub mod wave;
pub use wave::{SquareWave, Tone, ToneLoop};

/// Errors returned by [`OutputLine`].
#[derive(Clone, Debug, thiserror::Error, Eq, PartialEq)]
pub enum Error {
    /// Requests must contain exactly one line.
    #[error("Request must contain exactly one line")]
    MultipleLinesRequested,

    /// Cannot find named line.
    #[error("Cannot find a line named '{0}'")]
    UnfoundLine(String),

    /// An error returned from an underlying gpiocdev call.
    #[error("gpiocdev returned: {0}")]
    Cdev(#[source] gpiocdev::Error),
}

impl From<gpiocdev::Error> for Error {
    fn from(err: gpiocdev::Error) -> Self {
        Self::Cdev(err)
    }
}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
