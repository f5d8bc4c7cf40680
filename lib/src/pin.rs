// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Error;
use embedded_hal::digital::PinState;
use gpiocdev::line::{Config, Direction, Offset, Value};
use gpiocdev::Request;
use std::path::Path;

/// The consumer label applied to lines requested by [`OutputLine`].
pub const DEFAULT_CONSUMER: &str = "squarewave";

/// Places a pin into output mode.
///
/// This is the initialisation step that must precede any write to the pin.
/// Implementations must be idempotent - configuring a pin that is already an
/// output leaves it an output and is not an error.
pub trait ConfigureOutput: embedded_hal::digital::ErrorType {
    /// Set the pin to output mode.
    fn configure_output(&mut self) -> Result<(), Self::Error>;
}

/// Options applied when requesting an [`OutputLine`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineOptions {
    /// The consumer label reported for the requested line.
    pub consumer: String,

    /// Treat the line as active-low, so high drives the physical line low.
    pub active_low: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        LineOptions {
            consumer: DEFAULT_CONSUMER.into(),
            active_low: false,
        }
    }
}

/// A single GPIO line requested as an output.
///
/// Provides [`embedded_hal::digital::OutputPin`] for a [`gpiocdev::Request`]
/// containing exactly one line.
///
/// Holding the [`OutputLine`] grants exclusive access to the line.
/// The line is released when the [`OutputLine`] is dropped.
#[derive(Debug)]
pub struct OutputLine {
    req: Request,
    offset: Offset,
    config: Config,
}

impl OutputLine {
    /// Request the line at `offset` on `chip` as an output, initially low.
    ///
    /// ```no_run
    /// # fn example() -> Result<(), gpiocdev_squarewave::Error> {
    /// use embedded_hal::digital::OutputPin;
    ///
    /// let mut line = gpiocdev_squarewave::OutputLine::new("/dev/gpiochip0", 17)?;
    /// line.set_high()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<P>(chip: P, offset: Offset) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        Self::with_options(chip, offset, &LineOptions::default())
    }

    /// Request the line at `offset` on `chip` as an output using the given options.
    pub fn with_options<P>(chip: P, offset: Offset, opts: &LineOptions) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let mut builder = Request::builder();
        builder
            .on_chip(chip.as_ref())
            .with_consumer(opts.consumer.as_str())
            .with_line(offset)
            .as_output(Value::Inactive);
        if opts.active_low {
            builder.as_active_low();
        }
        OutputLine::try_from(builder.request()?)
    }

    /// Find the line with the given name and request it as an output.
    ///
    /// ```no_run
    /// # fn example() -> Result<(), gpiocdev_squarewave::Error> {
    /// let line = gpiocdev_squarewave::OutputLine::from_name("GPIO17", &Default::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_name(name: &str, opts: &LineOptions) -> Result<Self, Error> {
        let fl = gpiocdev::find_named_line(name).ok_or_else(|| Error::UnfoundLine(name.into()))?;
        let mut builder = Request::builder();
        builder
            .with_found_line(&fl)
            .with_consumer(opts.consumer.as_str())
            .as_output(Value::Inactive);
        if opts.active_low {
            builder.as_active_low();
        }
        OutputLine::try_from(builder.request()?)
    }

    /// The offset of the line on its chip.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// The most recently set logical value, if any.
    pub fn value(&self) -> Option<Value> {
        self.config.value
    }

    fn set_state(&mut self, state: PinState) -> Result<(), Error> {
        let value = state_to_value(state);
        if self.config.value != Some(value) {
            self.req.set_value(self.offset, value)?;
            self.config.value = Some(value);
        }
        Ok(())
    }
}

impl TryFrom<Request> for OutputLine {
    type Error = Error;

    /// Wrap a single line [`gpiocdev::Request`].
    ///
    /// The line need not already be an output - [`ConfigureOutput`] will
    /// switch it.
    fn try_from(req: Request) -> Result<Self, Self::Error> {
        let config = req.config();
        let offsets = config.lines();
        if offsets.len() != 1 {
            return Err(Error::MultipleLinesRequested);
        }
        let offset = offsets[0];
        let line_config = config
            .line_config(offset)
            .cloned()
            .ok_or(Error::MultipleLinesRequested)?;
        Ok(OutputLine {
            req,
            offset,
            config: line_config,
        })
    }
}

impl From<OutputLine> for Request {
    fn from(line: OutputLine) -> Self {
        line.req
    }
}

impl ConfigureOutput for OutputLine {
    fn configure_output(&mut self) -> Result<(), Error> {
        if self.config.direction == Some(Direction::Output) {
            return Ok(());
        }
        let value = self.config.value.unwrap_or_default();
        let mut config = self.req.config();
        config.from_line_config(&self.config).as_output(value);
        self.req.reconfigure(&config)?;
        self.config.direction = Some(Direction::Output);
        self.config.value = Some(value);
        Ok(())
    }
}

impl embedded_hal::digital::OutputPin for OutputLine {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::Low)
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::High)
    }
}

impl embedded_hal::digital::ErrorType for OutputLine {
    type Error = Error;
}

// active-low is applied by the kernel, so the logical value is unaffected.
fn state_to_value(state: PinState) -> Value {
    match state {
        PinState::High => Value::Active,
        PinState::Low => Value::Inactive,
    }
}
