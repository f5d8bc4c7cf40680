// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::pin::ConfigureOutput;
use crate::wave::{ParamError, SquareWave, Tone, ToneLoop};
use crate::CancelToken;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info, trace};

/// Counts of the work performed by a run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Full high/low cycles completed.
    pub cycles: u64,

    /// Tone bursts completed.
    pub bursts: u64,
}

/// Errors returned by [`Generator`] operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error<E> {
    /// The waveform parameters are out of range.
    #[error(transparent)]
    Param(#[from] ParamError),

    /// The pin returned an error.
    #[error("pin error")]
    Pin(#[source] E),
}

/// Generates square waves on a single output pin.
///
/// The generator owns the pin and the delay for its lifetime, so nothing else
/// may alter the pin while a wave is being generated.
///
/// Each cycle drives the pin high, holds for a half-period, drives it low and
/// holds for another half-period. Runs check their [`CancelToken`] before
/// each cycle, so the pin is always left low by a completed run.
#[derive(Debug)]
pub struct Generator<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Generator<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a generator driving `pin` with timing from `delay`.
    pub fn new(pin: P, delay: D) -> Self {
        Generator { pin, delay }
    }

    /// Place the pin into output mode.
    ///
    /// May be called repeatedly.
    pub fn configure(&mut self) -> Result<(), Error<P::Error>>
    where
        P: ConfigureOutput,
    {
        debug!("configuring pin as output");
        self.pin.configure_output().map_err(Error::Pin)
    }

    /// Generate a square wave until cancelled.
    ///
    /// Without cancellation this never returns - the wave is generated for
    /// the lifetime of the process.
    pub fn run_square_wave(
        &mut self,
        wave: &SquareWave,
        cancel: &CancelToken,
    ) -> Result<Stats, Error<P::Error>> {
        wave.validate()?;
        info!(
            "square wave started: half-period {}us, period {:?}",
            wave.half_period_us,
            wave.period()
        );
        let mut stats = Stats::default();
        while !cancel.is_cancelled() {
            self.cycle(wave.half_period_us)?;
            stats.cycles += 1;
        }
        info!("square wave stopped after {} cycles", stats.cycles);
        Ok(stats)
    }

    /// Generate a single tone burst.
    ///
    /// Returns once the burst completes, or early if cancelled.
    pub fn run_tone(&mut self, tone: &Tone, cancel: &CancelToken) -> Result<Stats, Error<P::Error>> {
        tone.validate()?;
        let stats = self.burst(tone, cancel)?;
        info!("tone finished after {} cycles", stats.cycles);
        Ok(stats)
    }

    /// Repeat a tone burst, separated by an idle gap, until cancelled.
    ///
    /// Without cancellation this never returns.
    pub fn run_tone_loop(
        &mut self,
        tl: &ToneLoop,
        cancel: &CancelToken,
    ) -> Result<Stats, Error<P::Error>> {
        tl.tone.validate()?;
        info!(
            "tone loop started: {}Hz for {}s, gap {}ms",
            tl.tone.frequency_hz, tl.tone.duration_s, tl.gap_ms
        );
        let mut stats = Stats::default();
        while !cancel.is_cancelled() {
            let burst = self.burst(&tl.tone, cancel)?;
            stats.cycles += burst.cycles;
            stats.bursts += burst.bursts;
            if cancel.is_cancelled() {
                break;
            }
            self.delay.delay_ms(tl.gap_ms);
        }
        info!(
            "tone loop stopped after {} bursts, {} cycles",
            stats.bursts, stats.cycles
        );
        Ok(stats)
    }

    /// Return the pin and delay.
    pub fn into_inner(self) -> (P, D) {
        (self.pin, self.delay)
    }

    // assumes the tone has been validated.
    fn burst(&mut self, tone: &Tone, cancel: &CancelToken) -> Result<Stats, Error<P::Error>> {
        let half_cycle = tone.half_cycle_us();
        let cycles = tone.cycles();
        trace!("burst: {cycles} cycles of {half_cycle}us half-cycles");
        let mut stats = Stats::default();
        while stats.cycles < cycles {
            if cancel.is_cancelled() {
                return Ok(stats);
            }
            self.cycle(half_cycle)?;
            stats.cycles += 1;
        }
        stats.bursts = 1;
        Ok(stats)
    }

    #[inline]
    fn cycle(&mut self, half_period_us: u32) -> Result<(), Error<P::Error>> {
        self.pin.set_high().map_err(Error::Pin)?;
        self.delay.delay_us(half_period_us);
        self.pin.set_low().map_err(Error::Pin)?;
        self.delay.delay_us(half_period_us);
        Ok(())
    }
}
