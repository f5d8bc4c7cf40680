// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::LineOpts;
use super::signal;
use anyhow::{Context, Result};
use clap::Parser;
use gpiocdev_squarewave::wave::DEFAULT_HALF_PERIOD_US;
use gpiocdev_squarewave::{Generator, SquareWave, ThreadDelay};
use log::info;

#[derive(Debug, Parser)]
#[command(alias("sq"))]
pub struct Opts {
    #[command(flatten)]
    line_opts: LineOpts,

    /// The time the line is held at each level, in microseconds.
    ///
    /// The wave period is twice the half-period.
    #[arg(short = 'p', long, value_name = "us", default_value_t = DEFAULT_HALF_PERIOD_US)]
    half_period: u32,
}

impl Opts {
    fn wave(&self) -> Result<SquareWave> {
        SquareWave::new(self.half_period).context("invalid square wave")
    }
}

/// Generate the square wave until interrupted.
///
/// Exits cleanly, with the line left low, on SIGINT or SIGTERM.
pub fn cmd(opts: &Opts) -> Result<()> {
    let wave = opts.wave()?;
    let line = opts.line_opts.request()?;
    let token = signal::cancel_on_interrupt()?;
    let mut gen = Generator::new(line, ThreadDelay::new().with_cancel(token.clone()));
    gen.configure().context("unable to configure line as output")?;
    let stats = gen
        .run_square_wave(&wave, &token)
        .context("square wave failed")?;
    info!("generated {} cycles", stats.cycles);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_half_period() {
        let opts = Opts::try_parse_from(["square", "--chip", "0", "17"]).unwrap();
        assert_eq!(opts.wave().unwrap(), SquareWave::default());
    }

    #[test]
    fn half_period() {
        let opts = Opts::try_parse_from(["square", "-p", "50", "GPIO17"]).unwrap();
        assert_eq!(opts.wave().unwrap().half_period_us, 50);
        let opts = Opts::try_parse_from(["square", "-p", "0", "GPIO17"]).unwrap();
        assert!(opts.wave().is_err());
    }
}
