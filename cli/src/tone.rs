// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, LineOpts};
use super::signal;
use anyhow::{Context, Result};
use clap::Parser;
use gpiocdev_squarewave::wave::C4;
use gpiocdev_squarewave::{Generator, ThreadDelay, Tone, ToneLoop};
use log::info;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(alias("t"))]
pub struct Opts {
    #[command(flatten)]
    line_opts: LineOpts,

    /// The tone frequency.
    ///
    /// Taken as Hz unless 'kHz' units are specified.
    /// Defaults to middle C.
    #[arg(short, long, value_name = "freq", default_value_t = C4, value_parser = common::parse_frequency)]
    frequency: f64,

    /// The length of each tone burst.
    ///
    /// Taken as seconds unless 'ms' units are specified.
    #[arg(short, long, value_name = "period", default_value = "1", value_parser = common::parse_seconds)]
    duration: f64,

    /// The idle period between tone bursts.
    ///
    /// Taken as milliseconds unless other units are specified.
    #[arg(short, long, value_name = "period", default_value = "20ms", value_parser = common::parse_duration)]
    gap: Duration,

    /// Generate a single tone burst then exit.
    #[arg(long)]
    once: bool,
}

impl Opts {
    fn tone(&self) -> Result<Tone> {
        Tone::new(self.frequency, self.duration).context("invalid tone")
    }

    fn tone_loop(&self) -> Result<ToneLoop> {
        let gap_ms = u32::try_from(self.gap.as_millis()).context("gap is too long")?;
        Ok(ToneLoop::new(self.tone()?, gap_ms))
    }
}

/// Generate tone bursts until interrupted, or a single burst with --once.
pub fn cmd(opts: &Opts) -> Result<()> {
    let tl = opts.tone_loop()?;
    let line = opts.line_opts.request()?;
    let token = signal::cancel_on_interrupt()?;
    let mut gen = Generator::new(line, ThreadDelay::new().with_cancel(token.clone()));
    gen.configure().context("unable to configure line as output")?;
    let res = if opts.once {
        gen.run_tone(&tl.tone, &token)
    } else {
        gen.run_tone_loop(&tl, &token)
    };
    let stats = res.context("tone failed")?;
    info!("generated {} bursts, {} cycles", stats.bursts, stats.cycles);
    Ok(())
}
