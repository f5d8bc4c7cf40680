// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{Context, Result};
use clap::Parser;
use gpiocdev::chip::{is_chip, Chip};
use gpiocdev::line::Offset;
use gpiocdev_squarewave::{LineOptions, OutputLine};
use log::debug;
use std::path::PathBuf;
use std::time::Duration;

// common helper functions

fn chip_path_from_id(id: &str) -> PathBuf {
    if id.chars().all(char::is_numeric) {
        // from number
        return format!("/dev/gpiochip{id}").into();
    }
    if !id.chars().any(|x| x == '/') {
        // from name
        let mut p: PathBuf = "/dev".into();
        p.push(id);
        return p;
    }
    // from raw path
    id.into()
}

pub fn chip_lookup_from_id(id: &str) -> Result<PathBuf> {
    is_chip(chip_path_from_id(id))
        .with_context(|| format!("cannot find GPIO chip character device '{id}'"))
}

pub fn emit_error(verbosity: u8, e: &anyhow::Error) {
    if verbosity > 0 {
        eprintln!("{e:#}");
    } else {
        eprintln!("{e}");
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("'{0}' unknown units - use 's', 'ms' or 'us'.")]
    DurationUnits(String),
    #[error("'{0}' unknown units - use 'Hz' or 'kHz'.")]
    FrequencyUnits(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseInt(String, std::num::ParseIntError),
    #[error("'{0}' {1}")]
    ParseFloat(String, std::num::ParseFloatError),
}

// split a value into its leading number and trailing units
fn split_units(s: &str) -> Result<(&str, &str), ParseError> {
    match s.find(|c: char| !(c.is_ascii_digit() || c == '.')) {
        Some(0) => Err(ParseError::NoDigits(s.into())),
        Some(n) => Ok(s.split_at(n)),
        None => Ok((s, "")),
    }
}

/// Parse a period, taken as milliseconds unless units are provided.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseError> {
    let (num, units) = split_units(s)?;
    let t = num
        .parse::<u64>()
        .map_err(|e| ParseError::ParseInt(num.into(), e))?;
    Ok(match units {
        "" | "ms" => Duration::from_millis(t),
        "us" => Duration::from_micros(t),
        "s" => Duration::from_secs(t),
        _ => return Err(ParseError::DurationUnits(s.into())),
    })
}

/// Parse a length of time in seconds, with optional 's' or 'ms' units.
pub fn parse_seconds(s: &str) -> std::result::Result<f64, ParseError> {
    let (num, units) = split_units(s)?;
    let t = num
        .parse::<f64>()
        .map_err(|e| ParseError::ParseFloat(num.into(), e))?;
    Ok(match units {
        "" | "s" => t,
        "ms" => t / 1000.0,
        _ => return Err(ParseError::DurationUnits(s.into())),
    })
}

/// Parse a frequency in Hz, with optional 'Hz' or 'kHz' units.
pub fn parse_frequency(s: &str) -> std::result::Result<f64, ParseError> {
    let (num, units) = split_units(s)?;
    let f = num
        .parse::<f64>()
        .map_err(|e| ParseError::ParseFloat(num.into(), e))?;
    Ok(match units.to_ascii_lowercase().as_str() {
        "" | "hz" => f,
        "khz" => f * 1000.0,
        _ => return Err(ParseError::FrequencyUnits(s.into())),
    })
}

// common command line parser options

#[derive(Debug, Parser)]
/// Options to select and request the output line.
pub struct LineOpts {
    /// The line to drive
    ///
    /// Identified by offset if --chip is provided and the line parses as
    /// an offset, else by name.
    #[arg(name = "line")]
    pub line: String,

    /// Restrict scope to the lines on this chip
    ///
    /// If not specified then the named line is searched for on all chips in the system.
    ///
    /// The chip may be identified by number, name, or path.
    /// e.g. the following all select the same chip:
    ///     --chip 0
    ///     --chip gpiochip0
    ///     --chip /dev/gpiochip0
    #[arg(short, long, value_name = "chip", env = "SQUAREWAVE_CHIP", verbatim_doc_comment)]
    pub chip: Option<String>,

    /// The line is strictly identified by name
    #[arg(long)]
    pub by_name: bool,

    /// Treat the line as active-low
    #[arg(short = 'l', long)]
    pub active_low: bool,

    /// The consumer label applied to the requested line.
    #[arg(long, name = "consumer", default_value = gpiocdev_squarewave::pin::DEFAULT_CONSUMER)]
    pub consumer: String,
}

impl LineOpts {
    fn line_options(&self) -> LineOptions {
        LineOptions {
            consumer: self.consumer.clone(),
            active_low: self.active_low,
        }
    }

    fn offset(&self) -> Option<Offset> {
        if self.by_name {
            return None;
        }
        self.line.parse::<Offset>().ok()
    }

    /// Request the selected line as an output.
    pub fn request(&self) -> Result<OutputLine> {
        let opts = self.line_options();
        let Some(chip_id) = &self.chip else {
            debug!("searching all chips for line '{}'", self.line);
            return OutputLine::from_name(&self.line, &opts)
                .with_context(|| format!("unable to request line '{}'", self.line));
        };
        let path = chip_lookup_from_id(chip_id)?;
        let offset = match self.offset() {
            Some(offset) => offset,
            None => {
                let chip = Chip::from_path(&path)
                    .with_context(|| format!("unable to open chip '{}'", path.display()))?;
                chip.find_line_info(&self.line)
                    .with_context(|| format!("cannot find line '{}' on {chip_id}", self.line))?
                    .offset
            }
        };
        debug!("requesting line {offset} on {}", path.display());
        OutputLine::with_options(&path, offset, &opts).with_context(|| {
            format!(
                "unable to request line {offset} on '{}' as output",
                path.display()
            )
        })
    }
}
