// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command line tool for generating square waves on a GPIO line.

use clap::Parser;
use std::process::ExitCode;

mod common;
mod logger;
mod signal;
mod square;
mod tone;

fn main() -> ExitCode {
    match Opts::try_parse() {
        Ok(opt) => {
            logger::init(opt.verbose);
            let res = match opt.cmd {
                Command::Square(cfg) => square::cmd(&cfg),
                Command::Tone(cfg) => tone::cmd(&cfg),
            };
            return match res {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    common::emit_error(opt.verbose, &e);
                    ExitCode::FAILURE
                }
            };
        }
        Err(e) => {
            // --help and --version are not failures
            let _ = e.print();
            if !e.use_stderr() {
                return ExitCode::SUCCESS;
            }
        }
    }
    ExitCode::FAILURE
}

#[derive(Parser)]
#[command(
    name = "squarewave",
    about = "A utility to generate square waves and tones on a GPIO line.",
    version,
    propagate_version = true
)]
struct Opts {
    /// Increase the logging detail, and provide more detailed error messages.
    ///
    /// May be repeated, up to -vvv.
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count, display_order = 800)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate a free running square wave until interrupted.
    Square(square::Opts),

    /// Generate tone bursts at an audio frequency.
    Tone(tone::Opts),
}
