// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of generating a 100kHz square wave on a single line.

use anyhow::Context;
use gpiocdev_squarewave::{CancelToken, Generator, OutputLine, SquareWave, ThreadDelay};

fn main() -> anyhow::Result<()> {
    let offset = 22;

    let line = OutputLine::new("/dev/gpiochip0", offset).context("Failed to request line")?;
    let mut gen = Generator::new(line, ThreadDelay::new());
    gen.configure().context("Failed to configure line")?;

    println!("square wave on line {}...", offset);
    // never cancelled, so runs until the process is killed
    gen.run_square_wave(&SquareWave::default(), &CancelToken::new())
        .context("Failed to set value")?;
    Ok(())
}
