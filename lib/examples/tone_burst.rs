// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of playing middle C on a buzzer, with a pause between notes.

use anyhow::Context;
use gpiocdev_squarewave::{CancelToken, Generator, OutputLine, ThreadDelay, ToneLoop};
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let line = OutputLine::from_name("BUZZER", &Default::default())
        .context("Failed to request line")?;
    let mut gen = Generator::new(line, ThreadDelay::new());

    // stop after ten seconds
    let token = CancelToken::new();
    let timer = token.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(10));
        timer.cancel();
    });

    let stats = gen
        .run_tone_loop(&ToneLoop::default(), &token)
        .context("Failed to set value")?;
    println!("{} bursts, {} cycles", stats.bursts, stats.cycles);
    Ok(())
}
