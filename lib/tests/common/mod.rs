// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// A pin and delay that record their calls rather than touch hardware.

#![allow(dead_code)]

use gpiocdev_squarewave::{CancelToken, ConfigureOutput};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    Configure,
    High,
    Low,
    Delay(Duration),
}

pub fn delay_us(us: u64) -> Call {
    Call::Delay(Duration::from_micros(us))
}

#[derive(Debug, Default)]
pub struct Trace {
    pub calls: Vec<Call>,
    // virtual time accumulated by the delay
    pub elapsed: Duration,
    pub is_output: bool,
    pub configure_count: usize,
    // skip recording calls, for long runs
    pub quiet: bool,
}

impl Trace {
    fn record(&mut self, call: Call) {
        if !self.quiet {
            self.calls.push(call);
        }
    }
}

pub type SharedTrace = Arc<Mutex<Trace>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MockError;

impl embedded_hal::digital::Error for MockError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

#[derive(Debug)]
pub struct MockPin {
    trace: SharedTrace,
    highs: Arc<AtomicU64>,
    cancel_after: Option<(u64, CancelToken)>,
    fail_on_high: Option<u64>,
}

impl MockPin {
    pub fn new(trace: &SharedTrace) -> Self {
        MockPin {
            trace: trace.clone(),
            highs: Arc::new(AtomicU64::new(0)),
            cancel_after: None,
            fail_on_high: None,
        }
    }

    // cancel the token when the nth cycle drives the pin low
    pub fn cancel_after(mut self, cycles: u64, token: &CancelToken) -> Self {
        self.cancel_after = Some((cycles, token.clone()));
        self
    }

    // fail the nth set_high
    pub fn fail_on_high(mut self, n: u64) -> Self {
        self.fail_on_high = Some(n);
        self
    }

    // a handle to the count of set_high calls, readable from another thread
    pub fn high_count(&self) -> Arc<AtomicU64> {
        self.highs.clone()
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = MockError;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), MockError> {
        let n = self.highs.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_high == Some(n) {
            return Err(MockError);
        }
        self.trace.lock().unwrap().record(Call::High);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), MockError> {
        self.trace.lock().unwrap().record(Call::Low);
        if let Some((cycles, token)) = &self.cancel_after {
            if self.highs.load(Ordering::SeqCst) >= *cycles {
                token.cancel();
            }
        }
        Ok(())
    }
}

impl ConfigureOutput for MockPin {
    fn configure_output(&mut self) -> Result<(), MockError> {
        let mut trace = self.trace.lock().unwrap();
        trace.is_output = true;
        trace.configure_count += 1;
        trace.record(Call::Configure);
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockDelay {
    trace: SharedTrace,
}

impl MockDelay {
    pub fn new(trace: &SharedTrace) -> Self {
        MockDelay {
            trace: trace.clone(),
        }
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let d = Duration::from_nanos(ns.into());
        let mut trace = self.trace.lock().unwrap();
        trace.elapsed += d;
        trace.record(Call::Delay(d));
    }
}

pub fn new_trace() -> SharedTrace {
    Arc::new(Mutex::new(Trace::default()))
}

pub fn calls(trace: &SharedTrace) -> Vec<Call> {
    trace.lock().unwrap().calls.clone()
}
