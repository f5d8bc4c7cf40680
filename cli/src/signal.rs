// SPDX-FileCopyrightText: 2026 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{bail, Result};
use gpiocdev_squarewave::CancelToken;
use std::sync::OnceLock;

// the token cancelled by the signal handler
static TOKEN: OnceLock<CancelToken> = OnceLock::new();

extern "C" fn handle_signal(_sig: libc::c_int) {
    // only an atomic store - safe within a signal handler
    if let Some(token) = TOKEN.get() {
        token.cancel();
    }
}

/// Returns a token that is cancelled when the process receives SIGINT or SIGTERM.
///
/// The handlers are installed on the first call; later calls return clones
/// of the same token.
pub fn cancel_on_interrupt() -> Result<CancelToken> {
    if let Some(token) = TOKEN.get() {
        return Ok(token.clone());
    }
    let token = TOKEN.get_or_init(CancelToken::new).clone();
    for sig in [libc::SIGINT, libc::SIGTERM] {
        let handler = handle_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
        // SAFETY: the handler only performs an atomic store.
        if unsafe { libc::signal(sig, handler) } == libc::SIG_ERR {
            bail!("unable to install handler for signal {sig}");
        }
    }
    Ok(token)
}
