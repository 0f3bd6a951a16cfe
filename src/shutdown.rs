//! Process-wide stop flag set by the ctrlc handler.
//!
//! A batch is never cancelled half-way: the front end checks the flag between
//! phases (plan, confirmation, apply, undo) and stops before the next one.
//! `request()` is safe to call from a signal handler.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a stop before the next phase (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Test-only: clear the flag.
#[cfg(test)]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
