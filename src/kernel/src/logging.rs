//! Structured diagnostic logging, wired to the `log` facade.
//!
//! The scheduler itself never calls into a concrete logger; it emits
//! `trace!`/`debug!`/`warn!`/`error!` through the facade, and `trace_on`/
//! `trace_off` on a [`crate::host::Host`] implementation raise or lower the
//! global max level. [`init`] installs a minimal logger for binaries that
//! don't want to pull in a bigger logging crate; library consumers are free
//! to install their own (`env_logger`, `simplelog`, ...) instead.

use std::sync::atomic::{AtomicBool, Ordering};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}][{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Installs the bundled stderr logger as the global `log` logger, at
/// `Info` level (matching the `startup()` contract's `trace_off()`).
///
/// Idempotent: later calls are no-ops. Does nothing if a different logger
/// has already been installed via [`log::set_logger`] directly.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    log::set_max_level(log::LevelFilter::Info);
    let _ = log::set_logger(&LOGGER);
}
