//! Log capture for tests.
//!
//! Installs a process-wide logger once and keeps records per thread, so each
//! test only sees what it logged itself.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CaptureLogger;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Runs `f` and returns its result with everything it logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    RECORDS.with(|records| records.borrow_mut().clear());
    let result = f();
    let logged = RECORDS.with(|records| records.borrow_mut().drain(..).collect());
    (result, logged)
}

/// Whether any record at `level` contains `needle`.
pub fn logged(records: &[(Level, String)], level: Level, needle: &str) -> bool {
    records
        .iter()
        .any(|(l, message)| *l == level && message.contains(needle))
}
