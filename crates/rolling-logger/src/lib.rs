//! Rolling Logger
//!
//! A `log` backend that keeps the most recent records in a circular buffer
//! and forwards each record to the browser console (stderr off-wasm).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of records kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Fixed-size buffer of formatted log lines, oldest dropped first
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in arrival order
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

pub struct RollingLogger {
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

impl RollingLogger {
    pub fn new(level: LevelFilter, capacity: usize) -> Self {
        Self {
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    /// Most recent records, oldest first
    pub fn recent(&self) -> Vec<String> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.snapshot(),
            Err(poisoned) => poisoned.into_inner().snapshot(),
        }
    }

    fn remember(&self, line: String) {
        match self.buffer.lock() {
            Ok(mut buffer) => buffer.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}

/// Format a record as `2024-07-01T10:00:00.000Z WARN target: message`
pub fn format_record(record: &Record) -> String {
    format!(
        "{} {:<5} {}: {}",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        emit(record.level(), &line);
        self.remember(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Install the global logger. Calling it twice keeps the first instance.
pub fn init(level: LevelFilter, capacity: usize) -> Result<&'static RollingLogger, SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(level, capacity));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(logger)
}

/// The installed logger, if `init` has run
pub fn logger() -> Option<&'static RollingLogger> {
    LOGGER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut buffer = RingBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.snapshot(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut buffer = RingBuffer::new(0);
        buffer.push("a".to_string());
        buffer.push("b".to_string());
        assert_eq!(buffer.snapshot(), vec!["b"]);
    }

    #[test]
    fn test_logger_filters_by_level() {
        let logger = RollingLogger::new(LevelFilter::Warn, 10);
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("forms")
                .args(format_args!("ignored"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("forms")
                .args(format_args!("kept"))
                .build(),
        );

        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert!(recent[0].contains("ERROR"));
        assert!(recent[0].ends_with("forms: kept"));
    }
}
