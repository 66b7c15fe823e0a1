//! Run-scoped logger handle.
//!
//! Threaded through the execution context instead of living in a global.
//! Lines go to stderr so stdout stays reserved for the JSON response
//! envelope; tests use the capturing sink to assert on emitted lines.

use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
pub struct Logger {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    sink: Sink,
    indent: usize,
}

#[derive(Debug)]
enum Sink {
    Stderr,
    Capture(Vec<String>),
}

impl Logger {
    pub fn stderr() -> Self {
        Self::with_sink(Sink::Stderr)
    }

    /// Logger that records lines in memory instead of writing them out.
    pub fn capture() -> Self {
        Self::with_sink(Sink::Capture(Vec::new()))
    }

    fn with_sink(sink: Sink) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { sink, indent: 0 })),
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit("INFO", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit("WARN", message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.emit("ERROR", message.as_ref());
    }

    pub fn increase_indent(&self) {
        let mut inner = self.lock();
        inner.indent += 1;
    }

    pub fn decrease_indent(&self) {
        let mut inner = self.lock();
        inner.indent = inner.indent.saturating_sub(1);
    }

    /// Lines recorded by a capturing logger. Empty for the stderr sink.
    pub fn captured(&self) -> Vec<String> {
        match &self.lock().sink {
            Sink::Stderr => Vec::new(),
            Sink::Capture(lines) => lines.clone(),
        }
    }

    fn emit(&self, level: &str, message: &str) {
        let mut inner = self.lock();
        let line = format!(
            "[{}] {}{}",
            level,
            "  ".repeat(inner.indent),
            message
        );
        match &mut inner.sink {
            Sink::Stderr => eprintln!("{}", line),
            Sink::Capture(lines) => lines.push(line),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_records_formatted_lines() {
        let logger = Logger::capture();
        logger.info("hello");
        logger.error("boom");

        let lines = logger.captured();
        assert_eq!(lines, vec!["[INFO] hello", "[ERROR] boom"]);
    }

    #[test]
    fn indent_prefixes_nested_lines() {
        let logger = Logger::capture();
        logger.info("configuring");
        logger.increase_indent();
        logger.info("- basedir set to /tmp");
        logger.decrease_indent();
        logger.info("done");

        let lines = logger.captured();
        assert_eq!(lines[1], "[INFO]   - basedir set to /tmp");
        assert_eq!(lines[2], "[INFO] done");
    }

    #[test]
    fn decrease_indent_saturates_at_zero() {
        let logger = Logger::capture();
        logger.decrease_indent();
        logger.info("still flat");
        assert_eq!(logger.captured(), vec!["[INFO] still flat"]);
    }

    #[test]
    fn clones_share_the_same_sink() {
        let logger = Logger::capture();
        let clone = logger.clone();
        clone.info("from clone");
        assert_eq!(logger.captured(), vec!["[INFO] from clone"]);
    }
}
