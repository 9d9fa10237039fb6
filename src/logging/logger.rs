//! The logger handed to call sites.

use std::fmt;
use std::sync::Arc;

use crate::logging::{Attr, Handler, Level, Record};

/// A cheap, cloneable view over a handler.
///
/// Attributes attached with [`Logger::with`] are fixed for the lifetime of
/// the returned logger and cannot be removed, only shadowed by a later
/// attribute with the same key.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    /// A logger that attaches `attrs` to every record.
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Self::new(self.handler.with_attrs(&attrs))
    }

    /// A logger that nests every later attribute under `name`.
    #[allow(dead_code)]
    pub fn with_group(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        Self::new(self.handler.with_group(name))
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Emit a record. Failures lose the record and are not reported.
    pub fn log(&self, level: Level, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        if !self.enabled(level) {
            return;
        }
        let record = Record::new(level, message).with_attrs(attrs);
        self.log_record(&record);
    }

    pub(crate) fn log_record(&self, record: &Record) {
        // Best effort: a logging failure must not become a service failure.
        let _ = self.handler.handle(record);
    }

    pub fn debug(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Debug, message, attrs);
    }

    pub fn info(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Info, message, attrs);
    }

    pub fn warn(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Warn, message, attrs);
    }

    pub fn error(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Error, message, attrs);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::Capture;
    use crate::logging::{JsonHandler, LogWriter};
    use serde_json::Value;

    fn capture_logger(min_level: Level) -> (Logger, Capture) {
        let capture = Capture::default();
        let handler = JsonHandler::new(min_level, capture.writer());
        (Logger::new(Arc::new(handler)), capture)
    }

    fn lines(capture: &Capture) -> Vec<Value> {
        capture
            .contents()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_below_min_level_dropped() {
        let (log, capture) = capture_logger(Level::Info);
        log.debug("hidden", []);
        log.info("shown", []);

        let lines = lines(&capture);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["msg"], "shown");
    }

    #[test]
    fn test_with_is_additive() {
        let (log, capture) = capture_logger(Level::Debug);
        let first = log.with([Attr::new("a", 1)]);
        let second = first.with([Attr::new("b", 2)]);

        second.warn("both", [Attr::new("c", 3)]);
        first.warn("one", []);

        let lines = lines(&capture);
        assert_eq!(lines[0]["a"], 1);
        assert_eq!(lines[0]["b"], 2);
        assert_eq!(lines[0]["c"], 3);
        assert_eq!(lines[1]["a"], 1);
        assert!(lines[1].get("b").is_none());
    }

    #[test]
    fn test_with_group() {
        let (log, capture) = capture_logger(Level::Debug);
        log.with_group("request")
            .error("failed", [Attr::new("status", 500)]);

        assert_eq!(lines(&capture)[0]["request"]["status"], 500);
    }

    #[test]
    fn test_logger_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();

        let log = Logger::new(Arc::new(JsonHandler::new(Level::Info, LogWriter::discard())));
        assert!(log.enabled(Level::Error));
    }
}
