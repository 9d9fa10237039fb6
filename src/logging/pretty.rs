//! Colorized, human-readable console handler for local development.
//!
//! Records are first run through a strict encoder into a buffer shared by
//! every handler derived from the same root, then parsed back into an
//! ordered attribute map and pretty-printed below a colored header line:
//!
//! ```text
//! [Mon Jan 2 2006 15:04:05] INFO: created
//! {
//!   "op": "CreateWidget",
//!   "request_id": "abc-123"
//! }
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use crate::error::{LogError, LogResult};
use crate::logging::color::{colorize, colorize_level, Color};
use crate::logging::{Attr, Encoder, Handler, JsonEncoder, Level, LogWriter, Record};

const TIME_FORMAT: &str = "[%a %b %-d %Y %H:%M:%S]";

/// Console handler wrapping a strict encoder `E`.
///
/// Clones produced by [`Handler::with_attrs`] and [`Handler::with_group`]
/// share the encode buffer, its lock, and the output stream with the handler
/// they came from.
pub struct PrettyHandler<E = JsonEncoder> {
    encoder: E,
    buffer: Arc<Mutex<Vec<u8>>>,
    writer: LogWriter,
}

impl PrettyHandler<JsonEncoder> {
    pub fn new(min_level: Level, writer: LogWriter) -> Self {
        Self::with_encoder(JsonEncoder::new(min_level).suppress_defaults(), writer)
    }
}

impl<E: Encoder> PrettyHandler<E> {
    /// Wrap an arbitrary encoder. It must emit one JSON object per record and
    /// should leave out time, level and message, which the header already shows.
    pub fn with_encoder(encoder: E, writer: LogWriter) -> Self {
        Self {
            encoder,
            buffer: Arc::new(Mutex::new(Vec::with_capacity(1024))),
            writer,
        }
    }

    fn derive(&self, encoder: E) -> Arc<dyn Handler> {
        Arc::new(Self {
            encoder,
            buffer: Arc::clone(&self.buffer),
            writer: self.writer.clone(),
        })
    }

    /// Encode `record` into the shared buffer and parse it back.
    ///
    /// The buffer is empty again when this returns, whatever the outcome.
    fn snapshot(&self, record: &Record) -> LogResult<Map<String, Value>> {
        // The buffer is cleared on every exit, so a poisoned lock holds no stale bytes.
        let mut buffer = ResetOnDrop(self.buffer.lock().unwrap_or_else(PoisonError::into_inner));

        self.encoder.encode(record, &mut buffer)?;
        serde_json::from_slice(&buffer).map_err(LogError::Decode)
    }

    fn render(&self, record: &Record, attrs: &Map<String, Value>) -> LogResult<String> {
        let block = serde_json::to_string_pretty(attrs).map_err(LogError::Encode)?;
        let time = record.time.format(TIME_FORMAT).to_string();

        Ok(format!(
            "{} {}: {}\n{}\n",
            colorize(Color::LightGray, &time),
            colorize_level(record.level),
            colorize(Color::White, &record.message),
            colorize(Color::DarkGray, &block),
        ))
    }
}

impl<E: Encoder> Handler for PrettyHandler<E> {
    fn enabled(&self, level: Level) -> bool {
        self.encoder.enabled(level)
    }

    fn handle(&self, record: &Record) -> LogResult<()> {
        let attrs = self.snapshot(record)?;
        let text = self.render(record, &attrs)?;
        self.writer.write_record(text.as_bytes())?;
        Ok(())
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        self.derive(self.encoder.with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        self.derive(self.encoder.with_group(name))
    }
}

/// Holds the buffer lock and empties the buffer before releasing it.
struct ResetOnDrop<'a>(MutexGuard<'a, Vec<u8>>);

impl Deref for ResetOnDrop<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl DerefMut for ResetOnDrop<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.0
    }
}

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}
