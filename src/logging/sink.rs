//! Machine-structured sink: one JSON object per line.

use std::sync::Arc;

use crate::error::LogResult;
use crate::logging::{Attr, Encoder, Handler, JsonEncoder, Level, LogWriter, Record};

/// Writes every record as a single JSON line, with no field suppression.
#[derive(Debug, Clone)]
pub struct JsonHandler {
    encoder: JsonEncoder,
    writer: LogWriter,
}

impl JsonHandler {
    pub fn new(min_level: Level, writer: LogWriter) -> Self {
        Self {
            encoder: JsonEncoder::new(min_level),
            writer,
        }
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        self.encoder.enabled(level)
    }

    fn handle(&self, record: &Record) -> LogResult<()> {
        let mut line = Vec::with_capacity(256);
        self.encoder.encode(record, &mut line)?;
        self.writer.write_record(&line)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(Self {
            encoder: self.encoder.with_attrs(attrs),
            writer: self.writer.clone(),
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(Self {
            encoder: self.encoder.with_group(name),
            writer: self.writer.clone(),
        })
    }
}
