//! Strict JSON encoding of records.

use chrono::SecondsFormat;
use serde_json::{Map, Value};

use crate::error::{LogError, LogResult};
use crate::logging::{Attr, Level, Record};

pub const TIME_KEY: &str = "time";
pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "msg";

/// Serializes records into bytes.
///
/// Implementations append exactly one record to `buf` per `encode` call.
pub trait Encoder: Send + Sync + 'static {
    fn enabled(&self, level: Level) -> bool;

    fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> LogResult<()>;

    fn with_attrs(&self, attrs: &[Attr]) -> Self
    where
        Self: Sized;

    fn with_group(&self, name: &str) -> Self
    where
        Self: Sized;
}

/// Encodes each record as one JSON object followed by a newline.
///
/// Field order is `time`, `level`, `msg`, pre-attached attributes, then the
/// record's own attributes. A repeated key keeps its first position and its
/// last value.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    min_level: Level,
    suppress_defaults: bool,
    preformatted: Map<String, Value>,
    groups: Vec<String>,
}

impl JsonEncoder {
    pub fn new(min_level: Level) -> Self {
        Self {
            min_level,
            suppress_defaults: false,
            preformatted: Map::new(),
            groups: Vec::new(),
        }
    }

    /// Omit `time`, `level` and `msg` from the output.
    pub fn suppress_defaults(mut self) -> Self {
        self.suppress_defaults = true;
        self
    }

    fn to_object(&self, record: &Record) -> Map<String, Value> {
        let mut object = Map::new();
        if !self.suppress_defaults {
            object.insert(
                TIME_KEY.to_string(),
                Value::String(record.time.to_rfc3339_opts(SecondsFormat::Millis, false)),
            );
            object.insert(LEVEL_KEY.to_string(), Value::String(record.level.to_string()));
            object.insert(MESSAGE_KEY.to_string(), Value::String(record.message.clone()));
        }

        for (key, value) in &self.preformatted {
            object.insert(key.clone(), value.clone());
        }
        for attr in &record.attrs {
            insert_at(&mut object, &self.groups, attr.key.clone(), attr.value.clone());
        }
        object
    }
}

impl Encoder for JsonEncoder {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> LogResult<()> {
        let object = Value::Object(self.to_object(record));
        serde_json::to_writer(&mut *buf, &object).map_err(LogError::Encode)?;
        buf.push(b'\n');
        Ok(())
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Self {
        let mut encoder = self.clone();
        for attr in attrs {
            insert_at(
                &mut encoder.preformatted,
                &self.groups,
                attr.key.clone(),
                attr.value.clone(),
            );
        }
        encoder
    }

    fn with_group(&self, name: &str) -> Self {
        let mut encoder = self.clone();
        if !name.is_empty() {
            encoder.groups.push(name.to_string());
        }
        encoder
    }
}

/// Insert `key = value` into the object reached by following `path`,
/// creating intermediate group objects as needed.
fn insert_at(map: &mut Map<String, Value>, path: &[String], key: String, value: Value) {
    match path.split_first() {
        None => {
            map.insert(key, value);
        }
        Some((group, rest)) => {
            let slot = map
                .entry(group.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = slot {
                insert_at(inner, rest, key, value);
            } else {
                let mut inner = Map::new();
                insert_at(&mut inner, rest, key, value);
                *slot = Value::Object(inner);
            }
        }
    }
}
