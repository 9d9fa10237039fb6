//! The sink capability shared by every handler.

use std::sync::Arc;

use crate::error::LogResult;
use crate::logging::{Attr, Level, Record};

/// A destination for records.
///
/// Handlers are shared across tasks, so every method takes `&self`.
/// Narrowing (`with_attrs`, `with_group`) returns a new handler and never
/// mutates the receiver.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be emitted.
    fn enabled(&self, level: Level) -> bool;

    /// Emit one record. An error means this record was lost.
    fn handle(&self, record: &Record) -> LogResult<()>;

    /// A handler that attaches `attrs` to every record.
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// A handler that nests every later attribute under `name`.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}
