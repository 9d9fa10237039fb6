//! Structured logging for the statistic service.
//!
//! Provides:
//! - Logger: cloneable handle that call sites log through
//! - Enrichment: `wrap` derives loggers tagged with op/request/attributes
//! - Handlers: colorized console (local), JSON lines (dev), discard (testing)
//! - Bridge: forwards `tracing` events from dependencies into the same sink

mod bridge;
pub mod color;
mod encoder;
mod enrich;
mod handler;
mod level;
mod logger;
mod pretty;
mod record;
mod sink;
mod writer;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt::Display;
use std::sync::Arc;

pub use bridge::*;
pub use encoder::*;
pub use enrich::*;
pub use handler::*;
pub use level::*;
pub use logger::*;
pub use pretty::*;
pub use record::*;
pub use sink::*;
pub use writer::*;

use crate::config::EnvType;
use crate::error::LogResult;

/// Attribute key used by [`error`].
pub const ERROR_KEY: &str = "error";

/// Build the logger for an environment tag, writing to stdout.
///
/// Fails on tags other than `local`, `dev` and `testing`.
#[cfg_attr(not(test), allow(dead_code))]
pub fn new(env: &str) -> LogResult<Logger> {
    new_with_writer(env, LogWriter::stdout())
}

/// Like [`new`], with an explicit output stream.
#[cfg_attr(not(test), allow(dead_code))]
pub fn new_with_writer(env: &str, writer: LogWriter) -> LogResult<Logger> {
    let env: EnvType = env.parse()?;
    Ok(for_env(env, writer))
}

/// Build the logger for `env`.
///
/// - `local`: colorized console, debug and up
/// - `dev`: JSON lines, info and up
/// - `testing`: everything discarded; `writer` is never written to
pub fn for_env(env: EnvType, writer: LogWriter) -> Logger {
    let handler: Arc<dyn Handler> = match env {
        EnvType::Local => Arc::new(PrettyHandler::new(Level::Debug, writer)),
        EnvType::Dev => Arc::new(JsonHandler::new(Level::Info, writer)),
        EnvType::Testing => Arc::new(JsonHandler::new(Level::Info, LogWriter::discard())),
    };
    Logger::new(handler)
}

/// Standard `error` attribute for logging a failure.
pub fn error(err: impl Display) -> Attr {
    Attr::new(ERROR_KEY, err.to_string())
}
