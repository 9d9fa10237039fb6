//! Output streams for handlers.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A cloneable handle to one physical output stream.
///
/// Each record is written with a single `write_all` under the stream lock,
/// so records from concurrent handlers never interleave.
#[derive(Clone)]
pub struct LogWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl LogWriter {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// A stream that drops everything written to it.
    pub fn discard() -> Self {
        Self::new(io::sink())
    }

    /// Write one fully rendered record.
    pub fn write_record(&self, bytes: &[u8]) -> io::Result<()> {
        // Poisoning only means another writer panicked mid-record.
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(bytes)?;
        writer.flush()
    }
}

impl fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWriter").finish_non_exhaustive()
    }
}
