//! Test helpers for capturing handler output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::logging::LogWriter;

/// In-memory stream; clones share the same bytes.
#[derive(Clone, Default)]
pub struct Capture {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    pub fn writer(&self) -> LogWriter {
        LogWriter::new(self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().unwrap().is_empty()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Remove ANSI color sequences (`ESC [ ... m`).
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// One rendered console record: the header line and its attribute block.
#[derive(Debug)]
pub struct ConsoleBlock {
    pub header: String,
    pub attrs: serde_json::Map<String, serde_json::Value>,
}

/// Split colorized console output into blocks.
///
/// Panics if the output is not a clean sequence of header + JSON blocks.
pub fn console_blocks(output: &str) -> Vec<ConsoleBlock> {
    let plain = strip_ansi(output);
    let mut lines = plain.lines();
    let mut blocks = Vec::new();
    while let Some(header) = lines.next() {
        let mut json = String::new();
        for line in lines.by_ref() {
            json.push_str(line);
            json.push('\n');
            if line == "}" || line == "{}" {
                break;
            }
        }
        let attrs = serde_json::from_str(&json)
            .unwrap_or_else(|e| panic!("malformed block after {header:?}: {e}\n{json}"));
        blocks.push(ConsoleBlock {
            header: header.to_string(),
            attrs,
        });
    }
    blocks
}
