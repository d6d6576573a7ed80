//! In-memory ring buffer for log output.
//!
//! While the desktop owns the alternate screen, anything written to stderr
//! would corrupt the display. The tracing subscriber writes here instead and
//! the menu bar shows the most recent line.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

pub const DEFAULT_MAX_LINES: usize = 500;

static GLOBAL_LOG: OnceLock<LogHandle> = OnceLock::new();

pub fn set_global_log(handle: LogHandle) -> bool {
    GLOBAL_LOG.set(handle).is_ok()
}

pub fn global_log() -> Option<LogHandle> {
    GLOBAL_LOG.get().cloned()
}

#[derive(Debug)]
struct LogBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
}

impl LogBuffer {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
        }
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }
}

#[derive(Clone, Debug)]
pub struct LogHandle {
    inner: Arc<Mutex<LogBuffer>>,
}

impl Default for LogHandle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl LogHandle {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogBuffer::new(max_lines))),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push_line(line.into());
        }
    }

    pub fn last_line(&self) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|buffer| buffer.lines.back().cloned())
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|buffer| buffer.lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn writer(&self) -> LogWriter {
        LogWriter::new(self.clone())
    }
}

/// `io::Write` adapter that splits output into lines. A trailing partial
/// line is held back until a newline arrives or the writer is flushed.
#[derive(Debug)]
pub struct LogWriter {
    handle: LogHandle,
    pending: Vec<u8>,
}

impl LogWriter {
    pub fn new(handle: LogHandle) -> Self {
        Self {
            handle,
            pending: Vec::new(),
        }
    }

    fn push_text(&self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        for line in text.split('\n') {
            if !line.is_empty() {
                self.handle.push(line.to_string());
            }
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        if let Some(pos) = self.pending.iter().rposition(|b| *b == b'\n') {
            let complete: Vec<u8> = self.pending.drain(..=pos).collect();
            self.push_text(&complete);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.push_text(&rest);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_capped() {
        let handle = LogHandle::new(3);
        for line in ["one", "two", "three", "four"] {
            handle.push(line);
        }
        assert_eq!(handle.lines(), vec!["two", "three", "four"]);
        assert_eq!(handle.last_line().as_deref(), Some("four"));
    }

    #[test]
    fn writer_splits_lines_and_flushes_partial() {
        let handle = LogHandle::new(10);
        let mut writer = handle.writer();
        writer.write_all(b"first line\nsecond").unwrap();
        assert_eq!(handle.lines(), vec!["first line"]);
        writer.write_all(b" half\n").unwrap();
        writer.write_all(b"partial").unwrap();
        drop(writer);
        assert_eq!(
            handle.lines(),
            vec!["first line", "second half", "partial"]
        );
    }
}
