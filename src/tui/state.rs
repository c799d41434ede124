//! Log buffering for the TUI.
//!
//! Tracing output is captured here instead of stdout so it cannot corrupt
//! the alternate screen. The status bar shows the newest line.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// In-memory log buffer for the TUI.
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl LogBuffer {
    /// Create a new log buffer with a fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Push a line into the buffer.
    pub fn push_line(&self, line: String) {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        lines.push_back(line);
        while lines.len() > self.capacity {
            lines.pop_front();
        }
    }

    /// Get the most recent lines, up to limit.
    pub fn recent(&self, limit: usize) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        let start = lines.len().saturating_sub(limit);
        lines.iter().skip(start).cloned().collect()
    }

    /// Newest line, if any.
    pub fn latest(&self) -> Option<String> {
        let lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        lines.back().cloned()
    }
}

/// Writer that buffers log lines for the TUI.
pub struct LogWriter {
    buffer: Arc<LogBuffer>,
    line: Vec<u8>,
}

impl LogWriter {
    fn flush_line(&mut self) {
        if !self.line.is_empty() {
            let line = String::from_utf8_lossy(&self.line).trim_end().to_string();
            self.buffer.push_line(line);
            self.line.clear();
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &b in buf {
            if b == b'\n' {
                self.flush_line();
            } else {
                self.line.push(b);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_line();
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        self.flush_line();
    }
}

/// MakeWriter for tracing subscriber that writes into LogBuffer.
pub struct LogMakeWriter {
    buffer: Arc<LogBuffer>,
}

impl LogMakeWriter {
    /// Create a new writer factory for the given buffer.
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }
}

impl<'a> MakeWriter<'a> for LogMakeWriter {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            line: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_keeps_newest() {
        let buffer = LogBuffer::new(2);
        buffer.push_line("a".into());
        buffer.push_line("b".into());
        buffer.push_line("c".into());

        assert_eq!(buffer.recent(10), vec!["b", "c"]);
        assert_eq!(buffer.latest().as_deref(), Some("c"));
    }

    #[test]
    fn test_writer_splits_lines() {
        let buffer = Arc::new(LogBuffer::new(10));
        let make = LogMakeWriter::new(buffer.clone());
        {
            let mut writer = make.make_writer();
            writer.write_all(b"first\nsecond").unwrap();
        }

        assert_eq!(buffer.recent(10), vec!["first", "second"]);
    }
}
