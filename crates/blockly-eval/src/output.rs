//! Output sinks for the text-print block.
//!
//! A run writes whole lines only. Output destinations:
//! - [`StdoutSink`]: process stdout
//! - [`BufferSink`]: in-memory capture for tests and embedding hosts
//! - [`WriterSink`]: any `io::Write`

use std::io::Write;

/// Destination for printed lines.
pub trait OutputSink {
    /// Emit one line of text. The sink supplies the line terminator.
    fn write_line(&mut self, line: &str);
}

/// Writes to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Captures lines in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Captured output as text, one `\n` after every line.
    pub fn output(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl OutputSink for BufferSink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Adapts an `io::Write`. Write errors are logged and otherwise dropped.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.writer, "{line}") {
            tracing::warn!(error = %err, "failed to write output line");
        }
    }
}
