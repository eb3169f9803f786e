//! Indented outline writer
//!
//! Each entry is written as `<indent × depth><label>\n`. An empty indent
//! string collapses the tree into a flat list.
//!
//! @module output/outline

use std::io::Write;

use super::TreeSink;
use crate::error::Result;

/// Streams one line per entry
pub struct OutlineWriter<W: Write> {
    out: W,
    indent: String,
    line_buffered: bool,
}

impl<W: Write> OutlineWriter<W> {
    pub fn new(out: W, indent: &str, line_buffered: bool) -> Self {
        Self {
            out,
            indent: indent.to_string(),
            line_buffered,
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TreeSink for OutlineWriter<W> {
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn open_node(&mut self, depth: usize, label: &str) -> Result<()> {
        for _ in 0..depth {
            self.out.write_all(self.indent.as_bytes())?;
        }
        self.out.write_all(label.as_bytes())?;
        self.out.write_all(b"\n")?;
        if self.line_buffered {
            self.out.flush()?;
        }
        Ok(())
    }

    fn close_node(&mut self, _depth: usize) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
