//! Output writers for taxonomy subtrees
//!
//! Provides two streaming formats driven by the same traversal:
//! - Outline: one indented line per taxon
//! - JSON: one nested object for the whole invocation
//!
//! @module output

pub mod json;
pub mod outline;

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::config::STDOUT;
use crate::error::{Result, TaxTreeError};

// =============================================================================
// TYPES
// =============================================================================

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented outline, one entry per line
    #[default]
    Outline,
    /// Nested JSON object keyed by entry label
    Json,
}

// =============================================================================
// SINK TRAIT
// =============================================================================

/// Receives traversal events in depth-first order
///
/// Every `open_node` is matched by a `close_node` at the same depth once all
/// of the node's descendants have been opened and closed. Roots are opened at
/// depth 0.
pub trait TreeSink {
    /// Called once before the first root
    fn begin(&mut self) -> Result<()>;

    /// An entry starts at `depth`
    fn open_node(&mut self, depth: usize, label: &str) -> Result<()>;

    /// The entry opened at `depth` has no more children
    fn close_node(&mut self, depth: usize) -> Result<()>;

    /// Called once after the last root
    fn finish(&mut self) -> Result<()>;
}

// =============================================================================
// FACTORY FUNCTION
// =============================================================================

/// Create a sink for the given output format
pub fn create_sink<'a, W: Write + 'a>(
    format: OutputFormat,
    out: W,
    indent: &str,
    line_buffered: bool,
) -> Box<dyn TreeSink + 'a> {
    match format {
        OutputFormat::Outline => Box::new(OutlineWriter::new(out, indent, line_buffered)),
        OutputFormat::Json => Box::new(JsonWriter::new(out, indent, line_buffered)),
    }
}

pub use json::JsonWriter;
pub use outline::OutlineWriter;

// =============================================================================
// OUTPUT STREAM
// =============================================================================

/// Destination of the printed trees
pub enum Output {
    Stdout(BufWriter<Stdout>),
    File(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Output {
    /// Open `path` for writing; `-` is stdout and a `.gz` suffix compresses
    pub fn open(path: &str) -> Result<Self> {
        if path == STDOUT {
            return Ok(Output::Stdout(BufWriter::new(io::stdout())));
        }

        let file = File::create(path).map_err(|source| TaxTreeError::Output {
            path: path.into(),
            source,
        })?;
        let writer = BufWriter::new(file);

        let gzip = Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
        if gzip {
            Ok(Output::Gzip(GzEncoder::new(writer, Compression::default())))
        } else {
            Ok(Output::File(writer))
        }
    }

    /// Flush everything and write the gzip trailer if needed
    pub fn finish(self) -> Result<()> {
        match self {
            Output::Stdout(mut w) => w.flush()?,
            Output::File(mut w) => w.flush()?,
            Output::Gzip(w) => w.finish()?.flush()?,
        }
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::File(w) => w.write(buf),
            Output::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::File(w) => w.flush(),
            Output::Gzip(w) => w.flush(),
        }
    }
}

/// Writer double recording what had been written at every flush
#[cfg(test)]
pub(crate) struct FlushRecorder {
    pub data: Vec<u8>,
    pub flushed_at: Vec<usize>,
}

#[cfg(test)]
impl FlushRecorder {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            flushed_at: Vec::new(),
        }
    }

    /// Every flush happened right after a complete line
    pub fn flushed_on_line_ends(&self) -> bool {
        self.flushed_at
            .iter()
            .all(|&len| len > 0 && self.data[len - 1] == b'\n')
    }
}

#[cfg(test)]
impl Write for FlushRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed_at.push(self.data.len());
        Ok(())
    }
}
