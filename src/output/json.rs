//! Nested JSON writer
//!
//! The whole invocation is one object keyed by root entry labels. Each
//! entry's value is an object of its children, `{}` for leaves:
//!
//! ```text
//! {
//!   "9606": {
//!     "63221": {},
//!     "741158": {}
//!   }
//! }
//! ```
//!
//! Output is streamed. Each open level counts the children it has emitted;
//! the separator (`\n` or `,\n`) is written when the next child opens, and
//! the line break after the last child is written by the enclosing close.
//!
//! @module output/json

use std::io::Write;

use super::TreeSink;
use crate::error::Result;

/// Streams a single nested JSON object
pub struct JsonWriter<W: Write> {
    out: W,
    indent: String,
    line_buffered: bool,
    /// Children emitted so far, one counter per open level (outermost first)
    levels: Vec<usize>,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W, indent: &str, line_buffered: bool) -> Self {
        Self {
            out,
            indent: indent.to_string(),
            line_buffered,
            levels: Vec::new(),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn end_line(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        if self.line_buffered {
            self.out.flush()?;
        }
        Ok(())
    }

    fn write_indent(&mut self, depth: usize) -> Result<()> {
        for _ in 0..depth {
            self.out.write_all(self.indent.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: Write> TreeSink for JsonWriter<W> {
    fn begin(&mut self) -> Result<()> {
        self.out.write_all(b"{")?;
        self.levels.push(0);
        Ok(())
    }

    fn open_node(&mut self, depth: usize, label: &str) -> Result<()> {
        let emitted = self.levels.last_mut().map(|count| {
            *count += 1;
            *count - 1
        });
        if emitted.unwrap_or(0) > 0 {
            self.out.write_all(b",")?;
        }
        self.end_line()?;

        self.write_indent(depth + 1)?;
        serde_json::to_writer(&mut self.out, label)?;
        self.out.write_all(b": {")?;
        self.levels.push(0);
        Ok(())
    }

    fn close_node(&mut self, depth: usize) -> Result<()> {
        let emitted = self.levels.pop().unwrap_or(0);
        if emitted > 0 {
            self.end_line()?;
            self.write_indent(depth + 1)?;
        }
        self.out.write_all(b"}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let emitted = self.levels.pop().unwrap_or(0);
        if emitted > 0 {
            self.end_line()?;
        }
        self.out.write_all(b"}")?;
        self.end_line()?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::FlushRecorder;

    enum Event<'a> {
        Open(usize, &'a str),
        Close(usize),
    }
    use Event::{Close, Open};

    fn render(indent: &str, events: &[Event<'_>]) -> String {
        let mut writer = JsonWriter::new(Vec::new(), indent, false);
        writer.begin().unwrap();
        for event in events {
            match *event {
                Open(depth, label) => writer.open_node(depth, label).unwrap(),
                Close(depth) => writer.close_node(depth).unwrap(),
            }
        }
        writer.finish().unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_nested_entries() {
        let text = render(
            "  ",
            &[
                Open(0, "9606"),
                Open(1, "63221"),
                Close(1),
                Open(1, "741158"),
                Close(1),
                Close(0),
            ],
        );
        assert_eq!(
            text,
            "{\n  \"9606\": {\n    \"63221\": {},\n    \"741158\": {}\n  }\n}\n"
        );
    }

    #[test]
    fn test_leaf_root() {
        let text = render("  ", &[Open(0, "12"), Close(0)]);
        assert_eq!(text, "{\n  \"12\": {}\n}\n");
    }

    #[test]
    fn test_commas_between_roots_only() {
        let text = render(
            "",
            &[
                Open(0, "1"),
                Open(1, "2"),
                Close(1),
                Close(0),
                Open(0, "3"),
                Close(0),
            ],
        );
        assert_eq!(text, "{\n\"1\": {\n\"2\": {}\n},\n\"3\": {}\n}\n");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["1"]["2"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_deep_nesting_closes_every_level() {
        let text = render(
            " ",
            &[
                Open(0, "a"),
                Open(1, "b"),
                Open(2, "c"),
                Close(2),
                Close(1),
                Open(1, "d"),
                Close(1),
                Close(0),
            ],
        );
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["a"]["b"]["c"].as_object().unwrap().is_empty());
        assert!(value["a"]["d"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_labels_are_escaped() {
        let text = render("  ", &[Open(0, "1 [no rank] \"quoted\" name"), Close(0)]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("1 [no rank] \"quoted\" name").is_some());
    }

    #[test]
    fn test_line_buffered_flushes_every_line() {
        let mut writer = JsonWriter::new(FlushRecorder::new(), "  ", true);
        writer.begin().unwrap();
        writer.open_node(0, "9606").unwrap();
        writer.open_node(1, "63221").unwrap();
        writer.close_node(1).unwrap();
        writer.close_node(0).unwrap();
        // "{", "  \"9606\": {", "    \"63221\": {}"
        assert_eq!(writer.out.flushed_at.len(), 3);
        assert!(writer.out.flushed_on_line_ends());

        writer.finish().unwrap();
        let out = writer.into_inner();
        assert_eq!(
            String::from_utf8(out.data.clone()).unwrap(),
            "{\n  \"9606\": {\n    \"63221\": {}\n  }\n}\n"
        );
        // two more line ends plus the final flush
        assert_eq!(out.flushed_at.len(), 6);
        assert!(out.flushed_on_line_ends());
    }

    #[test]
    fn test_block_buffered_flushes_only_on_finish() {
        let mut writer = JsonWriter::new(FlushRecorder::new(), "  ", false);
        writer.begin().unwrap();
        writer.open_node(0, "9606").unwrap();
        writer.close_node(0).unwrap();
        assert!(writer.out.flushed_at.is_empty());

        writer.finish().unwrap();
        assert_eq!(writer.into_inner().flushed_at.len(), 1);
    }

    #[test]
    fn test_empty_invocation() {
        assert_eq!(render("  ", &[]), "{}\n");
    }
}
