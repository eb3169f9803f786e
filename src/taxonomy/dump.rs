//! Taxdump file access
//!
//! NCBI `.dmp` files are tab-delimited with pipe separators: fields are
//! joined by `\t|\t` and every line ends with `\t|`. Files ending in `.gz`
//! are decompressed on the fly.
//!
//! @module taxonomy/dump

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{Result, TaxTreeError};

/// Field separator used by every `.dmp` file
pub const FIELD_SEPARATOR: &str = "\t|\t";

/// Line terminator preceding the newline
pub const LINE_TERMINATOR: &str = "\t|";

/// Open a dump file for buffered reading, gunzipping `.gz` paths
pub fn open_dump(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path).map_err(|source| TaxTreeError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Call `f` for every line of `reader`, without the trailing newline
///
/// A single buffer is reused across lines. Invalid UTF-8 is replaced with
/// U+FFFD so one bad byte only affects its own record. Read failures are
/// reported against `path`.
pub fn for_each_line<R, F>(mut reader: R, path: &Path, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| TaxTreeError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if n == 0 {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&buf);
        f(text.trim_end_matches(['\n', '\r']));
    }
}

/// Split a `.dmp` line into its fields
pub fn dmp_fields(line: &str) -> impl Iterator<Item = &str> {
    line.strip_suffix(LINE_TERMINATOR)
        .unwrap_or(line)
        .split(FIELD_SEPARATOR)
}
