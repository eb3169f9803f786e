//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

/// A small slice of the NCBI taxonomy around Homo
pub const NODES: &str = "\
1\t|\t1\t|\tno rank\t|\t\t|
9604\t|\t1\t|\tfamily\t|\t\t|
741158\t|\t9606\t|\tsubspecies\t|\t\t|
9605\t|\t9604\t|\tgenus\t|\t\t|
9606\t|\t9605\t|\tspecies\t|\t\t|
63221\t|\t9606\t|\tsubspecies\t|\t\t|
1425170\t|\t9605\t|\tspecies\t|\t\t|
9598\t|\t9596\t|\tspecies\t|\t\t|
9596\t|\t9604\t|\tgenus\t|\t\t|
not a record
";

pub const NAMES: &str = "\
1\t|\troot\t|\t\t|\tscientific name\t|
9604\t|\tHominidae\t|\t\t|\tscientific name\t|
9605\t|\tHomo\t|\t\t|\tscientific name\t|
9606\t|\tHomo sapiens\t|\t\t|\tscientific name\t|
9606\t|\thuman\t|\t\t|\tgenbank common name\t|
63221\t|\tHomo sapiens neanderthalensis\t|\t\t|\tscientific name\t|
741158\t|\tHomo sapiens subsp. 'Denisova'\t|\t\t|\tscientific name\t|
1425170\t|\tHomo heidelbergensis\t|\t\t|\tscientific name\t|
9596\t|\tPan\t|\t\t|\tscientific name\t|
9598\t|\tPan troglodytes\t|\t\t|\tscientific name\t|
";

pub const DELNODES: &str = "3418112\t|\n";

pub const MERGED: &str = "1335626\t|\t9606\t|\n";

/// Taxdump directory holding the fixture files
pub struct Taxdump {
    pub dir: TempDir,
}

impl Taxdump {
    pub fn new() -> Self {
        Self::with_suffix("")
    }

    /// Write every dump gzip-compressed with a `.gz` suffix
    pub fn gzipped() -> Self {
        Self::with_suffix(".gz")
    }

    fn with_suffix(suffix: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in [
            ("nodes.dmp", NODES),
            ("names.dmp", NAMES),
            ("delnodes.dmp", DELNODES),
            ("merged.dmp", MERGED),
        ] {
            let path = dir.path().join(format!("{}{}", name, suffix));
            if suffix.is_empty() {
                std::fs::write(&path, content).unwrap();
            } else {
                let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::fast());
                encoder.write_all(content.as_bytes()).unwrap();
                encoder.finish().unwrap();
            }
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for an output file inside the fixture directory
    pub fn out_file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
