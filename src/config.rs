use crate::cli::GlobalArgs;
use crate::error::{Result, TaxTreeError};
use directories::BaseDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "TAXTREE_DB";
/// Environment variable holding the log filter
pub const LOG_ENV: &str = "TAXTREE_LOG";
/// Data directory name under the user's home
pub const DEFAULT_DATA_DIR: &str = ".taxonkit";
pub const DEFAULT_THREADS: usize = 4;
/// Output path meaning "write to stdout"
pub const STDOUT: &str = "-";

pub const NODES_FILE: &str = "nodes.dmp";
pub const NAMES_FILE: &str = "names.dmp";
pub const DELNODES_FILE: &str = "delnodes.dmp";
pub const MERGED_FILE: &str = "merged.dmp";

/// Per-invocation settings shared by the loaders and the printer
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub threads: usize,
    pub out_file: String,
    pub line_buffered: bool,
}

impl Config {
    /// Build a config from the global command-line options
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let data_dir = Self::data_dir(args.data_dir.as_deref())?;
        if !data_dir.is_dir() {
            return Err(TaxTreeError::DataDirNotFound(data_dir));
        }
        Ok(Self {
            data_dir,
            threads: args.threads.max(1),
            out_file: args.out_file.clone(),
            line_buffered: args.line_buffered,
        })
    }

    /// Config reading dumps from `data_dir` and writing to stdout
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            threads: DEFAULT_THREADS,
            out_file: STDOUT.to_string(),
            line_buffered: false,
        }
    }

    /// Resolve the data directory: explicit flag, then `TAXTREE_DB`, then `~/.taxonkit`
    pub fn data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
        resolve_data_dir(explicit, std::env::var_os(DATA_DIR_ENV))
    }

    pub fn nodes_file(&self) -> PathBuf {
        self.dump_file(NODES_FILE)
    }

    pub fn names_file(&self) -> PathBuf {
        self.dump_file(NAMES_FILE)
    }

    pub fn delnodes_file(&self) -> PathBuf {
        self.dump_file(DELNODES_FILE)
    }

    pub fn merged_file(&self) -> PathBuf {
        self.dump_file(MERGED_FILE)
    }

    /// Path of a dump file, falling back to `<name>.gz` when only that exists
    fn dump_file(&self, name: &str) -> PathBuf {
        let plain = self.data_dir.join(name);
        if !plain.exists() {
            let gzip = self.data_dir.join(format!("{}.gz", name));
            if gzip.exists() {
                return gzip;
            }
        }
        plain
    }
}

fn resolve_data_dir(explicit: Option<&Path>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DEFAULT_DATA_DIR))
        .ok_or(TaxTreeError::NoHomeDir)
}
