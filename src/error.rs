use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaxTreeError>;

#[derive(Error, Debug)]
pub enum TaxTreeError {
    #[error("Taxonomy data directory not found: {}", .0.display())]
    DataDirNotFound(PathBuf),

    #[error("No home directory found (set TAXTREE_DB or pass --data-dir)")]
    NoHomeDir,

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create output {}: {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaxTreeError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TaxTreeError::DataDirNotFound(_) | TaxTreeError::NoHomeDir => 2,
            TaxTreeError::Open { .. }
            | TaxTreeError::Read { .. }
            | TaxTreeError::Output { .. }
            | TaxTreeError::Io(_) => 3,
            TaxTreeError::ThreadPool(_) | TaxTreeError::Json(_) => 1,
        }
    }
}
