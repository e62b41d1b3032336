// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Malformed rows and rejected entries are not errors;
/// they are counted in the run summaries instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no {what} found in {}", dir.display())]
    InputNotFound { what: &'static str, dir: PathBuf },

    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
