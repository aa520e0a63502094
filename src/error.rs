use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// input file missing or unreadable
    #[error("cannot read {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// input file holds fewer samples than asked for
    #[error("{path} holds {found} samples, expected {expected}")]
    SizeMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// output file could not be created or written
    #[error("cannot write {path}: {source}")]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bad wav file {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("plot failed: {0}")]
    Plot(String),
}
