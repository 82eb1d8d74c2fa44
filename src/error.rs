use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Pipeline stage an [`Error`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Read,
    Parse,
    Convert,
    Write,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read input {path:?}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input {origin} is not valid UTF-8: {source}")]
    Decode {
        origin: String,
        #[source]
        source: Utf8Error,
    },
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
    #[error("markdown conversion failed: {0}")]
    Convert(String),
    #[error("failed to write output {path:?}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write markdown: {0}")]
    Sink(#[source] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::ReadInput { .. } | Error::Decode { .. } => Stage::Read,
            Error::Selector { .. } => Stage::Parse,
            Error::Convert(_) => Stage::Convert,
            Error::WriteOutput { .. } | Error::Sink(_) => Stage::Write,
            Error::Config(_) => Stage::Config,
        }
    }

    /// True when the input file does not exist.
    pub fn is_input_missing(&self) -> bool {
        matches!(
            self,
            Error::ReadInput { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
