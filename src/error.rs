use std::path::PathBuf;

use thiserror::Error;

/// Content that could not be turned into an entry or a list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not decode {input:?}: {reason}")]
pub struct DecodeError {
    pub input: String,
    pub reason: String,
}

impl DecodeError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("unknown difficulty {0:?}")]
    UnknownDifficulty(String),

    #[error("store has no default highscore file")]
    NoDefaultFile,

    #[error("{0:?} cannot be used as the default highscore file name")]
    InvalidDefaultFile(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
