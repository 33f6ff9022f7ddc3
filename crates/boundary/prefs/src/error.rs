use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("I/O error on preferences file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type PrefsResult<T> = Result<T, PrefsError>;
