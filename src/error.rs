use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not allocate a buffer of {samples} samples")]
    Allocation { samples: usize },

    #[error("Audio too long for a WAV file: {samples} samples")]
    TooLong { samples: usize },

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
