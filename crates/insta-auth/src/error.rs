use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read secret file '{}': {source}", path.display())]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse secret file '{}': {source}", path.display())]
    SecretDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Refusing to cache an empty authorization code")]
    EmptyCode,
    #[error("Failed to write code file '{}': {source}", path.display())]
    CodeWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read code from console: {0}")]
    Console(#[source] std::io::Error),
    #[error("Failed to write code to output: {0}")]
    Output(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
