use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read climate document '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write climate document '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to create destination directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode climate document")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode climate document '{0}'")]
    Decode(PathBuf, #[source] serde_json::Error),

    #[error("Destination id '{0}' cannot be used as a storage key")]
    InvalidKey(String),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
