use crate::providers::error::ProviderError;
use crate::store::error::StoreError;
use crate::types::destination::DestinationId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Destination '{0}' not found")]
    NotFound(DestinationId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to build the provider client")]
    ProviderClient(#[source] ProviderError),

    #[error("Failed to create data directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine data directory")]
    DataDirResolution,
}

/// Input rejected before any provider is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
