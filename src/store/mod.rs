//! Persistence of climate profiles, keyed by destination.

pub mod error;
pub mod file;
pub mod memory;

use crate::store::error::StoreError;
use crate::types::destination::DestinationId;
use crate::types::profile::StoredClimate;
use async_trait::async_trait;

/// Storage collaborator for climate profiles.
///
/// `upsert` replaces any previous record for the destination wholesale; concurrent writers
/// for the same destination are last-write-wins.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Whether the destination exists and may receive a profile.
    async fn resolve(&self, destination: &DestinationId) -> Result<bool, StoreError>;

    async fn upsert(&self, record: &StoredClimate) -> Result<(), StoreError>;

    async fn get(&self, destination: &DestinationId) -> Result<Option<StoredClimate>, StoreError>;
}
