//! One JSON document per destination under a data directory: `<root>/<destination>/climate.json`.
//!
//! A destination exists once its directory does. Documents are written to a temporary file
//! in the same directory and renamed into place, so readers never observe a partial write.

use crate::store::error::StoreError;
use crate::store::ProfileStore;
use crate::types::destination::DestinationId;
use crate::types::profile::StoredClimate;
use crate::utils::ensure_dir_exists;
use async_trait::async_trait;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

const DOCUMENT_NAME: &str = "climate.json";

#[derive(Debug, Clone)]
pub struct FileProfileStore {
    root: PathBuf,
}

impl FileProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the destination's directory, making it resolvable.
    pub async fn register_destination(
        &self,
        destination: &DestinationId,
    ) -> Result<(), StoreError> {
        let dir = self.destination_dir(destination)?;
        ensure_dir_exists(&dir)
            .await
            .map_err(|e| StoreError::DirCreation(dir, e))
    }

    fn destination_dir(&self, destination: &DestinationId) -> Result<PathBuf, StoreError> {
        let id = destination.as_str();
        if id == "." || id == ".." || id.contains(['/', '\\']) {
            return Err(StoreError::InvalidKey(id.to_string()));
        }
        Ok(self.root.join(id))
    }

    fn document_path(&self, destination: &DestinationId) -> Result<PathBuf, StoreError> {
        Ok(self.destination_dir(destination)?.join(DOCUMENT_NAME))
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn resolve(&self, destination: &DestinationId) -> Result<bool, StoreError> {
        let dir = self.destination_dir(destination)?;
        match fs::metadata(&dir).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Read(dir, e)),
        }
    }

    async fn upsert(&self, record: &StoredClimate) -> Result<(), StoreError> {
        let dir = self.destination_dir(&record.destination)?;
        ensure_dir_exists(&dir)
            .await
            .map_err(|e| StoreError::DirCreation(dir.clone(), e))?;
        let bytes = serde_json::to_vec_pretty(record).map_err(StoreError::Encode)?;
        let path = dir.join(DOCUMENT_NAME);

        task::spawn_blocking(move || write_atomically(&dir, &path, &bytes)).await??;
        Ok(())
    }

    async fn get(&self, destination: &DestinationId) -> Result<Option<StoredClimate>, StoreError> {
        let path = self.document_path(destination)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Read(path, e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Decode(path, e))
    }
}

fn write_atomically(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let write_err = |e| StoreError::Write(path.to_path_buf(), e);
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
