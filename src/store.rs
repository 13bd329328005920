//! Whole-collection persistence in a single JSON file.
//!
//! Every write rewrites the full array. There is no arbitration between
//! writers: two load/modify/save cycles that overlap lose one of the writes.
//! Inside the service the store is owned by one [`ResourceActor`], which runs
//! the cycles one at a time.
//!
//! [`ResourceActor`]: crate::actor_framework::ResourceActor

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::Order;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write store file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type OrderStore = JsonFileStore<Order>;

#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file holding an empty collection if it does not exist yet.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn ensure_initialized(&self) -> Result<(), StoreError> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!("Store already initialized");
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }
        self.save_all(&[]).await?;
        info!("Initialized empty store");
        Ok(())
    }

    /// Returns the persisted collection.
    ///
    /// A missing file yields an empty collection. So does an unreadable or
    /// corrupt one; a corrupt file is copied aside first so the next save does
    /// not destroy the only copy of the old records.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load_all(&self) -> Vec<T> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Store file missing, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Store file unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Store file corrupt, treating as empty");
                self.quarantine().await;
                Vec::new()
            }
        }
    }

    /// Replaces the persisted collection.
    ///
    /// The new contents are written to a sibling file and renamed over the
    /// old one, so readers see either the previous or the new collection.
    #[instrument(skip(self, records), fields(path = %self.path.display(), records = records.len()))]
    pub async fn save_all(&self, records: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let staging = self.sibling("tmp");
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|source| self.write_error(source))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|source| self.write_error(source))?;
        debug!("Store saved");
        Ok(())
    }

    async fn quarantine(&self) {
        let millis = chrono::Utc::now().timestamp_millis();
        let backup = self.sibling(&format!("corrupt-{millis}"));
        match tokio::fs::copy(&self.path, &backup).await {
            Ok(_) => warn!(backup = %backup.display(), "Corrupt store copied aside"),
            Err(e) => error!(error = %e, "Failed to copy corrupt store aside"),
        }
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
