//! The account & resume store — single authority for accounts, resumes,
//! sessions, reset tokens, and audit entries over the key-value backend.
//!
//! Every collection is one JSON document under one storage key, so each
//! operation is a read-modify-write of a whole document. An internal mutex
//! serializes operations; without it, concurrent requests interleaving
//! their reads and writes would silently drop updates.

pub mod accounts;
pub mod audit;
pub mod ids;
pub mod resumes;
pub mod stats;

use std::sync::Arc;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::notify::Mailer;
use crate::storage::StorageBackend;

pub use resumes::ResumeFilter;

/// Handle to the store. Cheap to clone; clones share the backend, the
/// mailer, and the operation lock.
#[derive(Clone)]
pub struct Store {
    storage: Arc<dyn StorageBackend>,
    mailer: Arc<dyn Mailer>,
    /// Origin prepended to emailed verification/reset links.
    base_url: String,
    op_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(
        storage: Arc<dyn StorageBackend>,
        mailer: Arc<dyn Mailer>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            mailer,
            base_url: base_url.into(),
            op_lock: Arc::new(Mutex::new(())),
        }
    }

    // Public operations take `op_lock` once on entry; the helpers below
    // never lock, so they are safe to call while holding it.

    /// Reads and deserializes the document at `key`; `None` when absent.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.storage.get(key).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("corrupt record under key {key}"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serializes and replaces the document at `key` wholesale.
    async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let raw = serde_json::to_string(value).context("serializing storage record")?;
        self.storage.put(key, &raw).await?;
        Ok(())
    }
}
