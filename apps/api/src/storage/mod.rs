// Keyed blob storage behind the store. Every collection is one serialized
// JSON document under a well-known key; writes replace the whole value.

pub mod file;
pub mod memory;
pub mod redis;

use anyhow::Result;
use async_trait::async_trait;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use redis::RedisStorage;

/// Well-known keys for the persisted collections. All share the `rmp_`
/// application prefix so they stay grouped on a shared Redis instance.
pub mod keys {
    pub const USERS: &str = "rmp_users";
    pub const RESUMES: &str = "rmp_resumes";
    pub const LOGS: &str = "rmp_logs";
    pub const SESSION: &str = "rmp_session";
    pub const RESET_TOKENS: &str = "rmp_reset_tokens";
}

/// A key-value backend the store reads and writes through. Implementations
/// only move opaque strings; all (de)serialization happens above them.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Returns the value at `key`, or `None` if the key has never been
    /// written or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value at `key` wholesale.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
