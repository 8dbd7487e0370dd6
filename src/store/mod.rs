//! Session-scoped key/value storage.
//!
//! Every visitor session owns one [`KvStore`]. The article cache and the
//! navigation state are both thin typed layers over it.

pub mod error;
pub mod file;
pub mod memory;
pub mod registry;

use async_trait::async_trait;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use registry::{SessionRegistry, StoreBackend, DEFAULT_MAX_SESSIONS};

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read and delete in one step.
    async fn take(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn len(&self) -> Result<usize, StoreError>;
}
