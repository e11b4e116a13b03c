use crate::utils::error::StoreError;
use async_trait::async_trait;

/// Durable get/set of binary blobs under string keys
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Store several entries.
    ///
    /// The default writes them one after another, so a failure part-way
    /// leaves the earlier entries written. Backends that can commit all
    /// entries atomically override this.
    async fn set_many(&self, entries: &[(&str, &[u8])]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value).await?;
        }
        Ok(())
    }
}
