//! Persistence contract for link records

use crate::core::link::LinkRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Storage backend for link records
///
/// Implementations own id assignment and write serialization per record.
/// The store performs no validation; [`LinkManager`] does that before every
/// write.
///
/// [`LinkManager`]: crate::links::manager::LinkManager
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Store a new record and return it with its assigned id
    async fn insert(&self, record: LinkRecord) -> Result<LinkRecord>;

    /// Get a record by id
    async fn load(&self, id: u64) -> Result<Option<LinkRecord>>;

    /// Replace an existing record
    async fn update(&self, record: LinkRecord) -> Result<LinkRecord>;

    /// Delete a record; deleting an unknown id is not an error
    async fn delete(&self, id: u64) -> Result<()>;

    /// List all records ordered by id
    async fn list(&self) -> Result<Vec<LinkRecord>>;
}
