//! Remote gateway contract
//!
//! The remote item store is reachable through four resource-oriented
//! primitives. Transport crates implement this trait; the engine never
//! sees HTTP.

use async_trait::async_trait;
use reclaim_api::{GatewayError, ItemRecord};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Minimal CRUD interface of the remote item store.
///
/// All payloads are [`ItemRecord`]s. Timeouts and retries are the
/// implementor's concern; the engine imposes none itself.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetch the complete remote snapshot.
    async fn list_all(&self) -> GatewayResult<Vec<ItemRecord>>;

    /// Create a record. The request carries no identifier; the response
    /// carries the server-assigned one.
    async fn create(&self, record: &ItemRecord) -> GatewayResult<ItemRecord>;

    /// Replace the record stored under `id`.
    async fn replace(&self, id: &str, record: &ItemRecord) -> GatewayResult<()>;

    /// Delete the record stored under `id`.
    async fn delete(&self, id: &str) -> GatewayResult<()>;
}
