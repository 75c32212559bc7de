//! Core engine for the reclaim lost/found client
//!
//! This crate keeps a local collection of lost/found items reconciled
//! against a remote record store reachable through a minimal CRUD
//! interface:
//!
//! - `ids` - mapping between server-assigned numeric identifiers and local
//!   universal identifiers
//! - `item` - the `Item` entity and its wire-record conversions
//! - `store` - the `LocalStore` contract plus in-memory and JSON-file
//!   implementations
//! - `gateway` - the `RemoteGateway` contract transport crates implement
//! - `sync` - `Reconciler`, the full pull/merge/prune cycle
//! - `mirror` - `MutationMirror`, local-first writes replayed remotely
//! - `error` - `SyncError` and `StoreError`

pub mod error;
pub mod gateway;
pub mod ids;
pub mod item;
pub mod mirror;
pub mod store;
pub mod sync;

pub use error::{MirrorOperation, StoreError, SyncError};
pub use gateway::RemoteGateway;
pub use item::{Item, ItemDraft};
pub use mirror::MutationMirror;
pub use store::{shared, JsonFileStore, LocalStore, MemoryStore, SharedStore};
pub use sync::{ReconcileStats, Reconciler};
