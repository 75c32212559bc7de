//! Shared API types for reclaim
//!
//! This crate holds the types exchanged with the remote item store:
//!
//! - `record` - `ItemRecord` wire representation and `ItemStatus`
//! - `error` - `GatewayError` for transport/decode failures

pub mod error;
pub mod record;

pub use error::GatewayError;
pub use record::{ItemRecord, ItemStatus};
