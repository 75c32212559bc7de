//! HTTP transport for the reclaim engine
//!
//! - `client` - `ItemsClient`, the reqwest implementation of
//!   `RemoteGateway`, plus `RemoteConfig`
//! - `fake` - `FakeRemote`, an in-memory gateway with server-style id
//!   assignment, for tests and offline use

pub mod client;
pub mod fake;

#[cfg(test)]
mod sync_flow_test;

pub use client::{ItemsClient, RemoteConfig};
pub use fake::FakeRemote;
