//! Gateway error type shared between the engine and transport
//! implementations.

use thiserror::Error;

/// Failure talking to the remote item store.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Transport-level failure (connection, timeout, TLS, ...).
    #[error("network error: {message}")]
    Network { message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The response body could not be parsed into the expected shape.
    #[error("decode error: {message}")]
    Decode { message: String },
}
