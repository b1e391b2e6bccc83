//! Error types for the frame stream.

use std::net::AddrParseError;

use thiserror::Error;

/// Failures that keep the frame stream from running.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// `host:port` did not parse as a socket address.
    #[error("invalid bind address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    /// The listener could not bind.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The tokio runtime could not be created.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The server task stopped before it reported its address.
    #[error("server stopped during startup")]
    Startup,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`AdapterError`].
pub type Result<T> = std::result::Result<T, AdapterError>;
