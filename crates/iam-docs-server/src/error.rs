//! Server error types.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors raised while starting or running the docs server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured listen address is not a socket address.
    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        /// The configured address.
        addr: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Binding the listener failed.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error during server operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The viewer configuration is invalid.
    #[error(transparent)]
    Config(#[from] iam_docs_config::ConfigError),
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
