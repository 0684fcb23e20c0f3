//! Transport error types.

use std::time::Duration;

use thiserror::Error;

use crate::error::ProtocolError;

/// Socket or TLS failure at connect, read or write time.
///
/// Every variant is fatal to the link.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConnectionError {
    /// An I/O error occurred (refused, DNS failure, reset, TLS handshake).
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The host is not usable as a TLS server name.
    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    /// The peer closed the connection.
    #[error("connection closed by peer")]
    Closed,

    /// Nothing arrived within the idle timeout.
    #[error("no data received for {0:?}")]
    IdleTimeout(Duration),

    /// The inbound stream violated framing limits.
    #[error("transport protocol error: {0}")]
    Protocol(ProtocolError),
}

impl From<ProtocolError> for ConnectionError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Io(e) => Self::Io(e),
            other => Self::Protocol(other),
        }
    }
}
