//! IRC client transport.
//!
//! [`Connection`] opens the socket (plain TCP or client TLS) and yields a
//! [`Transport`]. [`Transport::spawn`] splits the stream into a reader task
//! and a writer task joined to the caller by two line channels:
//!
//! ```ignore
//! use slirc_proto::transport::{Connection, Security};
//!
//! let transport = Connection::new("irc.libera.chat", 6697, Security::Tls)
//!     .connect()
//!     .await?;
//! let mut link = transport.spawn(slirc_proto::DEFAULT_IDLE_TIMEOUT);
//! link.outbound.send("NICK bot".to_string())?;
//! while let Some(line) = link.inbound.recv().await {
//!     println!("<- {line}");
//! }
//! // The reader dropped its sender; find out why.
//! let err = link.tasks.closed().await;
//! ```
//!
//! Both tasks stop on the first error. Nothing reconnects.

mod error;
mod link;
mod tls;

use std::time::Duration;

use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream as ClientTlsStream;
use tracing::{info, warn};

pub use error::ConnectionError;
pub use link::{run_reader, run_writer, Link, LinkTasks};

/// Idle period after which a silent server is treated as gone.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Whether the socket is wrapped in TLS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Security {
    /// Plain TCP.
    Plain,
    /// Client-side TLS verified against the system root store.
    Tls,
}

impl Security {
    /// `Tls` when `tls` is set.
    pub fn from_flag(tls: bool) -> Self {
        if tls {
            Self::Tls
        } else {
            Self::Plain
        }
    }
}

/// Connection parameters, identified by host, port and security mode.
#[derive(Clone, Debug)]
pub struct Connection {
    host: String,
    port: u16,
    security: Security,
    idle_timeout: Duration,
}

impl Connection {
    /// Describe a connection with the default idle timeout.
    pub fn new(host: impl Into<String>, port: u16, security: Security) -> Self {
        Self {
            host: host.into(),
            port,
            security,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Override the idle timeout enforced by the reader task.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Server host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Security mode.
    pub fn security(&self) -> Security {
        self.security
    }

    /// Idle timeout for the reader.
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Open the socket, wrapping it in TLS when configured.
    ///
    /// A single attempt; the caller owns any retry policy.
    pub async fn connect(&self) -> Result<Transport, ConnectionError> {
        info!(host = %self.host, port = self.port, tls = self.security == Security::Tls, "Connecting");

        let stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        if let Err(e) = enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }

        let transport = match self.security {
            Security::Plain => Transport::Tcp(stream),
            Security::Tls => {
                Transport::ClientTls(Box::new(tls::upgrade(stream, &self.host).await?))
            }
        };

        info!(host = %self.host, port = self.port, "Connected");
        Ok(transport)
    }
}

fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
    use socket2::{SockRef, TcpKeepalive};

    let sock = SockRef::from(stream);
    let keepalive = TcpKeepalive::new()
        .with_time(Duration::from_secs(120))
        .with_interval(Duration::from_secs(30));

    sock.set_tcp_keepalive(&keepalive)
}

/// An established connection, before it is split into tasks.
#[non_exhaustive]
pub enum Transport {
    /// Plain TCP transport.
    Tcp(TcpStream),
    /// Client-side TLS-encrypted transport.
    ClientTls(Box<ClientTlsStream<TcpStream>>),
}

impl Transport {
    /// Check if this transport uses TLS encryption.
    pub fn is_tls(&self) -> bool {
        matches!(self, Self::ClientTls(_))
    }

    /// Start the reader and writer tasks for this stream.
    pub fn spawn(self, idle_timeout: Duration) -> Link {
        match self {
            Self::Tcp(stream) => Link::spawn(stream, idle_timeout),
            Self::ClientTls(stream) => Link::spawn(*stream, idle_timeout),
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp(stream) => f.debug_tuple("Tcp").field(&stream.peer_addr().ok()).finish(),
            Self::ClientTls(stream) => f
                .debug_tuple("ClientTls")
                .field(&stream.get_ref().0.peer_addr().ok())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn test_security_from_flag() {
        assert_eq!(Security::from_flag(true), Security::Tls);
        assert_eq!(Security::from_flag(false), Security::Plain);
    }

    #[test]
    fn test_connection_accessors() {
        let conn = Connection::new("irc.example.net", 6697, Security::Tls)
            .with_idle_timeout(Duration::from_secs(5));
        assert_eq!(conn.host(), "irc.example.net");
        assert_eq!(conn.port(), 6697);
        assert_eq!(conn.security(), Security::Tls);
        assert_eq!(conn.idle_timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_connect_plain() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let accept = tokio::spawn(async move { listener.accept().await.unwrap() });
        let transport = Connection::new("127.0.0.1", port, Security::Plain)
            .connect()
            .await
            .unwrap();
        assert!(!transport.is_tls());
        accept.await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_refused() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let result = Connection::new("127.0.0.1", port, Security::Plain)
            .connect()
            .await;
        assert!(matches!(result, Err(ConnectionError::Io(_))));
    }
}
