//! Reader and writer tasks.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, trace};

use super::ConnectionError;
use crate::line::LineCodec;

/// A running connection: two channels and the tasks feeding them.
///
/// Lines pushed on `outbound` are sanitized and written in order. Lines
/// read from the socket arrive on `inbound` in arrival order. When the
/// reader stops, `inbound` yields `None` and [`LinkTasks::closed`] reports
/// the cause.
#[derive(Debug)]
pub struct Link {
    /// Complete inbound lines, terminator stripped.
    pub inbound: mpsc::UnboundedReceiver<String>,
    /// Outbound lines, terminator added by the writer.
    pub outbound: mpsc::UnboundedSender<String>,
    /// The reader and writer tasks.
    pub tasks: LinkTasks,
}

impl Link {
    /// Split `stream` and spawn its reader and writer tasks.
    pub fn spawn<S>(stream: S, idle_timeout: Duration) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (read_half, write_half) = tokio::io::split(stream);
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        let mut tasks = JoinSet::new();
        tasks.spawn(run_reader(read_half, inbound_tx, idle_timeout));
        tasks.spawn(run_writer(write_half, outbound_rx));

        Self {
            inbound: inbound_rx,
            outbound: outbound_tx,
            tasks: LinkTasks { tasks },
        }
    }
}

/// Handle on the reader and writer tasks. Dropping it aborts both.
#[derive(Debug)]
pub struct LinkTasks {
    tasks: JoinSet<Result<(), ConnectionError>>,
}

impl LinkTasks {
    /// Wait for the first task failure.
    ///
    /// Tasks that finish cleanly (their channel peer went away) are skipped;
    /// once none remain the link counts as [`ConnectionError::Closed`].
    /// Cancel-safe.
    pub async fn closed(&mut self) -> ConnectionError {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => return e,
                Err(e) => return ConnectionError::Io(std::io::Error::other(e)),
            }
        }
        ConnectionError::Closed
    }

    /// Abort both tasks.
    pub fn shutdown(&mut self) {
        self.tasks.abort_all();
    }
}

/// Receive loop: frame the byte stream into lines and forward them in order.
///
/// Returns `Ok(())` only when the receiving side of `inbound` is gone.
pub async fn run_reader<R>(
    reader: R,
    inbound: mpsc::UnboundedSender<String>,
    idle_timeout: Duration,
) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin,
{
    let mut framed = FramedRead::new(reader, LineCodec::new());
    loop {
        let line = match timeout(idle_timeout, framed.next()).await {
            Err(_) => return Err(ConnectionError::IdleTimeout(idle_timeout)),
            Ok(None) => return Err(ConnectionError::Closed),
            Ok(Some(Err(e))) => return Err(e.into()),
            Ok(Some(Ok(line))) => line,
        };

        trace!(line = %line, "<-");
        if inbound.send(line).is_err() {
            debug!("inbound channel closed, reader exiting");
            return Ok(());
        }
    }
}

/// Send loop: write each queued line in full before taking the next.
///
/// Returns `Ok(())` once every sender of `outbound` is gone.
pub async fn run_writer<W>(
    writer: W,
    mut outbound: mpsc::UnboundedReceiver<String>,
) -> Result<(), ConnectionError>
where
    W: AsyncWrite + Unpin,
{
    let mut framed = FramedWrite::new(writer, LineCodec::new());
    while let Some(line) = outbound.recv().await {
        trace!(line = %line, "->");
        // `send` flushes, so partial writes are retried before the next line
        framed.send(line).await?;
    }
    debug!("outbound channel closed, writer exiting");
    Ok(())
}
