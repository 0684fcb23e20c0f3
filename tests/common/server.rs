//! In-process fake IRC server.
//!
//! Listens on an ephemeral localhost port, accepts the bot's connection and
//! lets a test script both sides of the conversation.

use slirc_proto::Message;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// A listening fake server.
pub struct TestServer {
    listener: TcpListener,
    port: u16,
}

impl TestServer {
    /// Bind to a free localhost port.
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Wait for the bot to connect.
    pub async fn accept(&self) -> anyhow::Result<ServerConn> {
        let (stream, _) = timeout(IO_TIMEOUT, self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(ServerConn {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }
}

/// The server's end of one accepted connection.
pub struct ServerConn {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl ServerConn {
    /// Send a raw line; the terminator is added when missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with("\r\n") {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Next line from the bot, terminator included.
    pub async fn recv_wire(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(IO_TIMEOUT, self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(n > 0, "bot closed the connection");
        Ok(line)
    }

    /// Next line from the bot, terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        let line = self.recv_wire().await?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Next line from the bot, parsed.
    pub async fn recv_message(&mut self) -> anyhow::Result<Message> {
        let line = self.recv().await?;
        line.parse::<Message>()
            .map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive lines until one satisfies `predicate`, returning all of them.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Consume USER and NICK, returning the nick the bot asked for.
    pub async fn expect_registration(&mut self) -> anyhow::Result<String> {
        let user = self.recv_message().await?;
        anyhow::ensure!(user.command == "USER", "expected USER, got {:?}", user);
        let nick = self.recv_message().await?;
        anyhow::ensure!(nick.command == "NICK", "expected NICK, got {:?}", nick);
        nick.arg(0)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("NICK without a nickname"))
    }

    /// Register the bot and send the welcome.
    pub async fn welcome(&mut self) -> anyhow::Result<String> {
        let nick = self.expect_registration().await?;
        self.send_raw(&format!(":test.server 001 {nick} :Welcome to TestNet {nick}"))
            .await?;
        Ok(nick)
    }

    /// Assert the bot sends nothing for `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        let mut line = String::new();
        match timeout(dur, self.reader.read_line(&mut line)).await {
            Err(_) => Ok(()),
            Ok(_) => anyhow::bail!("unexpected line from bot: {:?}", line),
        }
    }
}
