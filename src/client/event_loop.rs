//! The event loop: sole consumer of inbound lines and sole writer of
//! [`ClientState`].
//!
//! Per line: stamp, parse, react to protocol-level commands (PING, 433,
//! 001, ERROR), then broadcast to the plugins unless the line is our own
//! echo. The echo check uses the nickname as it was before this line's
//! reactions.

use chrono::{DateTime, Utc};
use slirc_proto::{ConnectionError, Link, Message, ProtocolError, join_params};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, info, trace, warn};

use super::{ClientHandle, ClientState, ConnectionState};
use crate::error::ClientError;
use crate::event::Event;
use crate::plugin::Dispatcher;

enum Input {
    Line(String),
    Tick,
    Closed(ConnectionError),
}

pub(super) struct EventLoop {
    handle: ClientHandle,
    state: Arc<ClientState>,
    dispatcher: Dispatcher,
    heartbeat: Option<Duration>,
    nick_attempts: u32,
    alt_tried: bool,
}

impl EventLoop {
    pub(super) fn new(
        handle: ClientHandle,
        state: Arc<ClientState>,
        dispatcher: Dispatcher,
        heartbeat: Option<Duration>,
    ) -> Self {
        Self {
            handle,
            state,
            dispatcher,
            heartbeat,
            nick_attempts: 0,
            alt_tried: false,
        }
    }

    pub(super) async fn run(mut self, link: Link) -> Result<(), ClientError> {
        let Link {
            mut inbound,
            mut tasks,
            ..
        } = link;

        info!("Entering event loop");
        loop {
            // Buffered lines drain before a transport failure is acted on
            let input = tokio::select! {
                biased;
                input = recv_input(&mut inbound, self.heartbeat) => input,
                err = tasks.closed() => Some(Input::Closed(err)),
            };
            let input = match input {
                Some(input) => input,
                None => Input::Closed(tasks.closed().await),
            };

            match input {
                Input::Line(line) => self.handle_line(&line),
                Input::Tick => {
                    trace!("Heartbeat tick");
                    self.dispatcher.broadcast(Arc::new(Event::tick(Utc::now())));
                }
                Input::Closed(err) => {
                    tasks.shutdown();
                    self.dispatcher.shutdown();
                    return self.finish(err);
                }
            }

            tokio::task::yield_now().await;
        }
    }

    fn handle_line(&mut self, line: &str) {
        let timestamp = Utc::now();
        self.state.touch(timestamp);

        let message = match Message::parse(line) {
            Ok(message) => message,
            Err(ProtocolError::EmptyLine) => {
                debug!("Dropping empty line");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Dropping unparseable line");
                return;
            }
        };
        if message.is_malformed() {
            warn!(line = %line, "Line has no command, dispatching as-is");
        }

        let self_echo = self.state.is_current_nick(&message.nick);
        let event = Arc::new(Event::new(message, timestamp));

        if let Err(e) = self.react(&event) {
            warn!(command = %event.command, error = %e, "Failed to queue protocol reply");
        }

        if self_echo {
            trace!(command = %event.command, "Own echo, not dispatched");
        } else {
            self.dispatcher.broadcast(event);
        }
    }

    fn react(&mut self, event: &Event) -> Result<(), ClientError> {
        match event.command.as_str() {
            "PING" => self.handle.send_raw(pong(&event.args)),
            "433" => self.on_nick_in_use(),
            "001" => self.on_welcome(event.timestamp),
            "ERROR" => {
                warn!(reason = event.trailing().unwrap_or_default(), "Server sent ERROR");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Try the alternate nick once, then keep appending `_`.
    fn on_nick_in_use(&mut self) -> Result<(), ClientError> {
        self.nick_attempts += 1;
        let current = self.state.nick();
        let next = match self.state.alt_nick() {
            Some(alt) if !self.alt_tried && alt != current => {
                self.alt_tried = true;
                alt.to_string()
            }
            _ => format!("{current}_"),
        };

        warn!(
            rejected = %current,
            next = %next,
            attempts = self.nick_attempts,
            "Nickname in use"
        );
        self.state.set_nick(next.clone());
        self.handle.set_nick(&next)
    }

    fn on_welcome(&mut self, at: DateTime<Utc>) -> Result<(), ClientError> {
        self.state.set_phase(ConnectionState::Ready);
        info!(
            nick = %self.state.nick(),
            at = %at.to_rfc2822(),
            "USER and NICK accepted, joining channels"
        );
        for channel in self.state.channels() {
            self.handle.join(channel)?;
        }
        Ok(())
    }

    fn finish(&self, err: ConnectionError) -> Result<(), ClientError> {
        if self.state.is_quitting() && matches!(err, ConnectionError::Closed) {
            info!("Connection closed after QUIT");
            return Ok(());
        }
        error!(error = %err, "Connection lost");
        Err(ClientError::Connection(err))
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.state.set_phase(ConnectionState::Terminated);
    }
}

async fn recv_input(
    inbound: &mut mpsc::UnboundedReceiver<String>,
    heartbeat: Option<Duration>,
) -> Option<Input> {
    let Some(period) = heartbeat else {
        return inbound.recv().await.map(Input::Line);
    };
    match timeout(period, inbound.recv()).await {
        Ok(line) => line.map(Input::Line),
        Err(_) => Some(Input::Tick),
    }
}

/// `PONG` echoing the PING's parameters.
fn pong(args: &[String]) -> String {
    if args.is_empty() {
        "PONG".to_string()
    } else {
        format!("PONG {}", join_params(args))
    }
}
