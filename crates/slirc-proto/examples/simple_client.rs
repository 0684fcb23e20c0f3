//! Simple IRC client example
//!
//! Connects with the bare transport, registers, answers PINGs and prints
//! every line until the server hangs up.
//!
//! Usage: `cargo run --example simple_client -- irc.libera.chat 6697 tls`

use slirc_proto::{join_params, Connection, Message, Security};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "irc.libera.chat".to_string());
    let port = args.next().map(|p| p.parse()).transpose()?.unwrap_or(6667);
    let security = Security::from_flag(args.next().as_deref() == Some("tls"));

    let transport = Connection::new(host, port, security).connect().await?;
    let mut link = transport.spawn(slirc_proto::DEFAULT_IDLE_TIMEOUT);

    for line in ["USER example 0 * :Example Bot", "NICK example_bot"] {
        println!("→ {line}");
        link.outbound.send(line.to_string())?;
    }

    while let Some(line) = link.inbound.recv().await {
        println!("← {line}");
        let Ok(message) = Message::parse(&line) else {
            continue;
        };
        match message.command.as_str() {
            "PING" => {
                let pong = format!("PONG {}", join_params(&message.args));
                println!("→ {pong}");
                link.outbound.send(pong)?;
            }
            "001" => println!("✓ Registration successful!"),
            _ => {}
        }
    }

    println!("Connection ended: {}", link.tasks.closed().await);
    Ok(())
}
