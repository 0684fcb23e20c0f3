//! Integration tests for the binary's signal handling.
//!
//! Runs the real `slirc-bot` executable against the fake server and stops
//! it with a signal once it has registered.

#![cfg(unix)]

mod common;

use common::TestServer;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;
use tokio::time::{sleep, timeout};

fn spawn_bot(port: u16, dir: &tempfile::TempDir) -> anyhow::Result<Child> {
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[server]
host = "127.0.0.1"
port = {port}
tls = false

[client]
nick = "sigbot"
"#
        ),
    )?;

    Ok(Command::new(env!("CARGO_BIN_EXE_slirc-bot"))
        .arg(&config_path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?)
}

async fn wait_for_exit(child: &mut Child) -> anyhow::Result<ExitStatus> {
    timeout(Duration::from_secs(5), async {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            sleep(Duration::from_millis(20)).await;
        }
    })
    .await?
}

async fn exits_cleanly_on(signal: &str) {
    let server = TestServer::bind().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut child = spawn_bot(server.port(), &dir).unwrap();

    let mut conn = server.accept().await.unwrap();
    assert_eq!(conn.expect_registration().await.unwrap(), "sigbot");

    let sent = Command::new("kill")
        .args([signal, &child.id().to_string()])
        .status()
        .unwrap();
    assert!(sent.success());

    let status = wait_for_exit(&mut child).await;
    if status.is_err() {
        let _ = child.kill();
    }
    assert!(status.unwrap().success());
}

#[tokio::test]
async fn test_sigquit_stops_the_bot() {
    exits_cleanly_on("-QUIT").await;
}

#[tokio::test]
async fn test_sigterm_stops_the_bot() {
    exits_cleanly_on("-TERM").await;
}
