use crate::events::AppEvent;
use async_channel::Sender;
use directories::BaseDirs;
use std::path::PathBuf;
use std::str::FromStr;
use strum::EnumString;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

const SOCKET_NAME: &str = "notchbar.sock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Verb {
    Select,
    #[strum(serialize = "next", serialize = "n")]
    Next,
    #[strum(serialize = "prev", serialize = "p")]
    Prev,
    Show,
    Hide,
}

/// Parses one line of the control protocol: `select <n>`, `next`, `prev`,
/// `show` or `hide`.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let mut words = line.split_whitespace();
    let verb = Verb::from_str(words.next()?).ok()?;
    let arg = words.next();
    if words.next().is_some() {
        return None;
    }

    match (verb, arg) {
        (Verb::Select, Some(n)) => n.parse().ok().map(AppEvent::Select),
        (Verb::Next, None) => Some(AppEvent::Step(1)),
        (Verb::Prev, None) => Some(AppEvent::Step(-1)),
        (Verb::Show, None) => Some(AppEvent::Show),
        (Verb::Hide, None) => Some(AppEvent::Hide),
        _ => None,
    }
}

pub fn socket_path() -> PathBuf {
    BaseDirs::new()
        .and_then(|dirs| dirs.runtime_dir().map(|d| d.join(SOCKET_NAME)))
        .unwrap_or_else(|| std::env::temp_dir().join(SOCKET_NAME))
}

pub async fn run_server(tx: Sender<AppEvent>) {
    let path = socket_path();
    // Cleanup old socket if it exists
    if std::fs::metadata(&path).is_ok() {
        let _ = std::fs::remove_file(&path);
    }

    let listener = match UnixListener::bind(&path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", path.display(), e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(&line) {
                            Some(event) => {
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            None if line.trim().is_empty() => {}
                            None => log::warn!("Ignoring unknown command {:?}", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
