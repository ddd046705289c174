//! # Console Channel
//!
//! One inbound event per line:
//!
//! ```text
//! <requester_id>[ (<display name>)]: <text>
//! ```
//!
//! Text starting with `/` is a command (`/start`, `/wifi`, `/cancelar` or
//! `/cancel`, `/minhassenhas` or `/mycredentials`); anything else is free
//! text interpreted by session state. Replies go out as
//! `[<requester_id>] <message>`, one prefix per output line.

use async_trait::async_trait;
use gw_04_conversation::{ChannelError, Command, Reply, ReplyChannel};
use shared_types::RequesterRef;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// What the requester typed after the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(Command),
    Text(String),
}

/// A parsed inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub requester: RequesterRef,
    pub display_name: Option<String>,
    pub input: ConsoleInput,
}

/// Reasons a line is not an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing ':' after the requester id")]
    MissingSeparator,

    #[error("empty requester id")]
    EmptyRequester,

    #[error("empty message")]
    EmptyMessage,
}

/// Parse one console line.
pub fn parse_line(line: &str) -> Result<ConsoleLine, ParseError> {
    let (header, text) = split_header(line).ok_or(ParseError::MissingSeparator)?;
    let (requester, display_name) = parse_header(header);
    let requester = RequesterRef::new(requester).ok_or(ParseError::EmptyRequester)?;

    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyMessage);
    }

    let input = match text.strip_prefix('/') {
        Some(command) => ConsoleInput::Command(parse_command(command)),
        None => ConsoleInput::Text(text.to_string()),
    };

    Ok(ConsoleLine {
        requester,
        display_name,
        input,
    })
}

/// Split at the first `:` outside the display name parentheses.
fn split_header(line: &str) -> Option<(&str, &str)> {
    let mut colon = line.find(':')?;
    if let Some(open) = line[..colon].find('(') {
        let close = open + line[open..].find(')')?;
        colon = close + line[close..].find(':')?;
    }
    Some((&line[..colon], &line[colon + 1..]))
}

fn parse_header(header: &str) -> (&str, Option<String>) {
    let header = header.trim();
    match (header.find('('), header.strip_suffix(')')) {
        (Some(open), Some(inner)) => {
            let name = inner[open + 1..].trim();
            let display_name = (!name.is_empty()).then(|| name.to_string());
            (header[..open].trim(), display_name)
        }
        _ => (header, None),
    }
}

fn parse_command(command: &str) -> Command {
    let name = command.split_whitespace().next().unwrap_or_default();
    match name.to_ascii_lowercase().as_str() {
        "wifi" => Command::RequestCredential,
        "cancelar" | "cancel" => Command::Cancel,
        "minhassenhas" | "mycredentials" => Command::ListMyCredentials,
        // `/start` and anything unknown show the help text.
        _ => Command::Start,
    }
}

/// Writes replies to any async writer, stdout by default.
pub struct ConsoleReplyChannel<W = Stdout> {
    writer: Mutex<W>,
}

impl ConsoleReplyChannel<Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin + Send> ConsoleReplyChannel<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Render a reply with the requester prefix on every line.
pub fn render(requester: &RequesterRef, reply: &Reply) -> String {
    let mut out = String::new();
    for line in reply.to_string().lines() {
        out.push_str(&format!("[{requester}] {line}\n"));
    }
    out
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ReplyChannel for ConsoleReplyChannel<W> {
    async fn send(&self, requester: &RequesterRef, reply: &Reply) -> Result<(), ChannelError> {
        let rendered = render(requester, reply);
        let mut writer = self.writer.lock().await;
        writer.write_all(rendered.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}
