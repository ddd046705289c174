//! # Guest-WiFi Runtime
//!
//! Reads console lines, routes each one to a per-requester worker and sends
//! the reply back through the `ReplyChannel`.
//!
//! ```text
//! stdin ──lines──→ router ──mpsc──→ worker(requester A) ──spawn_blocking──→ controller
//!                         └─mpsc──→ worker(requester B) ──spawn_blocking──→ controller
//!                                          │
//!                                          └──→ ReplyChannel::send
//! ```
//!
//! Lines of one requester are handled in arrival order; different requesters
//! proceed concurrently. Store I/O never runs on the async workers.

use std::collections::HashMap;
use std::sync::Arc;

use gw_04_conversation::{ConversationApi, InboundEvent, Reply, ReplyChannel};
use shared_types::RequesterRef;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::adapters::console::{parse_line, ConsoleInput, ConsoleLine};

/// Errors that stop the event loop.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines turned into events.
    pub events: usize,
    /// Lines that could not be parsed.
    pub rejected_lines: usize,
    /// Replies the channel refused.
    pub failed_replies: usize,
}

/// The event loop.
pub struct GuestWifiRuntime {
    controller: Arc<dyn ConversationApi>,
    channel: Arc<dyn ReplyChannel>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl GuestWifiRuntime {
    pub fn new(controller: Arc<dyn ConversationApi>, channel: Arc<dyn ReplyChannel>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            controller,
            channel,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Ask `run` to stop reading. Events already routed are still answered.
    pub fn shutdown(&self) {
        if self.shutdown_tx.send(true).is_err() {
            debug!("Shutdown requested with no running loop");
        }
    }

    /// Process `input` until end of stream or shutdown, then wait for every
    /// routed event to be answered.
    pub async fn run<R>(&self, input: R) -> Result<RunSummary, RuntimeError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut shutdown = self.shutdown_rx.clone();
        let mut workers: HashMap<RequesterRef, mpsc::UnboundedSender<ConsoleLine>> =
            HashMap::new();
        let mut tasks = JoinSet::new();
        let mut summary = RunSummary::default();

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = shutdown.changed() => {
                    info!("Shutdown signal received, no longer reading input");
                    break;
                }
            };
            let Some(line) = line else {
                debug!("Input closed");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let parsed = match parse_line(&line) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(error = %err, "Ignoring malformed line");
                    summary.rejected_lines += 1;
                    continue;
                }
            };
            summary.events += 1;

            let requester = parsed.requester.clone();
            let sender = workers.entry(requester.clone()).or_insert_with(|| {
                let (tx, rx) = mpsc::unbounded_channel();
                tasks.spawn(requester_worker(
                    requester.clone(),
                    rx,
                    Arc::clone(&self.controller),
                    Arc::clone(&self.channel),
                ));
                tx
            });
            if sender.send(parsed).is_err() {
                error!(%requester, "Requester worker stopped unexpectedly");
            }
        }

        // Closing the senders lets every worker drain and exit.
        drop(workers);
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(failed) => summary.failed_replies += failed,
                Err(err) => error!(error = %err, "Requester worker panicked"),
            }
        }

        info!(
            events = summary.events,
            rejected = summary.rejected_lines,
            failed_replies = summary.failed_replies,
            "Event loop finished"
        );
        Ok(summary)
    }
}

/// Handle one requester's lines in order. Returns the number of replies
/// the channel refused.
async fn requester_worker(
    requester: RequesterRef,
    mut inbox: mpsc::UnboundedReceiver<ConsoleLine>,
    controller: Arc<dyn ConversationApi>,
    channel: Arc<dyn ReplyChannel>,
) -> usize {
    let mut failed = 0;

    while let Some(line) = inbox.recv().await {
        let controller = Arc::clone(&controller);
        let reply = match tokio::task::spawn_blocking(move || respond(controller.as_ref(), line))
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                error!(%requester, error = %err, "Event handler panicked");
                Reply::StoreUnavailable
            }
        };

        debug!(%requester, reply = reply.kind(), "Sending reply");
        if let Err(err) = channel.send(&requester, &reply).await {
            warn!(%requester, error = %err, "Failed to deliver reply");
            failed += 1;
        }
    }

    failed
}

/// Turn a parsed line into exactly one reply.
pub fn respond(controller: &dyn ConversationApi, line: ConsoleLine) -> Reply {
    match line.input {
        ConsoleInput::Command(command) => controller.handle(&InboundEvent {
            requester: line.requester,
            display_name: line.display_name,
            command,
        }),
        ConsoleInput::Text(text) => {
            controller.handle_text(&line.requester, line.display_name.as_deref(), &text)
        }
    }
}
