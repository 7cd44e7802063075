//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! using items, granting them, stepping the clock and streaming events.
use tokio::sync::{broadcast, mpsc, oneshot};

use gadget_core::ActorId;

use super::errors::{CommandError, Result, RuntimeError};
use super::events::GadgetEvent;
use crate::commands::GiveReport;
use crate::gateway::{ActivationOutcome, InteractAction};
use crate::server::ServerStats;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<GadgetEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<GadgetEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Uses the item the actor is holding.
    pub async fn interact(
        &self,
        actor: ActorId,
        action: InteractAction,
    ) -> Result<ActivationOutcome> {
        self.request(|reply| Command::Interact {
            actor,
            action,
            reply,
        })
        .await
    }

    /// Runs a `give` command line (already split into tokens).
    ///
    /// The outer `Result` reports runtime failures; the inner one the
    /// command's own verdict.
    pub async fn give(
        &self,
        sender: Option<ActorId>,
        args: Vec<String>,
    ) -> Result<std::result::Result<GiveReport, CommandError>> {
        self.request(|reply| Command::Give {
            sender,
            args,
            reply,
        })
        .await
    }

    /// Runs `ticks` ticks immediately, independent of the wall clock.
    pub async fn advance(&self, ticks: u32) -> Result<ServerStats> {
        self.request(|reply| Command::Advance { ticks, reply }).await
    }

    /// Query the current counters (read-only)
    pub async fn stats(&self) -> Result<ServerStats> {
        self.request(|reply| Command::QueryStats { reply }).await
    }

    /// Subscribe to runtime events
    pub fn subscribe(&self) -> broadcast::Receiver<GadgetEvent> {
        self.event_tx.subscribe()
    }
}
