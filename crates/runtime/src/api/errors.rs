//! Unified error types surfaced by the runtime API.
//!
//! [`RuntimeError`] covers worker coordination. [`CommandError`] covers the
//! grant command; its display text doubles as the message shown to whoever
//! issued the command.
use thiserror::Error;
use tokio::sync::oneshot;

use gadget_core::ConfigError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an item registry or catalog before building")]
    MissingRegistry,

    #[error("invalid item catalog")]
    Catalog(#[from] ConfigError),

    #[error("tick period must be at least 1 ms")]
    ZeroTickPeriod,
}

/// Rejected grant command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: give <player> <item_id> [amount]")]
    Usage,

    #[error("Player '{name}' not found or offline.")]
    UnknownActor { name: String },

    #[error("Invalid item ID: {id}. Use one of: {available}")]
    UnknownItem { id: String, available: String },

    #[error("Unknown subcommand '{name}'. Use give.")]
    UnknownSubcommand { name: String },
}
