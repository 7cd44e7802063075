//! Events broadcast by the simulation worker.
use serde::{Deserialize, Serialize};

use gadget_core::{ActorId, ItemId, Resolution, Tick, TrackerId};

use crate::gateway::ActivationOutcome;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GadgetEvent {
    /// A use interaction was claimed by the gateway.
    ItemUsed {
        tick: Tick,
        actor: ActorId,
        outcome: ActivationOutcome,
    },

    /// Items were granted through the `give` command.
    ItemsGranted {
        tick: Tick,
        recipient: ActorId,
        item: ItemId,
        amount: u32,
        overflow: u32,
    },

    /// A grant command was rejected.
    GrantRejected { tick: Tick, reason: String },

    /// A projectile tracker finished.
    TrackerResolved {
        tick: Tick,
        tracker: TrackerId,
        resolution: Resolution,
    },

    /// Deferred tasks ran this tick.
    TasksRun { tick: Tick, count: usize },

    /// A chat line addressed to one actor.
    Message {
        tick: Tick,
        actor: ActorId,
        text: String,
    },
}

impl GadgetEvent {
    pub fn tick(&self) -> Tick {
        match self {
            GadgetEvent::ItemUsed { tick, .. }
            | GadgetEvent::ItemsGranted { tick, .. }
            | GadgetEvent::GrantRejected { tick, .. }
            | GadgetEvent::TrackerResolved { tick, .. }
            | GadgetEvent::TasksRun { tick, .. }
            | GadgetEvent::Message { tick, .. } => *tick,
        }
    }
}
