//! Entry point for "actor used an item" interactions.
//!
//! [`ActivationGateway::on_use`] decides whether a held stack is a custom
//! item, claims the interaction if so, and runs the item's activation
//! protocol. Anything it does not recognise passes through untouched so the
//! host can apply its default behaviour.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use gadget_core::{ActivationKind, ActorId, Env, ItemId, ItemRegistry, ItemStack, Location};

/// Shown to the actor when a projectile item has nothing to aim at.
pub const NO_TARGET_MESSAGE: &str = "No valid target found within range!";

/// Raw input kind reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum InteractAction {
    RightClickAir,
    RightClickBlock,
    LeftClickAir,
    LeftClickBlock,
    Physical,
}

impl InteractAction {
    /// Only secondary (right) clicks activate items.
    pub fn is_use(self) -> bool {
        matches!(self, InteractAction::RightClickAir | InteractAction::RightClickBlock)
    }
}

/// One interaction as seen by the gateway.
///
/// `item` is a snapshot of the stack in the actor's active hand. Setting
/// `cancelled` tells the host to skip its default handling (opening doors,
/// placing the block, drinking the bottle).
#[derive(Clone, Debug, PartialEq)]
pub struct InteractEvent {
    pub actor: ActorId,
    pub action: InteractAction,
    pub item: Option<ItemStack>,
    cancelled: bool,
}

impl InteractEvent {
    pub fn new(actor: ActorId, action: InteractAction, item: Option<ItemStack>) -> Self {
        Self {
            actor,
            action,
            item,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// What the gateway did with an interaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActivationOutcome {
    /// Not a custom item (or not a use action); left to the host.
    PassThrough,
    /// An immediate item ran its activation.
    Activated { item: ItemId },
    /// A projectile item consumed one unit and was thrown at `target`.
    Thrown { item: ItemId, target: Location },
    /// A projectile item found no target; nothing was consumed.
    NoValidTarget { item: ItemId },
    /// The held stack could not give up a unit; nothing was thrown.
    NotConsumed { item: ItemId },
}

impl ActivationOutcome {
    /// Whether the gateway claimed the interaction.
    pub fn claimed(&self) -> bool {
        !matches!(self, ActivationOutcome::PassThrough)
    }
}

/// Dispatches item use to the registered behaviour.
#[derive(Clone, Debug)]
pub struct ActivationGateway {
    registry: Arc<ItemRegistry>,
}

impl ActivationGateway {
    pub fn new(registry: Arc<ItemRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ItemRegistry> {
        &self.registry
    }

    /// Handles one interaction.
    ///
    /// Lookup misses (no stack, untagged stack, stale tag) pass through
    /// without side effects. A recognised item always cancels the event,
    /// even when the activation itself then finds no target.
    pub fn on_use(&self, event: &mut InteractEvent, env: &mut Env<'_>) -> ActivationOutcome {
        if !event.action.is_use() {
            return ActivationOutcome::PassThrough;
        }
        let Some(held) = event
            .item
            .as_ref()
            .filter(|stack| !stack.is_empty())
        else {
            return ActivationOutcome::PassThrough;
        };
        let Some(id) = self.registry.read_tag(held) else {
            return ActivationOutcome::PassThrough;
        };
        let Some(definition) = self.registry.resolve(id.as_str()) else {
            debug!(item = %id, "stale item tag, passing through");
            return ActivationOutcome::PassThrough;
        };

        event.cancel();
        let actor = event.actor;

        match definition.activation() {
            ActivationKind::Immediate(item) => {
                item.activate(actor, env);
                debug!(actor = actor.0, item = %id, "immediate item activated");
                ActivationOutcome::Activated { item: id }
            }
            ActivationKind::Projectile(item) => {
                let Some(target) = item.compute_target(actor, &*env.world) else {
                    env.world.send_message(actor, NO_TARGET_MESSAGE);
                    debug!(actor = actor.0, item = %id, "no valid target");
                    return ActivationOutcome::NoValidTarget { item: id };
                };
                if !env.world.consume_held_item(actor, 1) {
                    warn!(actor = actor.0, item = %id, "held stack vanished before throw");
                    return ActivationOutcome::NotConsumed { item: id };
                }
                item.on_throw(actor, target, env);
                debug!(actor = actor.0, item = %id, ?target, "projectile item thrown");
                ActivationOutcome::Thrown { item: id, target }
            }
        }
    }
}
