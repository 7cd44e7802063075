use std::fmt;
use std::sync::Arc;

use super::id::ItemId;
use super::stack::{ItemStack, Material};
use crate::env::{Env, World};
use crate::state::{ActorId, Location};

/// Behaviour of an item that takes effect the moment it is used.
///
/// The gateway imposes no consumption policy: an implementation that wants
/// to use itself up calls [`World::consume_held_item`] on its own.
pub trait UtilityItem: Send + Sync {
    fn activate(&self, actor: ActorId, env: &mut Env<'_>);
}

/// Behaviour of an item that is aimed and thrown.
///
/// Activation happens in two phases. [`ProjectileItem::compute_target`] is a
/// pure calculation run before anything is mutated; only when it yields a
/// location does the gateway consume one unit and call
/// [`ProjectileItem::on_throw`], which typically spawns an object and starts
/// a tracker.
pub trait ProjectileItem: Send + Sync {
    fn compute_target(&self, actor: ActorId, world: &dyn World) -> Option<Location>;

    fn on_throw(&self, actor: ActorId, target: Location, env: &mut Env<'_>);
}

/// Which activation protocol an item follows.
#[derive(Clone)]
pub enum ActivationKind {
    Immediate(Arc<dyn UtilityItem>),
    Projectile(Arc<dyn ProjectileItem>),
}

impl ActivationKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActivationKind::Immediate(_) => "immediate",
            ActivationKind::Projectile(_) => "projectile",
        }
    }
}

impl fmt::Debug for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cosmetic template used to build fresh stacks of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDisplay {
    pub material: Material,
    pub name: String,
    pub lore: Vec<String>,
}

impl ItemDisplay {
    pub fn new<I, S>(material: Material, name: impl Into<String>, lore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            material,
            name: name.into(),
            lore: lore.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds an untagged stack of `quantity` units.
    pub fn build(&self, quantity: u32) -> ItemStack {
        ItemStack::new(self.material, quantity)
            .with_name(self.name.clone())
            .with_lore(self.lore.iter().cloned())
    }
}

/// The registered description of one custom item. Immutable once built.
#[derive(Clone, Debug)]
pub struct ItemDefinition {
    id: ItemId,
    display: ItemDisplay,
    activation: ActivationKind,
}

impl ItemDefinition {
    pub fn new(id: ItemId, display: ItemDisplay, activation: ActivationKind) -> Self {
        Self {
            id,
            display,
            activation,
        }
    }

    pub fn immediate(id: ItemId, display: ItemDisplay, item: impl UtilityItem + 'static) -> Self {
        Self::new(id, display, ActivationKind::Immediate(Arc::new(item)))
    }

    pub fn projectile(
        id: ItemId,
        display: ItemDisplay,
        item: impl ProjectileItem + 'static,
    ) -> Self {
        Self::new(id, display, ActivationKind::Projectile(Arc::new(item)))
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn display(&self) -> &ItemDisplay {
        &self.display
    }

    pub fn activation(&self) -> &ActivationKind {
        &self.activation
    }
}
