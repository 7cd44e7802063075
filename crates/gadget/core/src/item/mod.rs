//! Custom item model: ids, stacks, definitions and the registry.
mod definition;
mod id;
mod registry;
mod stack;

pub use definition::{ActivationKind, ItemDefinition, ItemDisplay, ProjectileItem, UtilityItem};
pub use id::ItemId;
pub use registry::{ItemRegistry, TAG_KEY};
pub use stack::{ItemStack, MAX_STACK_SIZE, Material, NamespacedKey};
