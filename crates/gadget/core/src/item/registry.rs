//! Central map from item id to behaviour, plus the tag codec for stacks.

use std::collections::HashMap;
use std::sync::Arc;

use super::definition::ItemDefinition;
use super::id::ItemId;
use super::stack::{ItemStack, NamespacedKey};

/// Key (within the registry's namespace) of the data slot holding the id.
pub const TAG_KEY: &str = "custom_item_id";

/// Registry of all custom items known to the server.
///
/// Built once at startup and read-only afterwards; share it behind an
/// [`Arc`]. Every stack handed out by [`ItemRegistry::create_tagged_stack`]
/// carries the item id under `<namespace>:custom_item_id`, which is how a
/// stack is mapped back to its behaviour when used.
#[derive(Debug)]
pub struct ItemRegistry {
    tag_key: NamespacedKey,
    items: HashMap<ItemId, Arc<ItemDefinition>>,
}

impl ItemRegistry {
    /// Creates an empty registry whose tags live under `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            tag_key: NamespacedKey::new(namespace, TAG_KEY),
            items: HashMap::new(),
        }
    }

    pub fn tag_key(&self) -> &NamespacedKey {
        &self.tag_key
    }

    /// Registers a definition under its id.
    ///
    /// An existing entry with the same id is replaced and returned; the last
    /// registration wins.
    pub fn register(
        &mut self,
        definition: impl Into<Arc<ItemDefinition>>,
    ) -> Option<Arc<ItemDefinition>> {
        let definition = definition.into();
        self.items.insert(definition.id().clone(), definition)
    }

    /// Looks up a definition. Unknown ids are simply absent.
    pub fn resolve(&self, id: &str) -> Option<&Arc<ItemDefinition>> {
        self.items.get(id)
    }

    /// Writes `id` into the stack's private data slot.
    ///
    /// Does not check that `id` is registered; that is the caller's job.
    pub fn tag(&self, stack: &mut ItemStack, id: &ItemId) {
        stack.set_data(self.tag_key.clone(), id.as_str());
    }

    /// Reads the id tag of a stack.
    ///
    /// Returns `None` for untagged stacks and for tag values that are not
    /// valid ids; stale but well-formed ids are returned and fail later at
    /// [`ItemRegistry::resolve`].
    pub fn read_tag(&self, stack: &ItemStack) -> Option<ItemId> {
        stack
            .data(&self.tag_key)
            .and_then(|raw| ItemId::parse(raw).ok())
    }

    /// Builds a tagged stack of `quantity` units of `id`.
    ///
    /// Returns `None` when `id` is not registered. The quantity is taken
    /// as-is; clamping belongs to the caller.
    pub fn create_tagged_stack(&self, id: &str, quantity: u32) -> Option<ItemStack> {
        let definition = self.resolve(id)?;
        let mut stack = definition.display().build(quantity);
        self.tag(&mut stack, definition.id());
        Some(stack)
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<&ItemId> {
        let mut ids: Vec<&ItemId> = self.items.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Arc<ItemDefinition>> + '_ {
        self.items.values()
    }
}
