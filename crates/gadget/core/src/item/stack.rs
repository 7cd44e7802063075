use std::collections::BTreeMap;
use std::fmt;

/// Largest amount a single inventory stack may carry.
pub const MAX_STACK_SIZE: u32 = 64;

/// Base material of a stack or of a thrown visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Material {
    Air,
    Cobblestone,
    RedstoneTorch,
    GlassBottle,
    SplashPotion,
    Shield,
}

/// Namespaced key of a private data slot on a stack (`"gadgets:custom_item_id"`).
///
/// The namespace keeps our entries apart from unrelated data other systems
/// attach to the same stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedKey {
    namespace: String,
    key: String,
}

impl NamespacedKey {
    pub fn new(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

/// An inventory stack: material, amount, cosmetics, and private string data.
///
/// Stacks are plain values; the registry is the only component that reads or
/// writes the custom-item tag in [`ItemStack::data`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub material: Material,
    pub amount: u32,
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    data: BTreeMap<NamespacedKey, String>,
}

impl ItemStack {
    pub fn new(material: Material, amount: u32) -> Self {
        Self {
            material,
            amount,
            display_name: None,
            lore: Vec::new(),
            data: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_lore<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true for air or a zero-amount stack.
    pub fn is_empty(&self) -> bool {
        self.material == Material::Air || self.amount == 0
    }

    pub fn data(&self, key: &NamespacedKey) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn set_data(&mut self, key: NamespacedKey, value: impl Into<String>) {
        self.data.insert(key, value.into());
    }

    /// Same item apart from the amount.
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.material == other.material
            && self.display_name == other.display_name
            && self.lore == other.lore
            && self.data == other.data
    }

    /// Removes up to `amount` units and returns how many were removed.
    pub fn take(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.amount);
        self.amount -= taken;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_ignores_amount_but_not_data() {
        let key = NamespacedKey::new("gadgets", "custom_item_id");
        let mut a = ItemStack::new(Material::Cobblestone, 3).with_name("Frag Grenade");
        let mut b = a.clone();
        b.amount = 64;
        assert!(a.is_similar(&b));

        a.set_data(key.clone(), "grenade");
        assert!(!a.is_similar(&b));
        b.set_data(key, "grenade");
        assert!(a.is_similar(&b));
    }

    #[test]
    fn take_never_underflows() {
        let mut stack = ItemStack::new(Material::GlassBottle, 2);
        assert_eq!(stack.take(5), 2);
        assert!(stack.is_empty());
    }
}
