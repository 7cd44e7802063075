//! The shipped item set and the tuning catalog that configures it.
//!
//! Each item reads its numbers from a [`Catalog`] section once, when its
//! definition is built; nothing is shared or mutated afterwards.
mod grenade;
mod molotov;
mod riot_shield;
mod tear_gas;

pub use grenade::{Grenade, GrenadeTuning};
pub use molotov::{FirePatch, Molotov, MolotovTuning};
pub use riot_shield::{RiotShield, RiotShieldTuning};
pub use tear_gas::{CloudProfile, TearGas, TearGasTuning};

use crate::error::ConfigError;
use crate::item::ItemRegistry;
use crate::projectile::ThrowProfile;

pub const GRENADE_ID: &str = "grenade";
pub const MOLOTOV_ID: &str = "molotov";
pub const TEAR_GAS_ID: &str = "teargas";
pub const RIOT_SHIELD_ID: &str = "riot_shield";

/// Tuning for every shipped item. Missing sections fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Catalog {
    pub grenade: GrenadeTuning,
    pub molotov: MolotovTuning,
    pub tear_gas: TearGasTuning,
    pub riot_shield: RiotShieldTuning,
}

impl Catalog {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grenade.validate()?;
        self.molotov.validate()?;
        self.tear_gas.validate()?;
        self.riot_shield.validate()
    }

    /// Validates the catalog and registers every item under `namespace`.
    pub fn build_registry(
        &self,
        namespace: impl Into<String>,
    ) -> Result<ItemRegistry, ConfigError> {
        self.validate()?;
        let mut registry = ItemRegistry::new(namespace);
        registry.register(Grenade::definition(&self.grenade)?);
        registry.register(Molotov::definition(&self.molotov)?);
        registry.register(TearGas::definition(&self.tear_gas)?);
        registry.register(RiotShield::definition(&self.riot_shield)?);
        Ok(registry)
    }
}

fn check_range(item: &'static str, range: u32) -> Result<(), ConfigError> {
    if range == 0 {
        return Err(ConfigError::ZeroRange { item });
    }
    Ok(())
}

fn check_positive(item: &'static str, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NonPositive { item, field });
    }
    Ok(())
}

fn check_throw(item: &'static str, throw: &ThrowProfile) -> Result<(), ConfigError> {
    check_positive(item, "throw.speed", throw.speed)?;
    if !throw.lift.is_finite() {
        return Err(ConfigError::NonPositive {
            item,
            field: "throw.lift",
        });
    }
    Ok(())
}
