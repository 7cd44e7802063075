//! Rules for custom consumable items on a tick-driven game server.
//!
//! `gadget-core` owns the item registry and tag codec, the two activation
//! protocols ([`UtilityItem`] and [`ProjectileItem`]), the projectile landing
//! tracker, and the tick [`Scheduler`] that drives trackers and deferred
//! work. Everything reaches the game through the [`World`] trait, threaded in
//! as part of an [`Env`], so the crate has no engine dependency and performs
//! no logging or I/O of its own.
pub mod config;
pub mod env;
pub mod error;
pub mod item;
pub mod items;
pub mod projectile;
pub mod scheduler;
pub mod state;
pub mod targeting;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ServerConfig;
pub use env::{
    AreaCloud, Blast, BlockKind, Color, Env, ObjectSpawn, Particle, Sound, StatusEffect,
    StatusKind, World,
};
pub use error::{ConfigError, IdError};
pub use item::{
    ActivationKind, ItemDefinition, ItemDisplay, ItemId, ItemRegistry, ItemStack, MAX_STACK_SIZE,
    Material, NamespacedKey, ProjectileItem, TAG_KEY, UtilityItem,
};
pub use items::{
    Catalog, CloudProfile, FirePatch, GRENADE_ID, Grenade, GrenadeTuning, MOLOTOV_ID, Molotov,
    MolotovTuning, RIOT_SHIELD_ID, RiotShield, RiotShieldTuning, TEAR_GAS_ID, TearGas,
    TearGasTuning,
};
pub use projectile::{
    LAUNCH_FAILED_MESSAGE, Landing, LandingCallback, LandingParams, LandingRule,
    ProjectileTracker, Resolution, ThrowProfile, TrackerPhase, launch_tracked,
};
pub use scheduler::{DeferredTask, Scheduler, TickReport, TrackerId};
pub use state::{ActorId, BlockPos, Location, ObjectHandle, Tick, Vec3};
pub use targeting::AimTargeting;
