use crate::item::{ItemStack, Material};
use crate::state::{ActorId, BlockPos, Location, ObjectHandle, Vec3};

/// Contents of a single terrain cell, as far as item effects care.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BlockKind {
    Air,
    Solid,
    Water,
    Fire,
}

impl BlockKind {
    pub fn is_air(self) -> bool {
        matches!(self, BlockKind::Air)
    }

    pub fn is_solid(self) -> bool {
        matches!(self, BlockKind::Solid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Sound {
    GenericExplode,
    GlassBreak,
    EggThrow,
    ShieldBlock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Particle {
    Smoke,
}

/// Named status condition applied to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    Poison,
    Nausea,
    Resistance,
    Slowness,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub duration_ticks: u32,
    pub amplifier: u8,
}

impl StatusEffect {
    pub const fn new(kind: StatusKind, duration_ticks: u32, amplifier: u8) -> Self {
        Self {
            kind,
            duration_ticks,
            amplifier,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Explosion parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blast {
    pub power: f32,
    pub set_fire: bool,
    pub break_blocks: bool,
}

/// A lingering area volume that periodically applies status conditions to
/// actors inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaCloud {
    pub at: Location,
    pub source: Option<ActorId>,
    pub duration_ticks: u32,
    pub radius: f32,
    pub radius_per_tick: f32,
    pub wait_ticks: u32,
    pub reapplication_delay: u32,
    pub effects: Vec<StatusEffect>,
    pub particle: Particle,
    pub color: Color,
}

/// Request to spawn a thrown, physics-driven object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectSpawn {
    pub at: Location,
    pub velocity: Vec3,
    pub visual: Material,
    pub tint: Option<Color>,
    pub gravity: bool,
    pub invulnerable: bool,
    pub pickable: bool,
}

/// Everything item behaviours need from the hosting game world.
///
/// The core never talks to a concrete engine: a live server adapts its own
/// API to this trait, and tests use scripted or sandbox implementations.
pub trait World {
    // --- actors ---

    fn actor_by_name(&self, name: &str) -> Option<ActorId>;

    fn actor_name(&self, actor: ActorId) -> Option<String>;

    fn actor_location(&self, actor: ActorId) -> Option<Location>;

    fn actor_eye_location(&self, actor: ActorId) -> Option<Location>;

    /// First non-air cell along the actor's line of sight, within
    /// `max_distance` blocks.
    fn target_block(&self, actor: ActorId, max_distance: u32) -> Option<BlockPos>;

    fn send_message(&mut self, actor: ActorId, message: &str);

    fn apply_status(&mut self, actor: ActorId, effect: StatusEffect);

    // --- inventory ---

    /// Snapshot of the stack in the actor's active hand.
    fn held_item(&self, actor: ActorId) -> Option<ItemStack>;

    /// Removes `amount` units from the active hand, clearing the slot when it
    /// runs out. Returns false when the hand held fewer than `amount` units.
    fn consume_held_item(&mut self, actor: ActorId, amount: u32) -> bool;

    /// Adds `stack` to the actor's inventory, returning whatever did not fit.
    fn give_item(&mut self, actor: ActorId, stack: ItemStack) -> Option<ItemStack>;

    // --- terrain ---

    fn block(&self, pos: BlockPos) -> BlockKind;

    fn set_block(&mut self, pos: BlockPos, kind: BlockKind);

    // --- thrown objects ---

    fn spawn_object(&mut self, spawn: ObjectSpawn) -> ObjectHandle;

    fn object_is_valid(&self, handle: ObjectHandle) -> bool;

    fn object_location(&self, handle: ObjectHandle) -> Option<Location>;

    fn object_velocity(&self, handle: ObjectHandle) -> Option<Vec3>;

    fn object_on_ground(&self, handle: ObjectHandle) -> bool;

    fn object_in_water(&self, handle: ObjectHandle) -> bool;

    fn remove_object(&mut self, handle: ObjectHandle);

    // --- presentation ---

    fn play_sound(&mut self, at: Location, sound: Sound, volume: f32, pitch: f32);

    fn create_explosion(&mut self, at: Location, blast: Blast);

    fn spawn_area_cloud(&mut self, cloud: AreaCloud);
}
