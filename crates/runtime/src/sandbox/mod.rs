//! In-memory world for tests, demos and the console server.
//!
//! Terrain is a flat solid floor (top layer at [`SandboxWorld::FLOOR_Y`])
//! with per-cell overrides. Actors stand on it with a facing direction and a
//! nine-slot hotbar. Thrown objects follow [`physics`], area clouds dose
//! actors standing in them, and every presentation call is recorded so
//! callers can inspect what happened.
mod cloud;
mod physics;

use std::collections::{BTreeMap, HashMap};

use gadget_core::{
    ActorId, AreaCloud, Blast, BlockKind, BlockPos, ItemStack, Location, MAX_STACK_SIZE,
    ObjectHandle, ObjectSpawn, Sound, StatusEffect, Vec3, World,
};

use self::cloud::LiveCloud;
use self::physics::Body;
use crate::server::SimulatedWorld;

pub use self::physics::{DRAG, GRAVITY};

pub const EYE_HEIGHT: f64 = 1.62;
pub const HOTBAR_SLOTS: usize = 9;

/// Ray-march step used for line-of-sight targeting.
const RAY_STEP: f64 = 0.05;

#[derive(Clone, Debug, PartialEq)]
pub struct SoundRecord {
    pub at: Location,
    pub sound: Sound,
    pub volume: f32,
    pub pitch: f32,
}

#[derive(Clone, Debug)]
struct SandboxActor {
    name: String,
    location: Location,
    facing: Vec3,
    hotbar: [Option<ItemStack>; HOTBAR_SLOTS],
    selected: usize,
}

#[derive(Debug)]
pub struct SandboxWorld {
    floor_y: Option<i32>,
    blocks: HashMap<BlockPos, BlockKind>,
    actors: Vec<SandboxActor>,
    objects: BTreeMap<ObjectHandle, Body>,
    next_object: u64,
    live_clouds: Vec<LiveCloud>,

    messages: Vec<(ActorId, String)>,
    sounds: Vec<SoundRecord>,
    explosions: Vec<(Location, Blast)>,
    clouds: Vec<AreaCloud>,
    statuses: Vec<(ActorId, StatusEffect)>,
    spawned: Vec<ObjectSpawn>,
}

impl SandboxWorld {
    pub const FLOOR_Y: i32 = 63;

    /// A world with a solid floor up to [`Self::FLOOR_Y`].
    pub fn new() -> Self {
        Self {
            floor_y: Some(Self::FLOOR_Y),
            ..Self::empty()
        }
    }

    /// A world with no terrain at all.
    pub fn empty() -> Self {
        Self {
            floor_y: None,
            blocks: HashMap::new(),
            actors: Vec::new(),
            objects: BTreeMap::new(),
            next_object: 0,
            live_clouds: Vec::new(),
            messages: Vec::new(),
            sounds: Vec::new(),
            explosions: Vec::new(),
            clouds: Vec::new(),
            statuses: Vec::new(),
            spawned: Vec::new(),
        }
    }

    // ===== actors =====

    /// Adds an actor standing at `location`, facing +z.
    pub fn add_actor(&mut self, name: impl Into<String>, location: Location) -> ActorId {
        self.actors.push(SandboxActor {
            name: name.into(),
            location,
            facing: Vec3::new(0.0, 0.0, 1.0),
            hotbar: Default::default(),
            selected: 0,
        });
        ActorId((self.actors.len() - 1) as u32)
    }

    pub fn set_facing(&mut self, actor: ActorId, facing: Vec3) {
        if let Some(a) = self.actor_mut(actor) {
            a.facing = facing.normalize();
        }
    }

    /// Turns the actor's eyes towards `at`.
    pub fn look_at(&mut self, actor: ActorId, at: Location) {
        if let Some(eye) = self.actor_eye_location(actor) {
            self.set_facing(actor, at - eye);
        }
    }

    pub fn teleport(&mut self, actor: ActorId, location: Location) {
        if let Some(a) = self.actor_mut(actor) {
            a.location = location;
        }
    }

    pub fn hotbar(&self, actor: ActorId) -> Option<&[Option<ItemStack>]> {
        self.actor(actor).map(|a| a.hotbar.as_slice())
    }

    /// Total units across the hotbar for which `matches` holds.
    pub fn count_items(&self, actor: ActorId, matches: impl Fn(&ItemStack) -> bool) -> u32 {
        self.actor(actor).map_or(0, |a| {
            a.hotbar
                .iter()
                .flatten()
                .filter(|stack| matches(stack))
                .map(|stack| stack.amount)
                .sum()
        })
    }

    fn actor(&self, actor: ActorId) -> Option<&SandboxActor> {
        self.actors.get(actor.0 as usize)
    }

    fn actor_mut(&mut self, actor: ActorId) -> Option<&mut SandboxActor> {
        self.actors.get_mut(actor.0 as usize)
    }

    // ===== terrain =====

    pub fn fill(&mut self, from: BlockPos, to: BlockPos, kind: BlockKind) {
        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                for z in from.z.min(to.z)..=from.z.max(to.z) {
                    self.set_block(BlockPos::new(x, y, z), kind);
                }
            }
        }
    }

    fn base_block(&self, pos: BlockPos) -> BlockKind {
        match self.floor_y {
            Some(floor) if pos.y <= floor => BlockKind::Solid,
            _ => BlockKind::Air,
        }
    }

    /// Cells currently on fire.
    pub fn burning_cells(&self) -> Vec<BlockPos> {
        let mut cells: Vec<_> = self
            .blocks
            .iter()
            .filter(|(_, kind)| **kind == BlockKind::Fire)
            .map(|(pos, _)| *pos)
            .collect();
        cells.sort();
        cells
    }

    // ===== objects =====

    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    // ===== records =====

    pub fn messages(&self) -> &[(ActorId, String)] {
        &self.messages
    }

    pub fn messages_for(&self, actor: ActorId) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| *to == actor)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn sounds(&self) -> &[SoundRecord] {
        &self.sounds
    }

    pub fn explosions(&self) -> &[(Location, Blast)] {
        &self.explosions
    }

    /// Every cloud ever spawned, including expired ones.
    pub fn clouds(&self) -> &[AreaCloud] {
        &self.clouds
    }

    pub fn active_clouds(&self) -> usize {
        self.live_clouds.len()
    }

    pub fn statuses_for(&self, actor: ActorId) -> Vec<StatusEffect> {
        self.statuses
            .iter()
            .filter(|(to, _)| *to == actor)
            .map(|(_, effect)| *effect)
            .collect()
    }

    pub fn spawned(&self) -> &[ObjectSpawn] {
        &self.spawned
    }

    /// Drains recorded messages, e.g. to print them on a console.
    pub fn take_messages(&mut self) -> Vec<(ActorId, String)> {
        std::mem::take(&mut self.messages)
    }
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedWorld for SandboxWorld {
    fn step(&mut self) {
        let blocks = &self.blocks;
        let floor_y = self.floor_y;
        let terrain = |pos: BlockPos| match blocks.get(&pos) {
            Some(kind) => *kind,
            None if floor_y.is_some_and(|floor| pos.y <= floor) => BlockKind::Solid,
            None => BlockKind::Air,
        };
        for body in self.objects.values_mut() {
            body.step(&terrain);
        }

        let positions: Vec<(ActorId, Location)> = self
            .actors
            .iter()
            .enumerate()
            .map(|(index, a)| (ActorId(index as u32), a.location))
            .collect();
        let mut doses = Vec::new();
        self.live_clouds.retain_mut(|live| match live.step(positions.iter().copied()) {
            Some(dosed) => {
                for actor in dosed {
                    doses.extend(live.cloud.effects.iter().map(|effect| (actor, *effect)));
                }
                true
            }
            None => false,
        });
        self.statuses.extend(doses);
    }

    fn drain_messages(&mut self) -> Vec<(ActorId, String)> {
        self.take_messages()
    }
}

impl World for SandboxWorld {
    fn actor_by_name(&self, name: &str) -> Option<ActorId> {
        self.actors
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
            .map(|index| ActorId(index as u32))
    }

    fn actor_name(&self, actor: ActorId) -> Option<String> {
        self.actor(actor).map(|a| a.name.clone())
    }

    fn actor_location(&self, actor: ActorId) -> Option<Location> {
        self.actor(actor).map(|a| a.location)
    }

    fn actor_eye_location(&self, actor: ActorId) -> Option<Location> {
        self.actor(actor).map(|a| a.location.offset(0.0, EYE_HEIGHT, 0.0))
    }

    fn target_block(&self, actor: ActorId, max_distance: u32) -> Option<BlockPos> {
        let a = self.actor(actor)?;
        let eye = a.location.offset(0.0, EYE_HEIGHT, 0.0);
        let step = a.facing.normalize() * RAY_STEP;
        if step.length_squared() == 0.0 {
            return None;
        }
        let steps = (f64::from(max_distance) / RAY_STEP) as u32;
        let mut at = eye;
        for _ in 0..=steps {
            let cell = at.block();
            if !self.block(cell).is_air() {
                return Some(cell);
            }
            at = at + step;
        }
        None
    }

    fn send_message(&mut self, actor: ActorId, message: &str) {
        self.messages.push((actor, message.to_string()));
    }

    fn apply_status(&mut self, actor: ActorId, effect: StatusEffect) {
        self.statuses.push((actor, effect));
    }

    fn held_item(&self, actor: ActorId) -> Option<ItemStack> {
        let a = self.actor(actor)?;
        a.hotbar[a.selected].clone()
    }

    fn consume_held_item(&mut self, actor: ActorId, amount: u32) -> bool {
        let Some(a) = self.actor_mut(actor) else {
            return false;
        };
        let slot = &mut a.hotbar[a.selected];
        match slot {
            Some(stack) if stack.amount >= amount => {
                stack.take(amount);
                if stack.is_empty() {
                    *slot = None;
                }
                true
            }
            _ => false,
        }
    }

    fn give_item(&mut self, actor: ActorId, mut stack: ItemStack) -> Option<ItemStack> {
        let Some(a) = self.actor_mut(actor) else {
            return Some(stack);
        };
        for held in a.hotbar.iter_mut().flatten() {
            if stack.amount == 0 {
                break;
            }
            if held.is_similar(&stack) && held.amount < MAX_STACK_SIZE {
                let moved = stack.take(MAX_STACK_SIZE - held.amount);
                held.amount += moved;
            }
        }
        for slot in a.hotbar.iter_mut() {
            if stack.amount == 0 {
                break;
            }
            if slot.is_none() {
                let mut placed = stack.clone();
                placed.amount = stack.take(MAX_STACK_SIZE);
                *slot = Some(placed);
            }
        }
        (stack.amount > 0).then_some(stack)
    }

    fn block(&self, pos: BlockPos) -> BlockKind {
        self.blocks
            .get(&pos)
            .copied()
            .unwrap_or_else(|| self.base_block(pos))
    }

    fn set_block(&mut self, pos: BlockPos, kind: BlockKind) {
        if self.base_block(pos) == kind {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, kind);
        }
    }

    fn spawn_object(&mut self, spawn: ObjectSpawn) -> ObjectHandle {
        let handle = ObjectHandle(self.next_object);
        self.next_object += 1;
        self.objects
            .insert(handle, Body::new(spawn.at, spawn.velocity, spawn.gravity));
        self.spawned.push(spawn);
        handle
    }

    fn object_is_valid(&self, handle: ObjectHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    fn object_location(&self, handle: ObjectHandle) -> Option<Location> {
        self.objects.get(&handle).map(|body| body.location)
    }

    fn object_velocity(&self, handle: ObjectHandle) -> Option<Vec3> {
        self.objects.get(&handle).map(|body| body.velocity)
    }

    fn object_on_ground(&self, handle: ObjectHandle) -> bool {
        self.objects.get(&handle).is_some_and(|body| body.on_ground)
    }

    fn object_in_water(&self, handle: ObjectHandle) -> bool {
        self.objects.get(&handle).is_some_and(|body| body.in_water)
    }

    fn remove_object(&mut self, handle: ObjectHandle) {
        self.objects.remove(&handle);
    }

    fn play_sound(&mut self, at: Location, sound: Sound, volume: f32, pitch: f32) {
        self.sounds.push(SoundRecord {
            at,
            sound,
            volume,
            pitch,
        });
    }

    fn create_explosion(&mut self, at: Location, blast: Blast) {
        self.explosions.push((at, blast));
    }

    fn spawn_area_cloud(&mut self, cloud: AreaCloud) {
        self.live_clouds.push(LiveCloud::new(cloud.clone()));
        self.clouds.push(cloud);
    }
}
