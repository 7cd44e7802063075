//! Hand-driven [`World`] for unit tests: objects only move when a test says
//! so, and every side effect is recorded.

use std::collections::HashMap;

use crate::env::{AreaCloud, Blast, BlockKind, ObjectSpawn, Sound, StatusEffect, World};
use crate::item::ItemStack;
use crate::state::{ActorId, BlockPos, Location, ObjectHandle, Vec3};

const EYE_HEIGHT: f64 = 1.62;

struct ScriptedActor {
    name: String,
    location: Location,
    aim: Option<(BlockPos, u32)>,
    held: Option<ItemStack>,
}

#[derive(Clone, Copy)]
struct ScriptedObject {
    location: Location,
    velocity: Vec3,
    grounded: bool,
    in_water: bool,
}

#[derive(Default)]
pub(crate) struct ScriptedWorld {
    next_object: u64,
    actors: Vec<ScriptedActor>,
    blocks: HashMap<BlockPos, BlockKind>,
    objects: HashMap<ObjectHandle, ScriptedObject>,
    pub spawned: Vec<ObjectSpawn>,
    pub messages: Vec<(ActorId, String)>,
    pub sounds: Vec<(Location, Sound)>,
    pub explosions: Vec<(Location, Blast)>,
    pub clouds: Vec<AreaCloud>,
    pub statuses: Vec<(ActorId, StatusEffect)>,
}

impl ScriptedWorld {
    pub fn add_actor(&mut self, name: &str) -> ActorId {
        self.actors.push(ScriptedActor {
            name: name.to_string(),
            location: Location::new(0.5, 64.0, 0.5),
            aim: None,
            held: None,
        });
        ActorId(self.actors.len() as u32 - 1)
    }

    /// Makes `actor` look at `block`, which is `distance` blocks away.
    pub fn aim_at(&mut self, actor: ActorId, block: BlockPos, distance: u32) {
        self.actors[actor.0 as usize].aim = Some((block, distance));
    }

    pub fn fill(&mut self, from: BlockPos, to: BlockPos, kind: BlockKind) {
        for x in from.x..=to.x {
            for y in from.y..=to.y {
                for z in from.z..=to.z {
                    self.set_block(BlockPos::new(x, y, z), kind);
                }
            }
        }
    }

    pub fn spawn_scripted(&mut self) -> ObjectHandle {
        self.insert_object(Location::new(0.5, 70.0, 0.5), Vec3::new(0.0, -0.5, 0.0))
    }

    pub fn set_grounded(&mut self, handle: ObjectHandle, grounded: bool) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.grounded = grounded;
        }
    }

    pub fn set_velocity(&mut self, handle: ObjectHandle, velocity: Vec3) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.velocity = velocity;
        }
    }

    pub fn move_object(&mut self, handle: ObjectHandle, location: Location) {
        if let Some(object) = self.objects.get_mut(&handle) {
            object.location = location;
        }
    }

    pub fn despawn(&mut self, handle: ObjectHandle) {
        self.objects.remove(&handle);
    }

    fn insert_object(&mut self, location: Location, velocity: Vec3) -> ObjectHandle {
        let handle = ObjectHandle(self.next_object);
        self.next_object += 1;
        self.objects.insert(
            handle,
            ScriptedObject {
                location,
                velocity,
                grounded: false,
                in_water: false,
            },
        );
        handle
    }

    fn actor(&self, actor: ActorId) -> Option<&ScriptedActor> {
        self.actors.get(actor.0 as usize)
    }
}

impl World for ScriptedWorld {
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
        let (block, distance) = self.actor(actor)?.aim?;
        (distance <= max_distance).then_some(block)
    }

    fn send_message(&mut self, actor: ActorId, message: &str) {
        self.messages.push((actor, message.to_string()));
    }

    fn apply_status(&mut self, actor: ActorId, effect: StatusEffect) {
        self.statuses.push((actor, effect));
    }

    fn held_item(&self, actor: ActorId) -> Option<ItemStack> {
        self.actor(actor)?.held.clone()
    }

    fn consume_held_item(&mut self, actor: ActorId, amount: u32) -> bool {
        let Some(slot) = self.actors.get_mut(actor.0 as usize).map(|a| &mut a.held) else {
            return false;
        };
        match slot {
            Some(stack) if stack.amount >= amount => {
                stack.take(amount);
                if stack.amount == 0 {
                    *slot = None;
                }
                true
            }
            _ => false,
        }
    }

    fn give_item(&mut self, actor: ActorId, stack: ItemStack) -> Option<ItemStack> {
        let Some(scripted) = self.actors.get_mut(actor.0 as usize) else {
            return Some(stack);
        };
        match &mut scripted.held {
            slot @ None => {
                *slot = Some(stack);
                None
            }
            Some(held) if held.is_similar(&stack) => {
                held.amount += stack.amount;
                None
            }
            Some(_) => Some(stack),
        }
    }

    fn block(&self, pos: BlockPos) -> BlockKind {
        self.blocks.get(&pos).copied().unwrap_or(BlockKind::Air)
    }

    fn set_block(&mut self, pos: BlockPos, kind: BlockKind) {
        if kind == BlockKind::Air {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, kind);
        }
    }

    fn spawn_object(&mut self, spawn: ObjectSpawn) -> ObjectHandle {
        self.spawned.push(spawn);
        self.insert_object(spawn.at, spawn.velocity)
    }

    fn object_is_valid(&self, handle: ObjectHandle) -> bool {
        self.objects.contains_key(&handle)
    }

    fn object_location(&self, handle: ObjectHandle) -> Option<Location> {
        self.objects.get(&handle).map(|o| o.location)
    }

    fn object_velocity(&self, handle: ObjectHandle) -> Option<Vec3> {
        self.objects.get(&handle).map(|o| o.velocity)
    }

    fn object_on_ground(&self, handle: ObjectHandle) -> bool {
        self.objects.get(&handle).is_some_and(|o| o.grounded)
    }

    fn object_in_water(&self, handle: ObjectHandle) -> bool {
        self.objects.get(&handle).is_some_and(|o| o.in_water)
    }

    fn remove_object(&mut self, handle: ObjectHandle) {
        self.objects.remove(&handle);
    }

    fn play_sound(&mut self, at: Location, sound: Sound, _volume: f32, _pitch: f32) {
        self.sounds.push((at, sound));
    }

    fn create_explosion(&mut self, at: Location, blast: Blast) {
        self.explosions.push((at, blast));
    }

    fn spawn_area_cloud(&mut self, cloud: AreaCloud) {
        self.clouds.push(cloud);
    }
}
