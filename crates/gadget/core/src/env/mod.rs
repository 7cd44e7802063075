//! The world collaborator interface and the environment handle threaded
//! through every activation and effect.
//!
//! [`World`] is the only way the core touches the game: actors, terrain,
//! thrown objects and presentation. [`Env`] pairs it with the tick
//! [`Scheduler`] so effects can both mutate the world and defer work.
mod world;

pub use world::{
    AreaCloud, Blast, BlockKind, Color, ObjectSpawn, Particle, Sound, StatusEffect, StatusKind,
    World,
};

use crate::scheduler::Scheduler;

/// Mutable access to the world and the tick scheduler for the duration of a
/// single call.
pub struct Env<'a> {
    pub world: &'a mut dyn World,
    pub scheduler: &'a mut Scheduler,
}

impl<'a> Env<'a> {
    pub fn new(world: &'a mut dyn World, scheduler: &'a mut Scheduler) -> Self {
        Self { world, scheduler }
    }
}
