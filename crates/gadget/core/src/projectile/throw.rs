use crate::env::{Color, ObjectSpawn, World};
use crate::item::Material;
use crate::state::{ActorId, Location, ObjectHandle, Vec3};

/// How an item leaves the thrower's hand.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrowProfile {
    /// Launch speed in blocks per tick.
    pub speed: f64,
    /// Extra upward velocity added after aiming, giving the arc.
    pub lift: f64,
    pub visual: Material,
    pub tint: Option<Color>,
}

impl ThrowProfile {
    /// Velocity aimed from `from` at `to`, scaled to `speed`, plus `lift`.
    pub fn launch_velocity(&self, from: Location, to: Location) -> Vec3 {
        let mut velocity = (to - from).normalize() * self.speed;
        velocity.y += self.lift;
        velocity
    }

    /// Spawns the thrown object at the actor's eye, aimed at `target`.
    ///
    /// Returns `None` when the actor has no eye location (e.g. logged out
    /// between targeting and throwing).
    pub fn launch(
        &self,
        world: &mut dyn World,
        actor: ActorId,
        target: Location,
    ) -> Option<ObjectHandle> {
        let eye = world.actor_eye_location(actor)?;
        Some(world.spawn_object(ObjectSpawn {
            at: eye,
            velocity: self.launch_velocity(eye, target),
            visual: self.visual,
            tint: self.tint,
            gravity: true,
            invulnerable: true,
            pickable: false,
        }))
    }
}
