//! Frag grenade: a small non-destructive blast at the aimed block.
//!
//! The grenade uses the projectile protocol only for its target calculation
//! and unit consumption. It does not spawn a tracked object; the blast goes
//! off at the aimed point as soon as the throw is accepted.

use super::{GRENADE_ID, check_positive, check_range};
use crate::env::{Blast, Env, Sound, World};
use crate::error::ConfigError;
use crate::item::{ItemDefinition, ItemDisplay, ItemId, Material, ProjectileItem};
use crate::state::{ActorId, Location};
use crate::targeting::AimTargeting;

pub const THROW_MESSAGE: &str = "Grenade thrown!";

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrenadeTuning {
    pub range: u32,
    pub blast_power: f32,
}

impl GrenadeTuning {
    pub const DEFAULT_BLAST_POWER: f32 = 2.0;

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(GRENADE_ID, self.range)?;
        check_positive(GRENADE_ID, "blast_power", f64::from(self.blast_power))
    }
}

impl Default for GrenadeTuning {
    fn default() -> Self {
        Self {
            range: AimTargeting::DEFAULT_RANGE,
            blast_power: Self::DEFAULT_BLAST_POWER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grenade {
    targeting: AimTargeting,
    blast: Blast,
}

impl Grenade {
    pub fn new(tuning: &GrenadeTuning) -> Self {
        Self {
            targeting: AimTargeting::new(tuning.range),
            blast: Blast {
                power: tuning.blast_power,
                set_fire: false,
                break_blocks: false,
            },
        }
    }

    pub fn display() -> ItemDisplay {
        ItemDisplay::new(
            Material::Cobblestone,
            "Frag Grenade",
            [
                "A simple timed explosive that",
                "causes a small, non-destructive blast.",
                "",
                "Right-click to use.",
            ],
        )
    }

    pub fn definition(tuning: &GrenadeTuning) -> Result<ItemDefinition, ConfigError> {
        Ok(ItemDefinition::projectile(
            ItemId::parse(GRENADE_ID)?,
            Self::display(),
            Self::new(tuning),
        ))
    }
}

impl ProjectileItem for Grenade {
    fn compute_target(&self, actor: ActorId, world: &dyn World) -> Option<Location> {
        self.targeting.target(actor, world)
    }

    fn on_throw(&self, actor: ActorId, target: Location, env: &mut Env<'_>) {
        env.world.send_message(actor, THROW_MESSAGE);
        env.world.play_sound(target, Sound::GenericExplode, 3.0, 1.5);
        env.world.create_explosion(target, self.blast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use crate::state::BlockPos;
    use crate::testing::ScriptedWorld;

    #[test]
    fn detonates_at_the_aimed_block_centre() {
        let mut world = ScriptedWorld::default();
        let mut scheduler = Scheduler::new();
        let alex = world.add_actor("alex");
        world.aim_at(alex, BlockPos::new(4, 63, 9), 12);

        let grenade = Grenade::new(&GrenadeTuning::default());
        let target = grenade.compute_target(alex, &world).expect("aimed block");
        grenade.on_throw(alex, target, &mut Env::new(&mut world, &mut scheduler));

        assert_eq!(world.explosions.len(), 1);
        let (at, blast) = world.explosions[0];
        assert_eq!(at, Location::new(4.5, 63.5, 9.5));
        assert!(!blast.set_fire && !blast.break_blocks);
        assert_eq!(world.sounds, vec![(at, Sound::GenericExplode)]);
        assert_eq!(world.messages, vec![(alex, THROW_MESSAGE.to_string())]);
        assert!(world.spawned.is_empty());
        assert_eq!(scheduler.live_trackers(), 0);
    }

    #[test]
    fn target_out_of_range_is_rejected() {
        let mut world = ScriptedWorld::default();
        let alex = world.add_actor("alex");
        world.aim_at(alex, BlockPos::new(0, 63, 40), 40);

        let short = Grenade::new(&GrenadeTuning {
            range: 20,
            ..GrenadeTuning::default()
        });
        assert!(short.compute_target(alex, &world).is_none());
    }
}
