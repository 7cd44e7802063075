//! Molotov cocktail: a thrown bottle that sets a square patch of ground on
//! fire, then puts it out again.

use super::{MOLOTOV_ID, check_range, check_throw};
use crate::env::{BlockKind, Color, Env, Sound, World};
use crate::error::ConfigError;
use crate::item::{ItemDefinition, ItemDisplay, ItemId, Material, ProjectileItem};
use crate::projectile::{
    LAUNCH_FAILED_MESSAGE, Landing, LandingParams, LandingRule, ThrowProfile, launch_tracked,
};
use crate::state::{ActorId, BlockPos, Location};
use crate::targeting::AimTargeting;

pub const THROW_MESSAGE: &str = "Molotov thrown!";

const ORANGE: Color = Color::rgb(255, 165, 0);

/// Square of fire placed around the landing point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirePatch {
    /// Half-width of the square; 2 gives 5x5.
    pub radius: i32,
    /// Ticks before the patch is extinguished.
    pub duration_ticks: u32,
}

impl FirePatch {
    /// Sets fire to every air cell sitting on solid ground within the patch
    /// and returns the cells that were ignited.
    pub fn ignite(&self, world: &mut dyn World, at: Location) -> Vec<BlockPos> {
        let mut ignited = Vec::new();
        for dx in -self.radius..=self.radius {
            for dz in -self.radius..=self.radius {
                let below = at.offset(f64::from(dx), -1.0, f64::from(dz)).block();
                let cell = below.up();
                if world.block(below).is_solid() && world.block(cell).is_air() {
                    world.set_block(cell, BlockKind::Fire);
                    ignited.push(cell);
                }
            }
        }
        ignited
    }

    /// Clears the given cells, leaving alone any that are no longer burning.
    pub fn extinguish(world: &mut dyn World, cells: &[BlockPos]) {
        for &cell in cells {
            if world.block(cell) == BlockKind::Fire {
                world.set_block(cell, BlockKind::Air);
            }
        }
    }
}

impl Default for FirePatch {
    fn default() -> Self {
        Self {
            radius: 2,
            duration_ticks: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MolotovTuning {
    pub range: u32,
    pub throw: ThrowProfile,
    pub landing: LandingParams,
    pub fire: FirePatch,
}

impl MolotovTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(MOLOTOV_ID, self.range)?;
        check_throw(MOLOTOV_ID, &self.throw)?;
        self.landing.validate(MOLOTOV_ID)
    }
}

impl Default for MolotovTuning {
    fn default() -> Self {
        Self {
            range: AimTargeting::DEFAULT_RANGE,
            throw: ThrowProfile {
                speed: 1.5,
                lift: 0.3,
                visual: Material::SplashPotion,
                tint: Some(ORANGE),
            },
            landing: LandingParams::new(LandingRule::All(vec![
                LandingRule::SupportBelow,
                LandingRule::Contact,
            ])),
            fire: FirePatch::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Molotov {
    targeting: AimTargeting,
    throw: ThrowProfile,
    landing: LandingParams,
    fire: FirePatch,
}

impl Molotov {
    pub fn new(tuning: &MolotovTuning) -> Self {
        Self {
            targeting: AimTargeting::new(tuning.range),
            throw: tuning.throw,
            landing: tuning.landing.clone(),
            fire: tuning.fire,
        }
    }

    pub fn display() -> ItemDisplay {
        ItemDisplay::new(
            Material::RedstoneTorch,
            "Molotov Cocktail",
            [
                "A crude explosive that causes",
                "a short-lived patch of fire.",
                "",
                "(( Right-click to use. ))",
            ],
        )
    }

    pub fn definition(tuning: &MolotovTuning) -> Result<ItemDefinition, ConfigError> {
        Ok(ItemDefinition::projectile(
            ItemId::parse(MOLOTOV_ID)?,
            Self::display(),
            Self::new(tuning),
        ))
    }
}

/// Landing effect: shatter, ignite, schedule the single revert, drop the
/// bottle.
fn burst(fire: FirePatch, env: &mut Env<'_>, landing: Landing) {
    env.world.play_sound(landing.location, Sound::GlassBreak, 1.0, 1.5);
    let ignited = fire.ignite(env.world, landing.location);
    if !ignited.is_empty() {
        env.scheduler.schedule_once(fire.duration_ticks, move |env| {
            FirePatch::extinguish(env.world, &ignited);
        });
    }
    env.world.remove_object(landing.object);
}

impl ProjectileItem for Molotov {
    fn compute_target(&self, actor: ActorId, world: &dyn World) -> Option<Location> {
        self.targeting.target(actor, world)
    }

    fn on_throw(&self, actor: ActorId, target: Location, env: &mut Env<'_>) {
        let fire = self.fire;
        let launched =
            launch_tracked(env, actor, target, &self.throw, &self.landing, move |env, landing| {
                burst(fire, env, landing)
            });
        let message = match launched {
            Some(_) => THROW_MESSAGE,
            None => LAUNCH_FAILED_MESSAGE,
        };
        env.world.send_message(actor, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use crate::testing::ScriptedWorld;

    fn floor(world: &mut ScriptedWorld) {
        world.fill(BlockPos::new(-8, 63, -8), BlockPos::new(8, 63, 8), BlockKind::Solid);
    }

    #[test]
    fn patch_only_burns_air_above_solid_ground() {
        let mut world = ScriptedWorld::default();
        floor(&mut world);
        // A wall cell and a hole in the floor inside the patch.
        world.set_block(BlockPos::new(1, 64, 1), BlockKind::Solid);
        world.set_block(BlockPos::new(-1, 63, 0), BlockKind::Air);

        let ignited = FirePatch::default().ignite(&mut world, Location::new(0.5, 64.2, 0.5));
        assert_eq!(ignited.len(), 23);
        assert_eq!(world.block(BlockPos::new(0, 64, 0)), BlockKind::Fire);
        assert_eq!(world.block(BlockPos::new(1, 64, 1)), BlockKind::Solid);
        assert_eq!(world.block(BlockPos::new(-1, 64, 0)), BlockKind::Air);
        assert_eq!(world.block(BlockPos::new(3, 64, 0)), BlockKind::Air);
    }

    #[test]
    fn landing_burns_then_reverts_once() {
        let mut world = ScriptedWorld::default();
        let mut scheduler = Scheduler::new();
        floor(&mut world);
        let alex = world.add_actor("alex");
        world.aim_at(alex, BlockPos::new(0, 63, 6), 6);

        let molotov = Molotov::new(&MolotovTuning::default());
        let target = molotov.compute_target(alex, &world).expect("aimed block");
        molotov.on_throw(alex, target, &mut Env::new(&mut world, &mut scheduler));
        assert_eq!(world.spawned.len(), 1);
        assert_eq!(world.spawned[0].tint, Some(ORANGE));
        assert_eq!(scheduler.live_trackers(), 1);

        // The bottle is resting on the floor from the first sample onward.
        let bottle = crate::state::ObjectHandle(0);
        world.move_object(bottle, Location::new(0.5, 64.0, 6.5));
        world.set_grounded(bottle, true);

        let mut fired_at = None;
        for tick in 1..=20 {
            let report = scheduler.tick(&mut world);
            if !report.resolved.is_empty() {
                fired_at = Some(tick);
                break;
            }
        }
        assert_eq!(fired_at, Some(11));
        assert!(!world.object_is_valid(bottle));
        assert_eq!(world.block(BlockPos::new(0, 64, 6)), BlockKind::Fire);
        assert_eq!(world.sounds.last().map(|(_, s)| *s), Some(Sound::GlassBreak));
        assert_eq!(scheduler.pending_tasks(), 1);

        // Something else replaced one burning cell before the revert.
        world.set_block(BlockPos::new(1, 64, 6), BlockKind::Solid);

        for _ in 0..59 {
            scheduler.tick(&mut world);
        }
        assert_eq!(world.block(BlockPos::new(0, 64, 6)), BlockKind::Fire);
        assert_eq!(scheduler.tick(&mut world).tasks_run, 1);
        assert_eq!(world.block(BlockPos::new(0, 64, 6)), BlockKind::Air);
        assert_eq!(world.block(BlockPos::new(1, 64, 6)), BlockKind::Solid);
        assert_eq!(scheduler.pending_tasks(), 0);
    }

    #[test]
    fn failed_launch_is_reported_to_the_thrower() {
        let mut world = ScriptedWorld::default();
        let mut scheduler = Scheduler::new();
        // Never added, so there is no eye to throw from.
        let ghost = ActorId(7);

        let molotov = Molotov::new(&MolotovTuning::default());
        let target = Location::new(0.5, 64.0, 6.5);
        molotov.on_throw(ghost, target, &mut Env::new(&mut world, &mut scheduler));

        assert!(world.spawned.is_empty());
        assert_eq!(scheduler.live_trackers(), 0);
        assert_eq!(world.messages, vec![(ghost, LAUNCH_FAILED_MESSAGE.to_string())]);
    }

    #[test]
    fn defaults_validate() {
        assert!(MolotovTuning::default().validate().is_ok());
    }
}
