//! Tear gas canister: a slow lob that leaves a shrinking cloud of poison and
//! nausea where it comes to rest.

use super::{TEAR_GAS_ID, check_positive, check_range, check_throw};
use crate::env::{AreaCloud, Color, Env, Particle, Sound, StatusEffect, StatusKind, World};
use crate::error::ConfigError;
use crate::item::{ItemDefinition, ItemDisplay, ItemId, Material, ProjectileItem};
use crate::projectile::{
    LAUNCH_FAILED_MESSAGE, Landing, LandingParams, LandingRule, ThrowProfile, launch_tracked,
};
use crate::state::{ActorId, Location};
use crate::targeting::AimTargeting;

pub const THROW_MESSAGE: &str = "Tear gas launched!";

/// Shape and payload of the gas cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CloudProfile {
    pub radius: f32,
    /// Negative values shrink the cloud.
    pub radius_per_tick: f32,
    pub duration_ticks: u32,
    pub wait_ticks: u32,
    pub reapplication_delay: u32,
    pub effect_ticks: u32,
    pub color: Color,
    /// Raise applied when the canister ends up inside a solid cell.
    pub lift_when_embedded: f64,
}

impl CloudProfile {
    /// Cloud anchored at `at`, lifted out of the ground if needed.
    pub fn cloud(&self, world: &dyn World, at: Location, source: Option<ActorId>) -> AreaCloud {
        let anchor = if world.block(at.block()).is_solid() {
            at.offset(0.0, self.lift_when_embedded, 0.0)
        } else {
            at
        };
        AreaCloud {
            at: anchor,
            source,
            duration_ticks: self.duration_ticks,
            radius: self.radius,
            radius_per_tick: self.radius_per_tick,
            wait_ticks: self.wait_ticks,
            reapplication_delay: self.reapplication_delay,
            effects: vec![
                StatusEffect::new(StatusKind::Poison, self.effect_ticks, 0),
                StatusEffect::new(StatusKind::Nausea, self.effect_ticks, 0),
            ],
            particle: Particle::Smoke,
            color: self.color,
        }
    }
}

impl Default for CloudProfile {
    fn default() -> Self {
        Self {
            radius: 3.0,
            radius_per_tick: -0.01,
            duration_ticks: 200,
            wait_ticks: 5,
            reapplication_delay: 20,
            effect_ticks: 80,
            color: Color::rgb(150, 150, 150),
            lift_when_embedded: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TearGasTuning {
    pub range: u32,
    pub throw: ThrowProfile,
    pub landing: LandingParams,
    pub cloud: CloudProfile,
}

impl TearGasTuning {
    pub const STATIONARY_SPEED_SQUARED: f64 = 0.005;

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(TEAR_GAS_ID, self.range)?;
        check_throw(TEAR_GAS_ID, &self.throw)?;
        check_positive(TEAR_GAS_ID, "cloud.radius", f64::from(self.cloud.radius))?;
        self.landing.validate(TEAR_GAS_ID)
    }
}

impl Default for TearGasTuning {
    fn default() -> Self {
        Self {
            range: AimTargeting::DEFAULT_RANGE,
            throw: ThrowProfile {
                speed: 0.9,
                lift: 0.1,
                visual: Material::GlassBottle,
                tint: None,
            },
            landing: LandingParams::new(LandingRule::Slow {
                max_speed_squared: Self::STATIONARY_SPEED_SQUARED,
            }),
            cloud: CloudProfile::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TearGas {
    targeting: AimTargeting,
    throw: ThrowProfile,
    landing: LandingParams,
    cloud: CloudProfile,
}

impl TearGas {
    pub fn new(tuning: &TearGasTuning) -> Self {
        Self {
            targeting: AimTargeting::new(tuning.range),
            throw: tuning.throw,
            landing: tuning.landing.clone(),
            cloud: tuning.cloud,
        }
    }

    pub fn display() -> ItemDisplay {
        ItemDisplay::new(
            Material::GlassBottle,
            "Tear Gas Canister",
            [
                "A non-lethal projectile that",
                "causes temporary blindness",
                "and disorientation in an area.",
                "",
                "(( Right-click to use. ))",
            ],
        )
    }

    pub fn definition(tuning: &TearGasTuning) -> Result<ItemDefinition, ConfigError> {
        Ok(ItemDefinition::projectile(
            ItemId::parse(TEAR_GAS_ID)?,
            Self::display(),
            Self::new(tuning),
        ))
    }
}

fn release(cloud: CloudProfile, thrower: ActorId, env: &mut Env<'_>, landing: Landing) {
    env.world.play_sound(landing.location, Sound::GlassBreak, 1.0, 1.5);
    let gas = cloud.cloud(env.world, landing.location, Some(thrower));
    env.world.spawn_area_cloud(gas);
    env.world.remove_object(landing.object);
}

impl ProjectileItem for TearGas {
    fn compute_target(&self, actor: ActorId, world: &dyn World) -> Option<Location> {
        self.targeting.target(actor, world)
    }

    fn on_throw(&self, actor: ActorId, target: Location, env: &mut Env<'_>) {
        let cloud = self.cloud;
        let launched =
            launch_tracked(env, actor, target, &self.throw, &self.landing, move |env, landing| {
                release(cloud, actor, env, landing)
            });
        if launched.is_none() {
            env.world.send_message(actor, LAUNCH_FAILED_MESSAGE);
            return;
        }
        env.world.send_message(actor, THROW_MESSAGE);
        if let Some(at) = env.world.actor_location(actor) {
            env.world.play_sound(at, Sound::EggThrow, 0.5, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::BlockKind;
    use crate::scheduler::Scheduler;
    use crate::state::{BlockPos, ObjectHandle, Vec3};
    use crate::testing::ScriptedWorld;

    #[test]
    fn cloud_is_lifted_out_of_solid_cells() {
        let mut world = ScriptedWorld::default();
        world.set_block(BlockPos::new(0, 63, 0), BlockKind::Solid);
        let profile = CloudProfile::default();

        let embedded = profile.cloud(&world, Location::new(0.5, 63.75, 0.5), None);
        assert_eq!(embedded.at, Location::new(0.5, 64.25, 0.5));

        let resting = profile.cloud(&world, Location::new(0.5, 64.0, 0.5), None);
        assert_eq!(resting.at, Location::new(0.5, 64.0, 0.5));
        assert_eq!(resting.effects.len(), 2);
        assert!(resting.effects.iter().all(|e| e.duration_ticks == 80 && e.amplifier == 0));
    }

    #[test]
    fn canister_releases_gas_once_it_stops_moving() {
        let mut world = ScriptedWorld::default();
        let mut scheduler = Scheduler::new();
        let alex = world.add_actor("alex");
        world.aim_at(alex, BlockPos::new(0, 63, 8), 8);

        let gas = TearGas::new(&TearGasTuning::default());
        let target = gas.compute_target(alex, &world).expect("aimed block");
        gas.on_throw(alex, target, &mut Env::new(&mut world, &mut scheduler));
        assert_eq!(world.messages, vec![(alex, THROW_MESSAGE.to_string())]);
        assert_eq!(world.sounds[0].1, Sound::EggThrow);

        let canister = ObjectHandle(0);
        let launch_speed = world.spawned[0].velocity.length_squared();
        assert!(launch_speed > TearGasTuning::STATIONARY_SPEED_SQUARED);

        // Still rolling until tick 14, then at rest.
        for tick in 1..=15 {
            if tick == 14 {
                world.set_velocity(canister, Vec3::ZERO);
            }
            scheduler.tick(&mut world);
            if tick < 15 {
                assert!(world.clouds.is_empty(), "cloud too early at tick {tick}");
            }
        }
        assert_eq!(world.clouds.len(), 1);
        assert_eq!(world.clouds[0].source, Some(alex));
        assert!(!world.object_is_valid(canister));
        assert_eq!(scheduler.live_trackers(), 0);
    }

    #[test]
    fn failed_launch_skips_the_throw_feedback() {
        let mut world = ScriptedWorld::default();
        let mut scheduler = Scheduler::new();
        let ghost = ActorId(3);

        let gas = TearGas::new(&TearGasTuning::default());
        let target = Location::new(0.5, 64.0, 8.5);
        gas.on_throw(ghost, target, &mut Env::new(&mut world, &mut scheduler));

        assert!(world.spawned.is_empty());
        assert!(world.sounds.is_empty());
        assert_eq!(scheduler.live_trackers(), 0);
        assert_eq!(world.messages, vec![(ghost, LAUNCH_FAILED_MESSAGE.to_string())]);
    }
}
