//! Riot shield: brace for impact. Immediate use, never consumed.

use super::RIOT_SHIELD_ID;
use crate::env::{Env, Sound, StatusEffect, StatusKind};
use crate::error::ConfigError;
use crate::item::{ItemDefinition, ItemDisplay, ItemId, Material, UtilityItem};
use crate::state::ActorId;

pub const BRACE_MESSAGE: &str = "Shield raised!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiotShieldTuning {
    pub duration_ticks: u32,
    pub resistance_amplifier: u8,
    pub slowness_amplifier: u8,
}

impl RiotShieldTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_ticks == 0 {
            return Err(ConfigError::NonPositive {
                item: RIOT_SHIELD_ID,
                field: "duration_ticks",
            });
        }
        Ok(())
    }
}

impl Default for RiotShieldTuning {
    fn default() -> Self {
        Self {
            duration_ticks: 100,
            resistance_amplifier: 1,
            slowness_amplifier: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiotShield {
    tuning: RiotShieldTuning,
}

impl RiotShield {
    pub fn new(tuning: RiotShieldTuning) -> Self {
        Self { tuning }
    }

    pub fn display() -> ItemDisplay {
        ItemDisplay::new(
            Material::Shield,
            "Riot Shield",
            [
                "Brace to shrug off incoming",
                "damage at the cost of speed.",
                "",
                "(( Right-click to use. ))",
            ],
        )
    }

    pub fn definition(tuning: &RiotShieldTuning) -> Result<ItemDefinition, ConfigError> {
        Ok(ItemDefinition::immediate(
            ItemId::parse(RIOT_SHIELD_ID)?,
            Self::display(),
            Self::new(*tuning),
        ))
    }
}

impl UtilityItem for RiotShield {
    fn activate(&self, actor: ActorId, env: &mut Env<'_>) {
        let RiotShieldTuning {
            duration_ticks,
            resistance_amplifier,
            slowness_amplifier,
        } = self.tuning;
        env.world.apply_status(
            actor,
            StatusEffect::new(StatusKind::Resistance, duration_ticks, resistance_amplifier),
        );
        env.world.apply_status(
            actor,
            StatusEffect::new(StatusKind::Slowness, duration_ticks, slowness_amplifier),
        );
        if let Some(at) = env.world.actor_location(actor) {
            env.world.play_sound(at, Sound::ShieldBlock, 1.0, 1.0);
        }
        env.world.send_message(actor, BRACE_MESSAGE);
    }
}
