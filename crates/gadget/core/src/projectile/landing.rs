use crate::env::World;
use crate::error::ConfigError;
use crate::state::ObjectHandle;

/// Per-sample test of whether a thrown object has come to rest.
///
/// Rules compose, so each item can pick the notion of "landed" that suits its
/// visual: a bottle that skids is judged by speed, a burning rag by what is
/// underneath it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LandingRule {
    /// The cell directly below the object is not air.
    SupportBelow,
    /// The object touches the ground or sits in water.
    Contact,
    /// Squared speed is below the threshold.
    Slow { max_speed_squared: f64 },
    All(Vec<LandingRule>),
    Any(Vec<LandingRule>),
}

impl LandingRule {
    pub fn is_landed(&self, world: &dyn World, object: ObjectHandle) -> bool {
        match self {
            LandingRule::SupportBelow => world
                .object_location(object)
                .is_some_and(|at| !world.block(at.block().down()).is_air()),
            LandingRule::Contact => world.object_on_ground(object) || world.object_in_water(object),
            LandingRule::Slow { max_speed_squared } => world
                .object_velocity(object)
                .is_some_and(|v| v.length_squared() < *max_speed_squared),
            LandingRule::All(rules) => rules.iter().all(|rule| rule.is_landed(world, object)),
            LandingRule::Any(rules) => rules.iter().any(|rule| rule.is_landed(world, object)),
        }
    }
}

/// Thresholds and predicate driving a [`super::ProjectileTracker`].
///
/// - `min_flight_ticks`: samples before this age are ignored, so an object
///   brushing a wall right after launch does not trigger.
/// - `required_stationary_ticks`: consecutive landed samples needed.
/// - `failsafe_ticks`: the tracker force-resolves once the object is older.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandingParams {
    pub min_flight_ticks: u32,
    pub required_stationary_ticks: u32,
    pub failsafe_ticks: u32,
    pub rule: LandingRule,
}

impl LandingParams {
    pub const DEFAULT_MIN_FLIGHT_TICKS: u32 = 10;
    pub const DEFAULT_REQUIRED_STATIONARY_TICKS: u32 = 2;
    pub const DEFAULT_FAILSAFE_TICKS: u32 = 60;

    pub fn new(rule: LandingRule) -> Self {
        Self {
            min_flight_ticks: Self::DEFAULT_MIN_FLIGHT_TICKS,
            required_stationary_ticks: Self::DEFAULT_REQUIRED_STATIONARY_TICKS,
            failsafe_ticks: Self::DEFAULT_FAILSAFE_TICKS,
            rule,
        }
    }

    pub fn with_thresholds(
        mut self,
        min_flight: u32,
        required_stationary: u32,
        failsafe: u32,
    ) -> Self {
        self.min_flight_ticks = min_flight;
        self.required_stationary_ticks = required_stationary;
        self.failsafe_ticks = failsafe;
        self
    }

    /// # Errors
    ///
    /// Rejects a zero stationary requirement and a failsafe shorter than the
    /// flight gate (the failsafe is only evaluated past the gate).
    pub fn validate(&self, item: &'static str) -> Result<(), ConfigError> {
        if self.required_stationary_ticks == 0 {
            return Err(ConfigError::ZeroStationaryTicks { item });
        }
        if self.failsafe_ticks < self.min_flight_ticks {
            return Err(ConfigError::FailsafeBeforeFlight {
                item,
                failsafe: self.failsafe_ticks,
                min_flight: self.min_flight_ticks,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(LandingParams::new(LandingRule::Contact).validate("test").is_ok());
    }

    #[test]
    fn rejects_inconsistent_thresholds() {
        let zero = LandingParams::new(LandingRule::Contact).with_thresholds(10, 0, 60);
        assert_eq!(
            zero.validate("test"),
            Err(ConfigError::ZeroStationaryTicks { item: "test" })
        );

        let early = LandingParams::new(LandingRule::Contact).with_thresholds(10, 2, 5);
        assert!(matches!(
            early.validate("test"),
            Err(ConfigError::FailsafeBeforeFlight { failsafe: 5, min_flight: 10, .. })
        ));
    }
}
