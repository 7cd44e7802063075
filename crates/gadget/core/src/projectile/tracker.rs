//! Per-object landing state machine.

use std::fmt;

use super::landing::LandingParams;
use crate::env::Env;
use crate::state::{Location, ObjectHandle};

/// Where and on which object a tracker fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    pub object: ObjectHandle,
    pub location: Location,
}

/// Deferred effect run when a tracked object lands.
pub type LandingCallback = Box<dyn FnOnce(&mut Env<'_>, Landing) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TrackerPhase {
    InFlight,
    Settling,
    Resolved,
}

/// How a tracker reached [`TrackerPhase::Resolved`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// The landing rule held for the required number of samples.
    Landed(Location),
    /// The object outlived the failsafe; the callback ran anyway.
    Failsafe(Location),
    /// The object disappeared first; the callback never ran.
    Invalidated,
}

/// Polls one thrown object every tick and runs its landing callback at most
/// once.
///
/// Each [`ProjectileTracker::tick`] performs, in order: validity check, flight
/// gate, stationary sample, landing check, failsafe check. The callback
/// receives the same [`Landing`] whether the object settled cleanly or the
/// failsafe fired, and is dropped unrun if the object is invalidated first.
pub struct ProjectileTracker {
    object: ObjectHandle,
    params: LandingParams,
    ticks_alive: u32,
    ticks_stationary: u32,
    phase: TrackerPhase,
    resolution: Option<Resolution>,
    on_land: Option<LandingCallback>,
}

impl ProjectileTracker {
    pub fn new(
        object: ObjectHandle,
        params: LandingParams,
        on_land: impl FnOnce(&mut Env<'_>, Landing) + Send + 'static,
    ) -> Self {
        Self {
            object,
            params,
            ticks_alive: 0,
            ticks_stationary: 0,
            phase: TrackerPhase::InFlight,
            resolution: None,
            on_land: Some(Box::new(on_land)),
        }
    }

    pub fn object(&self) -> ObjectHandle {
        self.object
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn ticks_alive(&self) -> u32 {
        self.ticks_alive
    }

    pub fn ticks_stationary(&self) -> u32 {
        self.ticks_stationary
    }

    /// Advances the tracker by one tick. Polling a resolved tracker is a no-op.
    pub fn tick(&mut self, env: &mut Env<'_>) -> TrackerPhase {
        if self.phase == TrackerPhase::Resolved {
            return self.phase;
        }

        if !env.world.object_is_valid(self.object) {
            return self.invalidate();
        }

        self.ticks_alive += 1;
        if self.ticks_alive < self.params.min_flight_ticks {
            return self.phase;
        }

        if self.params.rule.is_landed(&*env.world, self.object) {
            self.ticks_stationary += 1;
            self.phase = TrackerPhase::Settling;
        } else {
            self.ticks_stationary = 0;
            self.phase = TrackerPhase::InFlight;
        }

        if self.ticks_stationary >= self.params.required_stationary_ticks {
            return self.fire(env, Resolution::Landed);
        }

        if self.ticks_alive > self.params.failsafe_ticks {
            return self.fire(env, Resolution::Failsafe);
        }

        self.phase
    }

    fn fire(&mut self, env: &mut Env<'_>, resolution: fn(Location) -> Resolution) -> TrackerPhase {
        let Some(location) = env.world.object_location(self.object) else {
            return self.invalidate();
        };

        self.phase = TrackerPhase::Resolved;
        self.resolution = Some(resolution(location));
        if let Some(on_land) = self.on_land.take() {
            on_land(
                env,
                Landing {
                    object: self.object,
                    location,
                },
            );
        }
        self.phase
    }

    fn invalidate(&mut self) -> TrackerPhase {
        self.phase = TrackerPhase::Resolved;
        self.resolution = Some(Resolution::Invalidated);
        self.on_land = None;
        self.phase
    }
}

impl fmt::Debug for ProjectileTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectileTracker")
            .field("object", &self.object)
            .field("ticks_alive", &self.ticks_alive)
            .field("ticks_stationary", &self.ticks_stationary)
            .field("phase", &self.phase)
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}
