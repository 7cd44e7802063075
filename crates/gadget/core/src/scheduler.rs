//! Tick driver for trackers and one-shot deferred tasks.
//!
//! Everything runs on one cooperative timeline: the host calls
//! [`Scheduler::tick`] once per server tick and nothing here blocks.
//! "Waiting" always means parking work until a later tick.

use std::fmt;

use crate::env::{Env, World};
use crate::projectile::{ProjectileTracker, Resolution, TrackerPhase};
use crate::state::Tick;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerId(pub u64);

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tracker#{}", self.0)
    }
}

/// Work to run once at a later tick.
pub type DeferredTask = Box<dyn FnOnce(&mut Env<'_>) + Send>;

struct Deferred {
    due: Tick,
    task: DeferredTask,
}

/// What happened during one [`Scheduler::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    pub tasks_run: usize,
    pub resolved: Vec<(TrackerId, Resolution)>,
}

/// Owns live trackers and pending deferred tasks.
#[derive(Default)]
pub struct Scheduler {
    now: Tick,
    next_tracker: u64,
    trackers: Vec<(TrackerId, ProjectileTracker)>,
    deferred: Vec<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last tick that was processed.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Registers a tracker; it is first polled on the next tick.
    pub fn track(&mut self, tracker: ProjectileTracker) -> TrackerId {
        let id = TrackerId(self.next_tracker);
        self.next_tracker += 1;
        self.trackers.push((id, tracker));
        id
    }

    /// Runs `task` once, `delay_ticks` ticks from now (at least one).
    ///
    /// Returns the tick at which it will run.
    pub fn schedule_once(
        &mut self,
        delay_ticks: u32,
        task: impl FnOnce(&mut Env<'_>) + Send + 'static,
    ) -> Tick {
        let due = self.now + u64::from(delay_ticks.max(1));
        self.deferred.push(Deferred {
            due,
            task: Box::new(task),
        });
        due
    }

    pub fn live_trackers(&self) -> usize {
        self.trackers.len()
    }

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    pub fn tracker(&self, id: TrackerId) -> Option<&ProjectileTracker> {
        self.trackers
            .iter()
            .find(|(tracker_id, _)| *tracker_id == id)
            .map(|(_, tracker)| tracker)
    }

    /// Advances one tick: runs due deferred tasks, then polls every live
    /// tracker once and drops the ones that resolved.
    ///
    /// Trackers and tasks created while this tick runs are first seen on the
    /// next tick.
    pub fn tick(&mut self, world: &mut dyn World) -> TickReport {
        self.now = self.now.next();
        let now = self.now;
        let mut report = TickReport {
            tick: now,
            ..TickReport::default()
        };

        // Trackers registered by tasks or callbacks below land in
        // `self.trackers` and wait for the next tick.
        let mut trackers = std::mem::take(&mut self.trackers);

        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|deferred| deferred.due <= now);
        self.deferred = pending;
        for deferred in due {
            (deferred.task)(&mut Env::new(&mut *world, &mut *self));
            report.tasks_run += 1;
        }

        trackers.retain_mut(|(id, tracker)| {
            let phase = tracker.tick(&mut Env::new(&mut *world, &mut *self));
            if phase != TrackerPhase::Resolved {
                return true;
            }
            if let Some(resolution) = tracker.resolution() {
                report.resolved.push((*id, resolution));
            }
            false
        });
        trackers.append(&mut self.trackers);
        self.trackers = trackers;

        report
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now)
            .field("live_trackers", &self.trackers.len())
            .field("pending_tasks", &self.deferred.len())
            .finish()
    }
}
