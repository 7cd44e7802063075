//! Lingering area clouds.

use std::collections::HashMap;

use gadget_core::{ActorId, AreaCloud, Location};

/// A spawned cloud plus its running state.
#[derive(Clone, Debug)]
pub(super) struct LiveCloud {
    pub cloud: AreaCloud,
    age: u32,
    last_applied: HashMap<ActorId, u32>,
}

impl LiveCloud {
    pub fn new(cloud: AreaCloud) -> Self {
        Self {
            cloud,
            age: 0,
            last_applied: HashMap::new(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.cloud.radius + self.cloud.radius_per_tick * self.age as f32
    }

    /// Ages the cloud by one tick and returns the actors due a dose.
    ///
    /// Returns `None` once the cloud has expired or shrunk away.
    pub fn step(
        &mut self,
        actors: impl Iterator<Item = (ActorId, Location)>,
    ) -> Option<Vec<ActorId>> {
        self.age += 1;
        let radius = self.radius();
        if self.age > self.cloud.duration_ticks || radius <= 0.0 {
            return None;
        }
        if self.age < self.cloud.wait_ticks {
            return Some(Vec::new());
        }

        let reach = f64::from(radius) * f64::from(radius);
        let mut dosed = Vec::new();
        for (actor, at) in actors {
            let dx = at.x - self.cloud.at.x;
            let dz = at.z - self.cloud.at.z;
            let dy = (at.y - self.cloud.at.y).abs();
            if dx * dx + dz * dz > reach || dy > 1.0 {
                continue;
            }
            let due = self
                .last_applied
                .get(&actor)
                .is_none_or(|last| self.age - last >= self.cloud.reapplication_delay);
            if due {
                self.last_applied.insert(actor, self.age);
                dosed.push(actor);
            }
        }
        Some(dosed)
    }
}

#[cfg(test)]
mod tests {
    use gadget_core::{Color, Particle, StatusEffect, StatusKind};

    use super::*;

    fn cloud() -> AreaCloud {
        AreaCloud {
            at: Location::new(0.5, 64.0, 0.5),
            source: None,
            duration_ticks: 200,
            radius: 3.0,
            radius_per_tick: -0.01,
            wait_ticks: 5,
            reapplication_delay: 20,
            effects: vec![StatusEffect::new(StatusKind::Poison, 80, 0)],
            particle: Particle::Smoke,
            color: Color::rgb(150, 150, 150),
        }
    }

    #[test]
    fn doses_after_wait_then_every_reapplication_delay() {
        let mut live = LiveCloud::new(cloud());
        let inside = (ActorId(0), Location::new(1.5, 64.0, 1.5));
        let mut dosed_at = Vec::new();
        for tick in 1..=50 {
            let dosed = live.step(std::iter::once(inside)).unwrap();
            if !dosed.is_empty() {
                dosed_at.push(tick);
            }
        }
        assert_eq!(dosed_at, vec![5, 25, 45]);
    }

    #[test]
    fn expires_after_duration() {
        let mut live = LiveCloud::new(cloud());
        for _ in 0..200 {
            assert!(live.step(std::iter::empty()).is_some());
        }
        assert!(live.step(std::iter::empty()).is_none());
    }

    #[test]
    fn actors_outside_the_radius_are_spared() {
        let mut live = LiveCloud::new(cloud());
        let far = (ActorId(1), Location::new(10.5, 64.0, 0.5));
        for _ in 0..30 {
            assert!(live.step(std::iter::once(far)).unwrap().is_empty());
        }
    }
}
