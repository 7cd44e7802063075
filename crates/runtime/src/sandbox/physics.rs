//! Point-mass motion for thrown objects.
//!
//! Each tick: gravity, then movement one axis at a time (vertical first)
//! with collisions against solid cells, then drag and ground friction.

use gadget_core::{BlockKind, BlockPos, Location, Vec3};

pub const GRAVITY: f64 = 0.04;
pub const DRAG: f64 = 0.98;
pub const GROUND_FRICTION: f64 = 0.6;
pub const WATER_DRAG: f64 = 0.8;

/// Components below this magnitude are snapped to zero.
const REST_EPSILON: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Body {
    pub location: Location,
    pub velocity: Vec3,
    pub gravity: bool,
    pub on_ground: bool,
    pub in_water: bool,
}

impl Body {
    pub fn new(location: Location, velocity: Vec3, gravity: bool) -> Self {
        Self {
            location,
            velocity,
            gravity,
            on_ground: false,
            in_water: false,
        }
    }

    /// Advances one tick against the terrain described by `block`.
    pub fn step(&mut self, block: impl Fn(BlockPos) -> BlockKind) {
        if self.gravity {
            self.velocity.y -= GRAVITY;
        }

        let mut at = self.location;

        let next = at.offset(0.0, self.velocity.y, 0.0);
        if block(next.block()).is_solid() {
            if self.velocity.y < 0.0 {
                at.y = f64::from(next.block().y) + 1.0;
            }
            self.velocity.y = 0.0;
        } else {
            at = next;
        }

        let next = at.offset(self.velocity.x, 0.0, 0.0);
        if block(next.block()).is_solid() {
            self.velocity.x = 0.0;
        } else {
            at = next;
        }

        let next = at.offset(0.0, 0.0, self.velocity.z);
        if block(next.block()).is_solid() {
            self.velocity.z = 0.0;
        } else {
            at = next;
        }

        self.location = at;
        self.on_ground =
            self.velocity.y == 0.0 && block(at.offset(0.0, -0.01, 0.0).block()).is_solid();
        self.in_water = block(at.block()) == BlockKind::Water;

        self.velocity = self.velocity * DRAG;
        if self.on_ground {
            self.velocity.x *= GROUND_FRICTION;
            self.velocity.z *= GROUND_FRICTION;
        }
        if self.in_water {
            self.velocity = self.velocity * WATER_DRAG;
        }
        for component in [&mut self.velocity.x, &mut self.velocity.y, &mut self.velocity.z] {
            if component.abs() < REST_EPSILON {
                *component = 0.0;
            }
        }
    }
}
