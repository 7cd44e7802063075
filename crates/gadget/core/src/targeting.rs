//! Aim-based target selection shared by all thrown items.

use crate::env::World;
use crate::state::{ActorId, Location};

/// Line-of-sight targeting: the centre of the first non-air block the actor
/// looks at, within `range` blocks.
///
/// Each item owns its own immutable copy, so ranges never leak between items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AimTargeting {
    pub range: u32,
}

impl AimTargeting {
    pub const DEFAULT_RANGE: u32 = 50;

    pub const fn new(range: u32) -> Self {
        Self { range }
    }

    pub fn target(&self, actor: ActorId, world: &dyn World) -> Option<Location> {
        world
            .target_block(actor, self.range)
            .map(|block| block.center())
    }
}

impl Default for AimTargeting {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RANGE)
    }
}
