//! Plain value types shared by every layer: identifiers, ticks, and world
//! coordinates.
mod types;

pub use types::{ActorId, BlockPos, Location, ObjectHandle, Tick, Vec3};
