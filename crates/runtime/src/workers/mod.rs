//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the [`crate::GadgetServer`] and is the only
//! task that touches the world.

mod simulation;

pub use simulation::{Command, SimulationWorker};
