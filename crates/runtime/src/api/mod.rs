//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod events;
pub mod handle;

pub use errors::{CommandError, Result, RuntimeError};
pub use events::GadgetEvent;
pub use handle::RuntimeHandle;
