//! Runtime for the gadget server: item activation, grant command, and the
//! tick loop.
//!
//! This crate wraps the pure rules in `gadget-core` with everything a host
//! needs to run them: the [`ActivationGateway`] that turns clicks into
//! activations, the `give` command, a synchronous [`GadgetServer`], and an
//! async [`Runtime`] whose worker drives the server on a fixed tick and
//! broadcasts [`GadgetEvent`]s. [`SandboxWorld`] is a self-contained world
//! for tests and the console server.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`server`], [`gateway`] and [`commands`] hold the synchronous logic
//! - [`sandbox`] provides the in-memory world
pub mod api;
pub mod commands;
pub mod gateway;
pub mod runtime;
pub mod sandbox;
pub mod server;

mod workers;

pub use api::{CommandError, GadgetEvent, Result, RuntimeError, RuntimeHandle};
pub use commands::{
    Amount, DEFAULT_AMOUNT, GiveCommand, GiveReport, INVALID_AMOUNT_MESSAGE, execute_give,
    parse_amount,
};
pub use gateway::{
    ActivationGateway, ActivationOutcome, InteractAction, InteractEvent, NO_TARGET_MESSAGE,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use sandbox::{SandboxWorld, SoundRecord};
pub use server::{GadgetServer, ServerStats, SimulatedWorld};
