//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for hosts to drive the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use gadget_core::{Catalog, ItemRegistry, ServerConfig};

use crate::api::{GadgetEvent, Result, RuntimeError, RuntimeHandle};
use crate::sandbox::SandboxWorld;
use crate::server::{GadgetServer, SimulatedWorld};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    /// Drive ticks from the wall clock. When off, only
    /// [`RuntimeHandle::advance`] moves time.
    pub auto_tick: bool,
}

impl RuntimeConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.server.tick_millis)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auto_tick: true,
        }
    }
}

/// Main runtime that hosts the gadget server.
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder<SandboxWorld> {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to runtime events
    pub fn subscribe_events(&self) -> broadcast::Receiver<GadgetEvent> {
        self.handle.subscribe()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once this handle and every clone of it are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder<W> {
    config: RuntimeConfig,
    registry: Option<Arc<ItemRegistry>>,
    catalog: Option<Catalog>,
    world: W,
}

impl RuntimeBuilder<SandboxWorld> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            registry: None,
            catalog: None,
            world: SandboxWorld::new(),
        }
    }
}

impl<W: SimulatedWorld + 'static> RuntimeBuilder<W> {
    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a ready-made registry (takes precedence over [`Self::catalog`]).
    pub fn registry(mut self, registry: Arc<ItemRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the registry from this catalog under the configured namespace.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn auto_tick(mut self, enabled: bool) -> Self {
        self.config.auto_tick = enabled;
        self
    }

    /// Host a different world type.
    pub fn world<V: SimulatedWorld + 'static>(self, world: V) -> RuntimeBuilder<V> {
        RuntimeBuilder {
            config: self.config,
            registry: self.registry,
            catalog: self.catalog,
            world,
        }
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        if self.config.server.tick_millis == 0 {
            return Err(RuntimeError::ZeroTickPeriod);
        }

        let registry = match (self.registry, self.catalog) {
            (Some(registry), _) => registry,
            (None, Some(catalog)) => {
                Arc::new(catalog.build_registry(self.config.server.namespace.clone())?)
            }
            (None, None) => return Err(RuntimeError::MissingRegistry),
        };

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.server.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<GadgetEvent>(self.config.server.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let tick_period = self.config.auto_tick.then(|| self.config.tick_period());
        let sim_worker = SimulationWorker::new(
            GadgetServer::new(registry, self.world),
            command_rx,
            event_tx,
            tick_period,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
