//! Synchronous server core: one world, one scheduler, one gateway.
//!
//! [`GadgetServer`] is what a host's main thread drives. Every call runs to
//! completion on the caller's thread; "later" only ever means a later
//! [`GadgetServer::tick`].
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use gadget_core::{
    ActorId, Env, ItemRegistry, Resolution, Scheduler, Tick, TickReport, World,
};

use crate::api::CommandError;
use crate::commands::{GiveCommand, GiveReport, execute_give};
use crate::gateway::{ActivationGateway, ActivationOutcome, InteractAction, InteractEvent};

/// A [`World`] whose physics the server advances itself.
///
/// Hosts with their own physics loop implement `step` as a no-op.
pub trait SimulatedWorld: World + Send {
    fn step(&mut self);

    /// Hands over messages sent since the last call, for hosts that relay
    /// them elsewhere. Worlds that deliver messages directly return nothing.
    fn drain_messages(&mut self) -> Vec<(ActorId, String)> {
        Vec::new()
    }
}

/// Point-in-time counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStats {
    pub tick: Tick,
    pub live_trackers: usize,
    pub pending_tasks: usize,
    pub registered_items: usize,
}

pub struct GadgetServer<W> {
    world: W,
    scheduler: Scheduler,
    gateway: ActivationGateway,
}

impl<W: SimulatedWorld> GadgetServer<W> {
    pub fn new(registry: Arc<ItemRegistry>, world: W) -> Self {
        info!(
            namespace = registry.tag_key().namespace(),
            items = ?registry.ids(),
            "item registry ready"
        );
        Self {
            world,
            scheduler: Scheduler::new(),
            gateway: ActivationGateway::new(registry),
        }
    }

    pub fn registry(&self) -> &Arc<ItemRegistry> {
        self.gateway.registry()
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn now(&self) -> Tick {
        self.scheduler.now()
    }

    pub fn stats(&self) -> ServerStats {
        ServerStats {
            tick: self.scheduler.now(),
            live_trackers: self.scheduler.live_trackers(),
            pending_tasks: self.scheduler.pending_tasks(),
            registered_items: self.registry().len(),
        }
    }

    pub fn drain_messages(&mut self) -> Vec<(ActorId, String)> {
        self.world.drain_messages()
    }

    /// Uses whatever `actor` holds, as the host would on a click.
    pub fn interact(&mut self, actor: ActorId, action: InteractAction) -> ActivationOutcome {
        let mut event = InteractEvent::new(actor, action, self.world.held_item(actor));
        self.handle_interact(&mut event)
    }

    /// Runs the gateway on a host-supplied event.
    pub fn handle_interact(&mut self, event: &mut InteractEvent) -> ActivationOutcome {
        let outcome = self
            .gateway
            .on_use(event, &mut Env::new(&mut self.world, &mut self.scheduler));
        if outcome.claimed() {
            info!(actor = event.actor.0, ?outcome, "item used");
        }
        outcome
    }

    /// Runs `give <actor> <item> [amount]` on behalf of `sender` (`None` for
    /// the console). Failures are also sent to the sender as a message.
    pub fn give<S: AsRef<str>>(
        &mut self,
        sender: Option<ActorId>,
        args: &[S],
    ) -> Result<GiveReport, CommandError> {
        let result = GiveCommand::parse(args).and_then(|command| {
            execute_give(self.gateway.registry(), &mut self.world, sender, &command)
        });
        if let Err(err) = &result {
            warn!(%err, "give command rejected");
            if let Some(sender) = sender {
                self.world.send_message(sender, &err.to_string());
            }
        }
        result
    }

    /// Advances the world one tick, then runs due tasks and polls trackers.
    pub fn tick(&mut self) -> TickReport {
        self.world.step();
        let report = self.scheduler.tick(&mut self.world);
        if report.tasks_run > 0 {
            debug!(tick = report.tick.0, tasks = report.tasks_run, "deferred tasks ran");
        }
        for (tracker, resolution) in &report.resolved {
            match resolution {
                Resolution::Landed(at) => {
                    debug!(tick = report.tick.0, %tracker, ?at, "projectile landed")
                }
                Resolution::Failsafe(at) => {
                    info!(tick = report.tick.0, %tracker, ?at, "projectile failsafe fired")
                }
                Resolution::Invalidated => {
                    debug!(tick = report.tick.0, %tracker, "projectile vanished before landing")
                }
            }
        }
        report
    }

    /// Runs `ticks` ticks and returns the non-empty reports.
    pub fn advance(&mut self, ticks: u32) -> Vec<TickReport> {
        (0..ticks)
            .map(|_| self.tick())
            .filter(|report| report.tasks_run > 0 || !report.resolved.is_empty())
            .collect()
    }
}
