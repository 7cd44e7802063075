//! Simulation worker that owns the authoritative [`GadgetServer`].
//!
//! Receives commands from [`crate::RuntimeHandle`], advances the server on a
//! fixed tick, and publishes [`GadgetEvent`]s.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info};

use gadget_core::{ActorId, TickReport};

use crate::api::{CommandError, GadgetEvent};
use crate::commands::GiveReport;
use crate::gateway::{ActivationOutcome, InteractAction};
use crate::server::{GadgetServer, ServerStats, SimulatedWorld};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Use the item the actor is holding.
    Interact {
        actor: ActorId,
        action: InteractAction,
        reply: oneshot::Sender<ActivationOutcome>,
    },
    /// Run a `give` command line.
    Give {
        sender: Option<ActorId>,
        args: Vec<String>,
        reply: oneshot::Sender<Result<GiveReport, CommandError>>,
    },
    /// Run ticks immediately, outside the wall-clock schedule.
    Advance {
        ticks: u32,
        reply: oneshot::Sender<ServerStats>,
    },
    /// Query the current counters (read-only).
    QueryStats { reply: oneshot::Sender<ServerStats> },
}

/// Background task that processes commands and drives the tick.
pub struct SimulationWorker<W> {
    server: GadgetServer<W>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GadgetEvent>,
    /// `None` when ticks only happen through [`Command::Advance`].
    tick_period: Option<Duration>,
}

impl<W: SimulatedWorld> SimulationWorker<W> {
    pub fn new(
        server: GadgetServer<W>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<GadgetEvent>,
        tick_period: Option<Duration>,
    ) -> Self {
        info!(
            ?tick_period,
            items = server.registry().len(),
            "SimulationWorker initialized"
        );
        Self {
            server,
            command_rx,
            event_tx,
            tick_period,
        }
    }

    /// Main worker loop. Returns once every command sender is gone.
    pub async fn run(mut self) {
        let mut interval = self.tick_period.map(|period| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = next_tick(&mut interval) => {
                    let report = self.server.tick();
                    self.publish_report(&report);
                    self.flush_messages();
                }
            }
        }

        info!(tick = self.server.now().0, "SimulationWorker stopped");
    }

    /// Replies are sent after the events the command produced.
    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Interact {
                actor,
                action,
                reply,
            } => {
                let outcome = self.server.interact(actor, action);
                if outcome.claimed() {
                    self.publish(GadgetEvent::ItemUsed {
                        tick: self.server.now(),
                        actor,
                        outcome: outcome.clone(),
                    });
                }
                self.flush_messages();
                if reply.send(outcome).is_err() {
                    debug!("Interact reply channel closed (caller dropped)");
                }
            }
            Command::Give {
                sender,
                args,
                reply,
            } => {
                let result = self.server.give(sender, &args);
                let tick = self.server.now();
                match &result {
                    Ok(report) => self.publish(GadgetEvent::ItemsGranted {
                        tick,
                        recipient: report.recipient,
                        item: report.item.clone(),
                        amount: report.amount,
                        overflow: report.overflow,
                    }),
                    Err(err) => self.publish(GadgetEvent::GrantRejected {
                        tick,
                        reason: err.to_string(),
                    }),
                }
                self.flush_messages();
                if reply.send(result).is_err() {
                    debug!("Give reply channel closed (caller dropped)");
                }
            }
            Command::Advance { ticks, reply } => {
                for _ in 0..ticks {
                    let report = self.server.tick();
                    self.publish_report(&report);
                    self.flush_messages();
                }
                if reply.send(self.server.stats()).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::QueryStats { reply } => {
                if reply.send(self.server.stats()).is_err() {
                    debug!("QueryStats reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn publish_report(&self, report: &TickReport) {
        if report.tasks_run > 0 {
            self.publish(GadgetEvent::TasksRun {
                tick: report.tick,
                count: report.tasks_run,
            });
        }
        for (tracker, resolution) in &report.resolved {
            self.publish(GadgetEvent::TrackerResolved {
                tick: report.tick,
                tracker: *tracker,
                resolution: *resolution,
            });
        }
    }

    fn flush_messages(&mut self) {
        let tick = self.server.now();
        for (actor, text) in self.server.drain_messages() {
            self.publish(GadgetEvent::Message { tick, actor, text });
        }
    }

    fn publish(&self, event: GadgetEvent) {
        // No subscribers is fine.
        let _ = self.event_tx.send(event);
    }
}

async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
