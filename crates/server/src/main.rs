//! Gadget server binary.
//!
//! Composition root: loads content, spawns a sandbox world with a few
//! players, starts the runtime on its fixed tick, prints every runtime event
//! as a JSON line and reads operator commands from stdin.
//!
//! ```bash
//! GADGET_TICK_MILLIS=50 RUST_LOG=debug cargo run -p gadget-server
//! ```

mod config;
mod console;

use std::collections::HashMap;

use anyhow::{Context, Result};
use gadget_content::ContentFactory;
use gadget_core::{BlockPos, Location, World};
use gadget_runtime::{Runtime, RuntimeConfig, SandboxWorld};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LaunchConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let launch = LaunchConfig::from_env();
    let _log_guard = setup_logging(&launch)?;

    let content = ContentFactory::new(&launch.content_dir);
    let mut server_config = content
        .load_config()
        .with_context(|| format!("loading config from {}", launch.content_dir.display()))?;
    launch.apply(&mut server_config);
    let catalog = content.load_catalog()?;

    let (world, players) = sandbox(&launch.players);
    tracing::info!(
        tick_millis = server_config.tick_millis,
        namespace = %server_config.namespace,
        players = players.len(),
        "Starting gadget server"
    );

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            server: server_config,
            auto_tick: true,
        })
        .catalog(catalog)
        .world(world)
        .build()
        .await?;

    let mut events = runtime.subscribe_events();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(line) => println!("{line}"),
                    Err(err) => tracing::warn!(%err, "event not serializable"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event printer fell behind")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    console::run(runtime.handle(), players).await?;

    runtime.shutdown().await?;
    printer.await?;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// A floor with the given players lined up along x, each looking at the
/// ground eight blocks ahead.
fn sandbox(names: &[String]) -> (SandboxWorld, HashMap<String, gadget_core::ActorId>) {
    let mut world = SandboxWorld::new();
    let mut players = HashMap::new();
    for (index, name) in names.iter().enumerate() {
        let x = index as i32 * 4;
        let actor = world.add_actor(name.clone(), Location::new(f64::from(x) + 0.5, 64.0, 0.5));
        world.look_at(actor, BlockPos::new(x, SandboxWorld::FLOOR_Y, 8).center());
        if let Some(name) = world.actor_name(actor) {
            players.insert(name.to_ascii_lowercase(), actor);
        }
    }
    (world, players)
}

/// Logs to stderr, and to `server.log` when a log directory is configured.
///
/// The returned guard must stay alive for the file writer to flush.
fn setup_logging(
    launch: &LaunchConfig,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Some(log_dir) = &launch.log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(log_dir, "server.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/server.log", log_dir.display());
    Ok(Some(guard))
}
