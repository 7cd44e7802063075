//! Process configuration read from the environment.
use std::env;
use std::path::PathBuf;

use gadget_core::ServerConfig;

/// Settings for the server binary that live outside the content directory.
#[derive(Clone, Debug)]
pub struct LaunchConfig {
    /// Directory holding `config.toml` and `items.ron`.
    pub content_dir: PathBuf,
    /// When set, logs are also written to `server.log` in this directory.
    pub log_dir: Option<PathBuf>,
    pub tick_millis: Option<u64>,
    pub namespace: Option<String>,
    /// Sandbox players spawned at startup.
    pub players: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("crates/gadget/content/data"),
            log_dir: None,
            tick_millis: None,
            namespace: None,
            players: vec!["steve".to_string(), "alex".to_string()],
        }
    }
}

impl LaunchConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GADGET_CONTENT_DIR` - Content directory (default: `crates/gadget/content/data`)
    /// - `GADGET_LOG_DIR` - Directory for `server.log` (default: stderr only)
    /// - `GADGET_TICK_MILLIS` - Overrides the tick period from `config.toml`
    /// - `GADGET_NAMESPACE` - Overrides the item tag namespace
    /// - `GADGET_PLAYERS` - Comma-separated sandbox player names (default: `steve,alex`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("GADGET_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        config.log_dir = env::var("GADGET_LOG_DIR").ok().map(PathBuf::from);

        // Zero would stall the worker; ignore it like an unparsable value.
        config.tick_millis = read_env::<u64>("GADGET_TICK_MILLIS").filter(|millis| *millis > 0);
        config.namespace = env::var("GADGET_NAMESPACE")
            .ok()
            .filter(|ns| !ns.trim().is_empty());

        if let Ok(players) = env::var("GADGET_PLAYERS") {
            config.players = parse_players(&players);
        }

        config
    }

    /// Applies the environment overrides on top of the loaded file config.
    pub fn apply(&self, server: &mut ServerConfig) {
        if let Some(millis) = self.tick_millis {
            server.tick_millis = millis;
        }
        if let Some(namespace) = &self.namespace {
            server.namespace = namespace.clone();
        }
    }
}

fn parse_players(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
