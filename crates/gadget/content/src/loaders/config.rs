//! Server configuration loader.

use std::path::Path;

use gadget_core::ServerConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for server configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ServerConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text. Missing keys keep their defaults.
    pub fn parse(content: &str) -> LoadResult<ServerConfig> {
        let config: ServerConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.tick_millis == 0 {
            anyhow::bail!("tick_millis must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("namespace = \"arena\"\n").unwrap();
        assert_eq!(config.namespace, "arena");
        assert_eq!(config.tick_millis, ServerConfig::DEFAULT_TICK_MILLIS);
        assert_eq!(config.event_buffer_size, ServerConfig::DEFAULT_EVENT_BUFFER_SIZE);
    }

    #[test]
    fn zero_tick_is_rejected() {
        assert!(ConfigLoader::parse("tick_millis = 0\n").is_err());
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/config.toml");
        assert_eq!(ConfigLoader::load(&path).unwrap(), ServerConfig::default());
    }
}
