//! Content factory for loading all tuning data from one directory.

use std::path::{Path, PathBuf};

use gadget_core::{Catalog, ItemRegistry, ServerConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads server tuning from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── items.ron
/// ```
///
/// Either file may be absent, in which case the built-in defaults are used.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load server configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<ServerConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(ServerConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the item tuning catalog from `items.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let path = self.data_dir.join("items.ron");
        if !path.exists() {
            return Ok(Catalog::default());
        }
        CatalogLoader::load(&path)
    }

    /// Load config and catalog, then build the item registry under the
    /// configured namespace.
    pub fn load_registry(&self) -> LoadResult<(ServerConfig, ItemRegistry)> {
        let config = self.load_config()?;
        let registry = self
            .load_catalog()?
            .build_registry(config.namespace.clone())
            .map_err(|e| anyhow::anyhow!("Failed to build item registry: {}", e))?;
        Ok((config, registry))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), ServerConfig::default());
        assert_eq!(factory.load_catalog().unwrap(), Catalog::default());

        let (_, registry) = factory.load_registry().unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.tag_key().to_string(), "gadgets:custom_item_id");
    }

    #[test]
    fn namespace_comes_from_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "namespace = \"arena\"\n").unwrap();
        std::fs::write(dir.path().join("items.ron"), "(grenade: (range: 12))").unwrap();

        let (config, registry) = ContentFactory::new(dir.path()).load_registry().unwrap();
        assert_eq!(config.namespace, "arena");
        assert_eq!(registry.tag_key().namespace(), "arena");
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("items.ron"), "(grenade: (range: \"far\"))").unwrap();
        assert!(ContentFactory::new(dir.path()).load_catalog().is_err());
    }
}
