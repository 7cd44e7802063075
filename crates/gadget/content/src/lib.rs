//! Data-driven tuning for the gadget server.
//!
//! Loads the item [`gadget_core::Catalog`] from RON and the
//! [`gadget_core::ServerConfig`] from TOML. Both formats map directly onto
//! `gadget-core` types through serde, and every field has a built-in default,
//! so a data directory may be partial or missing entirely.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
