//! Item tuning catalog loader.

use std::path::Path;

use gadget_core::Catalog;

use crate::loaders::{LoadResult, read_file};

/// Loader for the item tuning catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let catalog: Catalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        catalog
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid item catalog: {}", e))?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use gadget_core::{LandingRule, RiotShieldTuning};

    use super::*;

    #[test]
    fn shipped_catalog_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/items.ron");
        assert_eq!(CatalogLoader::load(&path).unwrap(), Catalog::default());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let catalog = CatalogLoader::parse("(grenade: (range: 20))").unwrap();
        assert_eq!(catalog.grenade.range, 20);
        assert_eq!(catalog.grenade.blast_power, 2.0);
        assert_eq!(catalog.riot_shield, RiotShieldTuning::default());
    }

    #[test]
    fn landing_rule_can_be_overridden() {
        let catalog = CatalogLoader::parse(
            r#"(
                tear_gas: (
                    landing: (
                        min_flight_ticks: 5,
                        required_stationary_ticks: 3,
                        failsafe_ticks: 40,
                        rule: Any([Contact, Slow(max_speed_squared: 0.01)]),
                    ),
                ),
            )"#,
        )
        .unwrap();
        assert_eq!(catalog.tear_gas.landing.required_stationary_ticks, 3);
        assert!(matches!(
            catalog.tear_gas.landing.rule,
            LandingRule::Any(ref rules) if rules.len() == 2
        ));
    }

    #[test]
    fn invalid_tuning_is_rejected() {
        let err = CatalogLoader::parse(
            r#"(
                molotov: (
                    landing: (
                        min_flight_ticks: 10,
                        required_stationary_ticks: 0,
                        failsafe_ticks: 60,
                        rule: Contact,
                    ),
                ),
            )"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("required_stationary_ticks"));
    }
}
